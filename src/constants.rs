//! # Constants for the legacy DE binary layout
//!
//! This module centralizes the **fixed byte offsets** and **format tables** of the
//! JPL "Development Ephemeris" binary files read by this crate.
//!
//! ## Overview
//!
//! - Fixed offsets into the first (header) record
//! - Limits inherited from the historical FORTRAN layout
//! - Per-item tables that are part of the format but never stored in the file
//!
//! Every value here is a format constant: changing one breaks bit-exact
//! compatibility with files produced by JPL.

// -------------------------------------------------------------------------------------------------
// Header offsets (bytes from the beginning of the file)
// -------------------------------------------------------------------------------------------------

/// Three 84-byte title lines (`TTL`)
pub const OFFSET_TITLES: usize = 0x000;

/// Length of one title line
pub const TITLE_LENGTH: usize = 84;

/// Number of title lines
pub const TITLE_COUNT: usize = 3;

/// First 400 constant names (`CNAM`), 6 bytes each
pub const OFFSET_CONSTANT_NAMES: usize = OFFSET_TITLES + TITLE_LENGTH * TITLE_COUNT;

/// `time_start`, `time_end`, `record_span` (3 × f64)
pub const OFFSET_TIME: usize = 0xA5C;

/// Number of constants (`NCON`, i32), directly after the time triple
pub const OFFSET_NCONST: usize = 0xA74;

/// Astronomical unit in km (f64)
pub const OFFSET_AU: usize = 0xA78;

/// Earth/Moon mass ratio (f64)
pub const OFFSET_EMRAT: usize = 0xA80;

/// Item descriptors 0–11 (12 × 3 × i32)
pub const OFFSET_TABLE1: usize = 0xA88;

/// DE version number (i32), also used as the byte order sentinel
pub const OFFSET_DENUM: usize = 0xB18;

/// Item descriptor 12 (3 × i32)
pub const OFFSET_TABLE2: usize = 0xB1C;

/// End of the fixed header region. Overflow constant names, then item
/// descriptors 13–14, start here.
pub const OFFSET_HEADER_END: usize = 0xB28;

// -------------------------------------------------------------------------------------------------
// Format limits
// -------------------------------------------------------------------------------------------------

/// Constant names that fit in the fixed header
pub const MAX_NCONST: usize = 400;

/// Width of a constant name (FORTRAN `CHARACTER*6`)
pub const CONSTANT_NAME_LENGTH: usize = 6;

/// Mask applied to the raw DE number: any bit set here means the file was
/// written with the opposite byte order.
pub const ENDIAN_SWAP_MASK: u32 = 0xFFFF_0000;

/// Number of items described by the header
pub const ITEM_COUNT: usize = 15;

/// Items read from the fixed table region 1
pub const TABLE1_ITEMS: usize = 12;

/// Items 0..=14
pub const MIN_ITEM_ID: i32 = 0;
pub const MAX_ITEM_ID: i32 = 14;

/// Vector components per item
pub const ITEM_COMPONENTS: [usize; ITEM_COUNT] = [3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 2, 3, 3, 1];

/// Whether a time derivative is emitted for each item.
///
/// Items 13 (lunar mantle angular velocity) and 14 (TT-TDB) only report values.
pub const ITEM_HAS_DERIVATIVE: [bool; ITEM_COUNT] = [
    true, true, true, true, true, true, true, true, true, true, true, true, true, false, false,
];

/// Records preceding the first coefficient record (header + constants)
pub const LEADING_RECORDS: u64 = 2;

/// Size of one stored double in bytes
pub const DOUBLE_SIZE: usize = std::mem::size_of::<f64>();
