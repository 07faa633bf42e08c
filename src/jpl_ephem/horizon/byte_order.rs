//! Byte order detection for DE binaries.
//!
//! DE files are written in the byte order of the machine that produced them
//! and carry no explicit marker. The only signal is the DE version number at
//! [`OFFSET_DENUM`](crate::constants::OFFSET_DENUM): valid numbers are small
//! (102, 405, 440, ...), so when the word is read in host order its upper
//! half-word is zero. A non-zero upper half means every 32 and 64-bit field
//! of the file must be byte-reversed.
//!
//! The heuristic holds for every published DE file but is not guaranteed by
//! the format itself.

use nom::{
    number::{
        complete::{be_f64, be_i32, le_f64, le_i32},
        Endianness,
    },
    IResult,
};

use crate::constants::ENDIAN_SWAP_MASK;

/// Order of multi-byte fields in the file, relative to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Same as the reading host.
    Native,
    /// Opposite of the reading host; every word is byte-reversed on read.
    Swapped,
}

/// Infer the file byte order from the DE version word read in host order.
pub fn infer_byte_order(raw_version_word: u32) -> ByteOrder {
    if raw_version_word & ENDIAN_SWAP_MASK != 0 {
        ByteOrder::Swapped
    } else {
        ByteOrder::Native
    }
}

impl ByteOrder {
    /// Concrete endianness of the file on this host.
    pub fn endianness(self) -> Endianness {
        let host_little = cfg!(target_endian = "little");
        match (self, host_little) {
            (ByteOrder::Native, true) | (ByteOrder::Swapped, false) => Endianness::Little,
            (ByteOrder::Native, false) | (ByteOrder::Swapped, true) => Endianness::Big,
        }
    }

    /// Decode one 8-byte word as an `f64`.
    pub fn decode_f64(self, bytes: [u8; 8]) -> f64 {
        match self.endianness() {
            Endianness::Big => f64::from_be_bytes(bytes),
            _ => f64::from_le_bytes(bytes),
        }
    }

    /// Decode a packed run of doubles into `out`, which must hold exactly
    /// `bytes.len() / 8` values.
    pub fn decode_f64_slice(self, bytes: &[u8], out: &mut [f64]) {
        for (chunk, value) in bytes.chunks_exact(8).zip(out.iter_mut()) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            *value = self.decode_f64(word);
        }
    }
}

/// 32-bit signed integer parser in the given file endianness.
pub(crate) fn word_i32(order: Endianness) -> impl Fn(&[u8]) -> IResult<&[u8], i32> {
    move |input| match order {
        Endianness::Big => be_i32(input),
        _ => le_i32(input),
    }
}

/// 64-bit float parser in the given file endianness.
pub(crate) fn word_f64(order: Endianness) -> impl Fn(&[u8]) -> IResult<&[u8], f64> {
    move |input| match order {
        Endianness::Big => be_f64(input),
        _ => le_f64(input),
    }
}
