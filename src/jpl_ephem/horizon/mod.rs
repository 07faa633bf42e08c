//! Legacy JPL DE binary ephemerides reader.
//!
//! Reads the binary "Development Ephemeris" files distributed by JPL under
//! `.../eph/planets/Linux/` (`lnxp1600p2200.405`, `linux_p1550p2650.440`,
//! ...) and evaluates their Chebyshev series at arbitrary Julian Dates,
//! without loading the whole file in memory.
//!
//! - [`horizon_header`] — Header Parser. Decodes the fixed-offset header,
//!   the item descriptor table and the record geometry.
//! - [`byte_order`] — Infers whether the file was written on a host of the
//!   other endianness and provides the matching word decoders.
//! - [`horizon_records`] — Record Locator. Keeps one coefficient record
//!   resident and moves between records with chunked relative seeks.
//! - [`chebyshev`] — Chebyshev series and derivative evaluation.
//! - [`horizon_data`] — High-level entry point
//!   [`HorizonData`](crate::jpl_ephem::horizon::horizon_data::HorizonData):
//!   interpolation of one item at one date, whole queries, constant table.
//! - [`horizon_ids`] — The 15 items of the format and their component counts.
//! - [`horizon_version`] — Labels for known DE numbers.
//! - [`interpolation_result`] — One evaluated sample.
//!
//! # File layout
//!
//! ```text
//! +---------------------------------------------------------------------------+
//! | record 0: header (titles, constant names, coverage, item table, DE number) |
//! +---------------------------------------------------------------------------+
//! | record 1: constant values (NCON × f64)                                     |
//! +---------------------------------------------------------------------------+
//! | record 2: coefficients for [time_start, time_start + record_span]          |
//! |   f64 start JD, f64 end JD                                                 |
//! |   for item b = 0..14 at 1-based double offset IPT[b][0]:                   |
//! |     for sub = 0..IPT[b][2]:                                                |
//! |       for comp = 0..dim(b):                                                |
//! |         IPT[b][1] × f64 Chebyshev coefficients                             |
//! +---------------------------------------------------------------------------+
//! | record 3: next record_span days, same layout                               |
//! |   ...                                                                      |
//! +---------------------------------------------------------------------------+
//! ```
//!
//! All records have the same size, `max_b(IPT[b][0] + IPT[b][1]·IPT[b][2]·dim(b)) − 1`
//! doubles. Integers and doubles use the byte order of the machine that
//! wrote the file.
//!
//! # See also
//! * JPL planetary ephemerides: <https://ssd.jpl.nasa.gov/ftp/eph/planets/Linux/>

pub mod byte_order;
/// Chebyshev series evaluation.
pub mod chebyshev;
/// High-level API: open DE binaries, interpolate items, run queries.
pub mod horizon_data;
/// Header record decoding and record geometry.
pub mod horizon_header;
/// Item identifiers (0–14) with their fixed component counts.
pub mod horizon_ids;
/// Coefficient records and the Record Locator.
pub mod horizon_records;
/// DE number to version label mapping.
pub mod horizon_version;
/// Interpolation output (one sample).
pub mod interpolation_result;

#[cfg(test)]
pub(crate) mod test_fixture;
