//! # uephem
//!
//! Reader and evaluator for JPL "Development Ephemeris" (DE) binary files.
//!
//! A DE file tabulates, for 15 fixed items (planets, Moon, Sun, nutations,
//! lunar librations, TT−TDB, ...), piecewise Chebyshev series over
//! fixed-length records. This crate decodes the header, walks the records
//! with a single resident buffer and evaluates any item, with its time
//! derivative, at arbitrary Julian Dates.
//!
//! ```rust,no_run
//! use uephem::{
//!     ephemeris_query::EphemerisQuery,
//!     jpl_ephem::horizon::{horizon_data::HorizonData, horizon_ids::HorizonID},
//! };
//!
//! let mut de = HorizonData::open("lnxp1600p2200.405")?;
//! let query = EphemerisQuery::range(HorizonID::Moon, 2451545.0, 2451546.0, 25)?;
//! for sample in de.query(&query)? {
//!     println!("{} {:?}", sample.jd, sample.position_vector3());
//! }
//! # Ok::<(), uephem::uephem_errors::UephemError>(())
//! ```

pub mod constants;
pub mod ephemeris_query;
pub mod jpl_ephem;
pub mod output;
pub mod uephem_errors;
