//! Version labels for JPL DE solutions.
//!
//! The header only stores the DE number as an integer (e.g. `440`). This
//! module maps the published numbers to [`JPLHorizonVersion`] so the header
//! can be reported with a recognizable label. Unknown numbers are not an
//! error: files produced by newer or private integrations simply have no
//! entry here.
//!
//! ```rust
//! use uephem::jpl_ephem::horizon::horizon_version::JPLHorizonVersion;
//!
//! let v = JPLHorizonVersion::from_de_number(440).unwrap();
//! assert_eq!(v.to_string(), "DE440");
//! ```
use std::fmt;

/// Published DE solutions distributed in the legacy binary format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum JPLHorizonVersion {
    DE102,
    DE200,
    DE202,
    DE403,
    DE405,
    DE406,
    DE410,
    DE413,
    DE414,
    DE418,
    DE421,
    DE422,
    DE423,
    DE430,
    DE431,
    DE440,
    DE441,
}

impl JPLHorizonVersion {
    const TABLE: [(JPLHorizonVersion, i32); 17] = [
        (JPLHorizonVersion::DE102, 102),
        (JPLHorizonVersion::DE200, 200),
        (JPLHorizonVersion::DE202, 202),
        (JPLHorizonVersion::DE403, 403),
        (JPLHorizonVersion::DE405, 405),
        (JPLHorizonVersion::DE406, 406),
        (JPLHorizonVersion::DE410, 410),
        (JPLHorizonVersion::DE413, 413),
        (JPLHorizonVersion::DE414, 414),
        (JPLHorizonVersion::DE418, 418),
        (JPLHorizonVersion::DE421, 421),
        (JPLHorizonVersion::DE422, 422),
        (JPLHorizonVersion::DE423, 423),
        (JPLHorizonVersion::DE430, 430),
        (JPLHorizonVersion::DE431, 431),
        (JPLHorizonVersion::DE440, 440),
        (JPLHorizonVersion::DE441, 441),
    ];

    /// Look up the solution for the DE number stored in a header.
    pub fn from_de_number(de_number: i32) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, n)| *n == de_number)
            .map(|(v, _)| *v)
    }

    pub fn de_number(&self) -> i32 {
        Self::TABLE
            .iter()
            .find(|(v, _)| v == self)
            .map(|(_, n)| *n)
            .unwrap_or_default()
    }
}

impl fmt::Display for JPLHorizonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DE{}", self.de_number())
    }
}
