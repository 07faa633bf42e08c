//! Sampling requests against a DE file.
//!
//! An [`EphemerisQuery`] names one item and a Julian Date range sampled at a
//! fixed number of evenly spaced points:
//!
//! * `t0 == t1`: one sample at `t0`, whatever the requested resolution;
//! * resolution 1 with `t0 != t1`: one sample at the midpoint;
//! * otherwise `resolution` samples from `t0` to `t1`, both included.
//!
//! The textual parsers accept the same spellings as the command line of the
//! historical `uephem` tool (`0x` hexadecimal and leading-zero octal
//! integers).
use hifitime::Epoch;

use crate::{
    constants::{MAX_ITEM_ID, MIN_ITEM_ID},
    jpl_ephem::horizon::horizon_ids::HorizonID,
    uephem_errors::{Result, UephemError},
};

/// One item sampled over `[start_jd, end_jd]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EphemerisQuery {
    pub item: HorizonID,
    pub start_jd: f64,
    pub end_jd: f64,
    /// Requested number of samples, at least 1.
    pub resolution: usize,
}

fn check_jd(jd: f64) -> Result<f64> {
    if jd.is_finite() {
        Ok(jd)
    } else {
        Err(UephemError::InvalidArgument(format!(
            "Julian Date must be finite, got {jd}"
        )))
    }
}

impl EphemerisQuery {
    /// Single sample at `jd`.
    pub fn at(item: HorizonID, jd: f64) -> Result<Self> {
        let jd = check_jd(jd)?;
        Ok(EphemerisQuery {
            item,
            start_jd: jd,
            end_jd: jd,
            resolution: 1,
        })
    }

    /// `resolution` samples between `t0` and `t1`.
    ///
    /// Arguments
    /// -----------------
    /// * `item` — Item to evaluate.
    /// * `t0`, `t1` — Julian Dates bounding the range; `t1 < t0` samples backwards.
    /// * `resolution` — Number of samples, must be positive.
    ///
    /// Errors
    /// ----------
    /// * [`UephemError::InvalidArgument`] for a non-positive resolution or a
    ///   non-finite date.
    pub fn range(item: HorizonID, t0: f64, t1: f64, resolution: i64) -> Result<Self> {
        let resolution = usize::try_from(resolution)
            .ok()
            .filter(|r| *r > 0)
            .ok_or_else(|| {
                UephemError::InvalidArgument(format!(
                    "resolution must be positive, got {resolution}"
                ))
            })?;
        Ok(EphemerisQuery {
            item,
            start_jd: check_jd(t0)?,
            end_jd: check_jd(t1)?,
            resolution,
        })
    }

    /// Same as [`range`](Self::range) with bounds given as epochs, converted
    /// to TDB Julian Dates (the time argument of DE files).
    pub fn from_epochs(item: HorizonID, start: Epoch, end: Epoch, resolution: i64) -> Result<Self> {
        Self::range(
            item,
            start.to_jde_tdb_days(),
            end.to_jde_tdb_days(),
            resolution,
        )
    }

    /// Number of samples actually produced.
    pub fn sample_count(&self) -> usize {
        if self.start_jd == self.end_jd {
            1
        } else {
            self.resolution
        }
    }

    /// Julian Dates of the samples, in order.
    pub fn sample_times(&self) -> SampleTimes {
        let count = self.sample_count();
        let (start, step) = if count == 1 {
            ((self.start_jd + self.end_jd) * 0.5, 0.0)
        } else {
            (
                self.start_jd,
                (self.end_jd - self.start_jd) / (count - 1) as f64,
            )
        };
        SampleTimes {
            start,
            step,
            end: self.end_jd,
            index: 0,
            count,
        }
    }
}

/// Iterator over the sample dates of an [`EphemerisQuery`].
///
/// The last date of a multi-sample range is exactly `t1`.
#[derive(Debug, Clone)]
pub struct SampleTimes {
    start: f64,
    step: f64,
    end: f64,
    index: usize,
    count: usize,
}

impl Iterator for SampleTimes {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.count {
            return None;
        }
        let jd = if self.count > 1 && self.index == self.count - 1 {
            self.end
        } else {
            self.start + self.step * self.index as f64
        };
        self.index += 1;
        Some(jd)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for SampleTimes {}

/// Integer with C `strtol(.., 0)` spelling: optional sign, then `0x` hex,
/// leading `0` octal or decimal digits.
fn parse_integer(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, body) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };
    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = i64::from_str_radix(body, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse an item id; unparsable text is [`UephemError::InvalidArgument`],
/// an id outside `[0, 14]` is [`UephemError::ItemNotFound`].
pub fn parse_item_id(text: &str) -> Result<HorizonID> {
    let id = parse_integer(text)
        .ok_or_else(|| UephemError::InvalidArgument(format!("invalid item id {text:?}")))?;
    if !(MIN_ITEM_ID as i64..=MAX_ITEM_ID as i64).contains(&id) {
        return Err(UephemError::ItemNotFound {
            item_id: id,
            reason: "outside [0, 14]",
        });
    }
    HorizonID::try_from(id as i32)
}

pub fn parse_julian_date(text: &str) -> Result<f64> {
    let jd = text
        .parse::<f64>()
        .map_err(|_| UephemError::InvalidArgument(format!("invalid Julian Date {text:?}")))?;
    check_jd(jd)
}

/// Parse a resolution. Its sign is checked by [`EphemerisQuery::range`].
pub fn parse_resolution(text: &str) -> Result<i64> {
    parse_integer(text)
        .ok_or_else(|| UephemError::InvalidArgument(format!("invalid resolution {text:?}")))
}
