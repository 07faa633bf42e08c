#![allow(dead_code)]

use std::io::Write;

use approx::assert_relative_eq;
use tempfile::NamedTempFile;
use uephem::jpl_ephem::horizon::interpolation_result::InterpResult;

#[path = "../../src/jpl_ephem/horizon/test_fixture.rs"]
mod test_fixture;

pub use test_fixture::*;

pub const TIME_START: f64 = 2440400.5;
pub const TIME_END: f64 = 2450000.5;
pub const RECORD_SPAN: f64 = 32.0;

/// The reference header: 300 records of 32 days.
pub fn reference_fixture() -> DeFixture {
    DeFixture::new(TIME_START, TIME_END, RECORD_SPAN)
}

/// Write `bytes` to a temporary file deleted on drop.
pub fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

/// Compare a sample with the fixture's closed-form values.
pub fn assert_sample_matches(fixture: &DeFixture, item: usize, sample: &InterpResult) {
    let expected = fixture.expected_position(item, sample.jd);
    assert_eq!(sample.position.len(), expected.len());
    for (got, want) in sample.position.iter().zip(&expected) {
        assert_relative_eq!(*got, *want, max_relative = 1e-12, epsilon = 1e-9);
    }
}
