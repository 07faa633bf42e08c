use std::{fs::File, io::BufReader};

use camino::Utf8Path;
use horizon::horizon_data::{HorizonData, HorizonOptions};

use crate::uephem_errors::Result;

pub mod horizon;

/// DE file opened from disk.
pub type HorizonFile = HorizonData<BufReader<File>>;

/// Open the DE binary at `path` and decode its header.
///
/// The file handle lives inside the returned value and is closed when it is
/// dropped, including after a failed query.
pub fn open_ephemeris(path: impl AsRef<Utf8Path>, options: HorizonOptions) -> Result<HorizonFile> {
    HorizonData::open_with_options(path, options)
}
