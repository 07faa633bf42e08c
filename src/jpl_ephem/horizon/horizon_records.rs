//! Coefficient records and the Record Locator.
//!
//! A DE file stores its Chebyshev coefficients in fixed-size records, each
//! covering `record_span` days for every item at once. [`RecordLocator`]
//! keeps exactly one decoded record resident and moves through the file with
//! relative seeks only, split into chunks small enough for a single
//! [`SeekFrom::Current`] call (see [`seek_chunks`]).
use std::io::{Read, Seek, SeekFrom};

use tracing::trace;

use crate::uephem_errors::{Result, UephemError};

use super::{
    byte_order::ByteOrder,
    horizon_header::{EphemerisHeader, RecordGeometry},
};

/// One decoded coefficient record.
///
/// The buffer always holds `coeffs_per_record` doubles; the first two are the
/// Julian Dates bounding the record.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientRecord {
    index: Option<u64>,
    coeffs: Vec<f64>,
}

impl CoefficientRecord {
    fn empty(geometry: RecordGeometry) -> Self {
        CoefficientRecord {
            index: None,
            coeffs: vec![0.0; geometry.coeffs_per_record],
        }
    }

    /// 0-based index of the record among the coefficient records, `None`
    /// until one has been loaded.
    pub fn index(&self) -> Option<u64> {
        self.index
    }

    pub fn start_jd(&self) -> f64 {
        self.coeffs[0]
    }

    pub fn end_jd(&self) -> f64 {
        self.coeffs[1]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.coeffs
    }

    /// Bounds-checked view of `len` coefficients starting at the 0-based
    /// position `offset`.
    ///
    /// A range falling outside the record means the item table does not
    /// match the record layout and is reported as [`UephemError::FileRead`].
    pub fn coefficients(&self, offset: usize, len: usize) -> Result<&[f64]> {
        offset
            .checked_add(len)
            .and_then(|end| self.coeffs.get(offset..end))
            .ok_or_else(|| {
                UephemError::corrupt(format!(
                    "coefficients [{offset}, {offset}+{len}) outside record of {} doubles",
                    self.coeffs.len()
                ))
            })
    }
}

/// Relative seek distances, in bytes, covering `records_to_skip` records
/// without any single distance exceeding `max_seek_offset`.
///
/// Each chunk is a whole number of records. When a single record is larger
/// than `max_seek_offset`, chunks of one record are produced.
pub(crate) fn seek_chunks(
    records_to_skip: i64,
    record_byte_size: i64,
    max_seek_offset: i64,
) -> SeekChunks {
    let per_seek = (max_seek_offset / record_byte_size.max(1)).max(1);
    SeekChunks {
        remaining: records_to_skip,
        per_seek,
        record_byte_size,
    }
}

/// Iterator returned by [`seek_chunks`].
#[derive(Debug, Clone)]
pub(crate) struct SeekChunks {
    remaining: i64,
    per_seek: i64,
    record_byte_size: i64,
}

impl Iterator for SeekChunks {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.remaining == 0 {
            return None;
        }
        let step = self.remaining.clamp(-self.per_seek, self.per_seek);
        self.remaining -= step;
        Some(step * self.record_byte_size)
    }
}

/// Maps Julian Dates to coefficient records and keeps the last one loaded.
///
/// The locator owns the byte source for its whole lifetime. It only ever
/// issues one absolute seek (to the first coefficient record); afterwards it
/// tracks which record the stream points at and advances relative to it.
#[derive(Debug)]
pub struct RecordLocator<R> {
    source: R,
    byte_order: ByteOrder,
    time_start: f64,
    record_span: f64,
    record_count: u64,
    geometry: RecordGeometry,
    record_byte_size: i64,
    max_seek_offset: i64,
    record: CoefficientRecord,
    raw: Vec<u8>,
    /// Record index the stream is positioned at, `None` when unknown.
    cursor: Option<u64>,
    loads: usize,
}

impl<R: Read + Seek> RecordLocator<R> {
    /// Build a locator for a file whose header has already been decoded.
    ///
    /// No I/O happens until the first [`locate`](Self::locate).
    pub fn new(source: R, header: &EphemerisHeader) -> Result<Self> {
        let geometry = header.geometry();
        let record_byte_size = i64::try_from(geometry.record_byte_size).map_err(|_| {
            UephemError::corrupt(format!(
                "record size {} bytes is not addressable",
                geometry.record_byte_size
            ))
        })?;

        Ok(RecordLocator {
            source,
            byte_order: header.byte_order(),
            time_start: header.time_start(),
            record_span: header.record_span(),
            record_count: header.record_count(),
            geometry,
            record_byte_size,
            max_seek_offset: i64::MAX,
            record: CoefficientRecord::empty(geometry),
            raw: vec![0u8; geometry.coeffs_per_record * std::mem::size_of::<f64>()],
            cursor: None,
            loads: 0,
        })
    }

    /// Largest distance passed to a single relative seek.
    pub fn with_max_seek_offset(mut self, max_seek_offset: i64) -> Self {
        self.max_seek_offset = max_seek_offset.max(1);
        self
    }

    /// Record holding `jd`, clamped to the records present in the file so
    /// that `time_end` itself resolves to the last record.
    pub fn record_index(&self, jd: f64) -> u64 {
        let index = ((jd - self.time_start) / self.record_span).floor();
        // float to int casts saturate, negatives land on 0
        (index as u64).min(self.record_count - 1)
    }

    /// Make the record covering `jd` resident and return it.
    ///
    /// Repeated calls for dates in the resident record perform no I/O.
    ///
    /// Errors
    /// ----------
    /// * [`UephemError::FileRead`] if a seek fails or the record is short.
    ///   The resident record is invalidated in that case.
    pub fn locate(&mut self, jd: f64) -> Result<&CoefficientRecord> {
        let target = self.record_index(jd);
        if self.record.index == Some(target) {
            return Ok(&self.record);
        }
        self.load(target)?;
        Ok(&self.record)
    }

    fn load(&mut self, target: u64) -> Result<()> {
        let context = || format!("coefficient record {target}");

        // The stream position is unknown until this load completes.
        let cursor = self.cursor.take();
        self.record.index = None;

        let cursor = match cursor {
            Some(cursor) => cursor,
            None => {
                self.source
                    .seek(SeekFrom::Start(self.geometry.first_record_offset()))
                    .map_err(|e| UephemError::read(context(), e))?;
                0
            }
        };

        let records_to_skip = target as i64 - cursor as i64;
        let mut seeks = 0;
        for distance in seek_chunks(records_to_skip, self.record_byte_size, self.max_seek_offset) {
            self.source
                .seek(SeekFrom::Current(distance))
                .map_err(|e| UephemError::read(context(), e))?;
            seeks += 1;
        }

        self.source
            .read_exact(&mut self.raw)
            .map_err(|e| UephemError::read(context(), e))?;
        self.byte_order
            .decode_f64_slice(&self.raw, &mut self.record.coeffs);

        self.record.index = Some(target);
        self.cursor = Some(target + 1);
        self.loads += 1;

        trace!(
            record = target,
            skipped = records_to_skip,
            seeks,
            start = self.record.start_jd(),
            "loaded coefficient record"
        );
        Ok(())
    }

    /// Number of records read from the source so far.
    pub fn records_loaded(&self) -> usize {
        self.loads
    }

    /// The resident record, if any.
    pub fn current(&self) -> Option<&CoefficientRecord> {
        self.record.index.map(|_| &self.record)
    }

    /// Run `f` on the underlying source.
    ///
    /// The stream position is considered lost afterwards; the resident record
    /// stays valid and the next load starts from an absolute seek.
    pub(crate) fn with_source<T>(&mut self, f: impl FnOnce(&mut R) -> Result<T>) -> Result<T> {
        self.cursor = None;
        f(&mut self.source)
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}
