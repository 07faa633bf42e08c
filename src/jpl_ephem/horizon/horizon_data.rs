//! Interpolation of DE items at arbitrary Julian Dates.
//!
//! [`HorizonData`] ties together the decoded header and the
//! [`RecordLocator`]: for each requested date it makes the right record
//! resident, picks the sub-interval, remaps the date to the Chebyshev domain
//! and evaluates every component of the item.
use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
};

use camino::Utf8Path;
use nom::{multi::count, Parser};
use tracing::debug;

use crate::{
    constants::{
        CONSTANT_NAME_LENGTH, DOUBLE_SIZE, MAX_NCONST, OFFSET_CONSTANT_NAMES, OFFSET_HEADER_END,
    },
    ephemeris_query::EphemerisQuery,
    uephem_errors::{Result, UephemError},
};

use super::{
    chebyshev::{chebyshev, chebyshev_derivative},
    horizon_header::{malformed, parse_text, EphemerisHeader, ItemDescriptor},
    horizon_ids::HorizonID,
    horizon_records::RecordLocator,
    interpolation_result::{Components, InterpResult},
};

/// Tunables for reading a DE file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizonOptions {
    /// Largest byte distance handed to one relative seek. Longer moves are
    /// split into several seeks of whole records.
    pub max_seek_offset: i64,
}

impl Default for HorizonOptions {
    fn default() -> Self {
        HorizonOptions {
            max_seek_offset: i64::MAX,
        }
    }
}

/// Named constant stored in the second record of the file.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisConstant {
    pub name: String,
    pub value: f64,
}

/// An open DE file: its header and the one resident coefficient record.
///
/// The byte source is owned for the lifetime of the value and released when
/// it is dropped, whatever the outcome of the queries made on it.
#[derive(Debug)]
pub struct HorizonData<R> {
    header: EphemerisHeader,
    locator: RecordLocator<R>,
}

impl HorizonData<BufReader<File>> {
    /// Open a DE binary file from disk with default options.
    ///
    /// Errors
    /// ----------
    /// * [`UephemError::FileOpen`] if the file cannot be opened.
    /// * [`UephemError::FileRead`] if its header cannot be decoded.
    pub fn open(path: impl AsRef<Utf8Path>) -> Result<Self> {
        Self::open_with_options(path, HorizonOptions::default())
    }

    pub fn open_with_options(path: impl AsRef<Utf8Path>, options: HorizonOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| UephemError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader_with_options(BufReader::new(file), options)
    }
}

impl<R: Read + Seek> HorizonData<R> {
    pub fn from_reader(source: R) -> Result<Self> {
        Self::from_reader_with_options(source, HorizonOptions::default())
    }

    /// Decode the header of `source` and prepare the record locator.
    pub fn from_reader_with_options(mut source: R, options: HorizonOptions) -> Result<Self> {
        let header = EphemerisHeader::read(&mut source)?;
        let locator =
            RecordLocator::new(source, &header)?.with_max_seek_offset(options.max_seek_offset);
        Ok(HorizonData { header, locator })
    }

    pub fn header(&self) -> &EphemerisHeader {
        &self.header
    }

    /// Coefficient records read since the file was opened.
    pub fn records_loaded(&self) -> usize {
        self.locator.records_loaded()
    }

    /// Descriptor of `id`, or [`UephemError::ItemNotFound`] when the file
    /// carries no coefficients for it.
    pub fn item(&self, id: HorizonID) -> Result<&ItemDescriptor> {
        let item = self.header.item(id);
        if item.is_present() {
            Ok(item)
        } else {
            Err(UephemError::ItemNotFound {
                item_id: id.index() as i64,
                reason: "no data in this file",
            })
        }
    }

    /// Evaluate every component of `id` at `jd`.
    ///
    /// Arguments
    /// -----------------
    /// * `id` — Item to evaluate.
    /// * `jd` — Julian Date inside `[time_start, time_end]`.
    ///
    /// Return
    /// ----------
    /// * The values of each component and, unless the item has no derivative,
    ///   their rates per day. `jd == time_end` is evaluated at the end of the
    ///   last sub-interval of the last record.
    ///
    /// Errors
    /// ----------
    /// * [`UephemError::DateOutOfRange`], [`UephemError::ItemNotFound`],
    ///   or [`UephemError::FileRead`] when the record cannot be read or the
    ///   item table points outside it.
    pub fn interpolate(&mut self, id: HorizonID, jd: f64) -> Result<InterpResult> {
        self.header.check_date(jd)?;
        let item = *self.item(id)?;
        let record = self.locator.locate(jd)?;

        let n_sub = item.subintervals_per_record;
        let n_coeff = item.coeffs_per_component;
        let duration = self.header.record_span() / n_sub as f64;

        let sub = (((jd - record.start_jd()) / duration).floor() as usize).min(n_sub - 1);
        let sub_start = record.start_jd() + sub as f64 * duration;
        let t = (jd - sub_start) / duration * 2.0 - 1.0;

        let base = item.coeff_offset - 1 + sub * item.coeffs_per_subinterval();
        let mut position = Components::new();
        let mut velocity = id.has_derivative().then(Components::new);
        for component in 0..item.component_count {
            let coeffs = record.coefficients(base + component * n_coeff, n_coeff)?;
            position.push(chebyshev(coeffs, t));
            if let Some(velocity) = velocity.as_mut() {
                // d/djd = d/dt · dt/djd
                velocity.push(chebyshev_derivative(coeffs, t) / duration * 2.0);
            }
        }

        Ok(InterpResult {
            jd,
            position,
            velocity,
        })
    }

    /// Evaluate `query` and hand every sample to `sink`, in order.
    ///
    /// The item and both ends of the range are validated before any record
    /// is read. A sample reaches `sink` only once it is complete; the first
    /// error stops the evaluation.
    ///
    /// Return
    /// ----------
    /// * The number of samples delivered.
    pub fn evaluate_query<F, E>(
        &mut self,
        query: &EphemerisQuery,
        mut sink: F,
    ) -> std::result::Result<usize, E>
    where
        F: FnMut(InterpResult) -> std::result::Result<(), E>,
        E: From<UephemError>,
    {
        self.item(query.item)?;
        self.header.check_date(query.start_jd)?;
        self.header.check_date(query.end_jd)?;

        debug!(
            item = ?query.item,
            samples = query.sample_count(),
            start = query.start_jd,
            end = query.end_jd,
            "evaluating query"
        );

        let mut delivered = 0;
        for jd in query.sample_times() {
            let sample = self.interpolate(query.item, jd)?;
            sink(sample)?;
            delivered += 1;
        }
        Ok(delivered)
    }

    /// Evaluate `query` and collect its samples.
    pub fn query(&mut self, query: &EphemerisQuery) -> Result<Vec<InterpResult>> {
        let mut samples = Vec::with_capacity(query.sample_count());
        self.evaluate_query(query, |sample| {
            samples.push(sample);
            Ok::<(), UephemError>(())
        })?;
        Ok(samples)
    }

    /// Named constants of the file.
    ///
    /// Names come from the header (and the overflow table when there are more
    /// than 400), values from the record following the header. The resident
    /// coefficient record is left untouched.
    pub fn constants(&mut self) -> Result<Vec<EphemerisConstant>> {
        let total = self.header.constant_count();
        let geometry = self.header.geometry();
        if total > geometry.coeffs_per_record {
            return Err(UephemError::corrupt(format!(
                "{total} constants do not fit in a record of {} doubles",
                geometry.coeffs_per_record
            )));
        }

        let in_header = total.min(MAX_NCONST);
        let mut names = vec![0u8; total * CONSTANT_NAME_LENGTH];
        let mut values = vec![0u8; total * DOUBLE_SIZE];

        self.locator.with_source(|source| {
            let (fixed, overflow) = names.split_at_mut(in_header * CONSTANT_NAME_LENGTH);
            source
                .seek(SeekFrom::Start(OFFSET_CONSTANT_NAMES as u64))
                .and_then(|_| source.read_exact(fixed))
                .map_err(|e| UephemError::read("constant names", e))?;
            if !overflow.is_empty() {
                source
                    .seek(SeekFrom::Start(OFFSET_HEADER_END as u64))
                    .and_then(|_| source.read_exact(overflow))
                    .map_err(|e| UephemError::read("overflow constant names", e))?;
            }
            source
                .seek(SeekFrom::Start(geometry.record_byte_size))
                .and_then(|_| source.read_exact(&mut values))
                .map_err(|e| UephemError::read("constant values", e))
        })?;

        let (_, names) = count(parse_text(CONSTANT_NAME_LENGTH), total)
            .parse(names.as_slice())
            .map_err(malformed("constant names"))?;
        let mut decoded = vec![0.0; total];
        self.header
            .byte_order()
            .decode_f64_slice(&values, &mut decoded);

        debug!(count = total, "read constant table");

        Ok(names
            .into_iter()
            .zip(decoded)
            .map(|(name, value)| EphemerisConstant { name, value })
            .collect())
    }

    /// Give the byte source back.
    pub fn into_inner(self) -> R {
        self.locator.into_inner()
    }
}
