//! CSV rendering of samples and constants.
//!
//! Rows carry no header line. Julian Dates are printed with 17 decimals and
//! every value in scientific notation with 17 digits after the point, enough
//! to round-trip any `f64`. Exponents are written with an explicit sign and
//! at least two digits (`e+00`, `e-03`), the form C's `%e` produces.
use std::io::Write;

use crate::jpl_ephem::horizon::interpolation_result::InterpResult;

/// `{:.17e}` with a C-style exponent.
fn scientific(value: f64) -> String {
    let text = format!("{value:.17e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

/// Writes one CSV row per sample: `jd, values..., [rates...]`.
pub struct SampleWriter<W: Write> {
    writer: csv::Writer<W>,
    fields: Vec<String>,
}

impl<W: Write> SampleWriter<W> {
    pub fn new(inner: W) -> Self {
        SampleWriter {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(inner),
            fields: Vec::with_capacity(7),
        }
    }

    pub fn write_sample(&mut self, sample: &InterpResult) -> csv::Result<()> {
        self.fields.clear();
        self.fields.push(format!("{:.17}", sample.jd));
        let rates = sample.velocity.iter().flatten();
        for value in sample.position.iter().chain(rates) {
            self.fields.push(scientific(*value));
        }
        self.writer.write_record(&self.fields)
    }

    /// `name, value` row of the constant table.
    pub fn write_constant(&mut self, name: &str, value: f64) -> csv::Result<()> {
        let value = scientific(value);
        self.writer.write_record([name, value.as_str()])
    }

    pub fn flush(&mut self) -> csv::Result<()> {
        self.writer.flush().map_err(csv::Error::from)
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> csv::Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}
