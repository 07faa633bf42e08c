//! In-memory DE binary files for tests.
//!
//! Only depends on `std` so integration tests can mount it with `#[path]`.
#![allow(dead_code)]

use std::io::Cursor;

const COMPONENTS: [usize; 15] = [3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 2, 3, 3, 1];

/// `(n_coeff, n_sub)` per item; item 13 is absent.
pub const DEFAULT_LAYOUT: [(i32, i32); 15] = [
    (6, 4),
    (6, 2),
    (6, 2),
    (6, 1),
    (6, 1),
    (6, 1),
    (6, 1),
    (6, 1),
    (6, 1),
    (6, 8),
    (6, 2),
    (6, 4),
    (6, 4),
    (0, 0),
    (6, 1),
];

/// Description of a synthetic DE file.
#[derive(Debug, Clone)]
pub struct DeFixture {
    pub titles: [String; 3],
    pub time_start: f64,
    pub time_end: f64,
    pub record_span: f64,
    pub au: f64,
    pub emrat: f64,
    pub de_number: i32,
    /// Write every word byte-reversed relative to the host.
    pub swap_bytes: bool,
    pub constants: Vec<(String, f64)>,
    pub layout: [(i32, i32); 15],
    /// Descriptor table written to the header instead of the one derived
    /// from `layout`.
    pub ipt_override: Option<[[i32; 3]; 15]>,
}

impl DeFixture {
    pub fn new(time_start: f64, time_end: f64, record_span: f64) -> Self {
        DeFixture {
            titles: [
                "JPL Planetary Ephemeris DE440/LE440".to_string(),
                "Start Epoch: JED=  2440400.5".to_string(),
                "Final Epoch: JED=  2450000.5".to_string(),
            ],
            time_start,
            time_end,
            record_span,
            au: 149597870.7,
            emrat: 81.30056822149722,
            de_number: 440,
            swap_bytes: false,
            constants: vec![
                ("DENUM".to_string(), 440.0),
                ("AU".to_string(), 149597870.7),
                ("EMRAT".to_string(), 81.30056822149722),
            ],
            layout: DEFAULT_LAYOUT,
            ipt_override: None,
        }
    }

    /// Descriptor table laid out contiguously after the two leading dates.
    pub fn ipt(&self) -> [[i32; 3]; 15] {
        let mut ipt = [[0; 3]; 15];
        let mut offset = 3;
        for (i, (n_coeff, n_sub)) in self.layout.iter().enumerate() {
            ipt[i] = [offset, *n_coeff, *n_sub];
            offset += n_coeff * n_sub * COMPONENTS[i] as i32;
        }
        ipt
    }

    pub fn coeffs_per_record(&self) -> usize {
        self.ipt()
            .iter()
            .enumerate()
            .map(|(i, [offset, n_coeff, n_sub])| {
                (offset + n_coeff * n_sub * COMPONENTS[i] as i32 - 1) as usize
            })
            .max()
            .unwrap_or(0)
    }

    pub fn record_byte_size(&self) -> usize {
        self.coeffs_per_record() * 8
    }

    pub fn record_count(&self) -> usize {
        if self.record_span > 0.0 {
            ((self.time_end - self.time_start) / self.record_span).round() as usize
        } else {
            0
        }
    }

    /// Coefficient `k` of one component in one sub-interval of one record.
    pub fn coefficient(&self, record: usize, item: usize, sub: usize, comp: usize, k: usize) -> f64 {
        let base = (record * 100 + item * 7 + sub * 3 + comp + 1) as f64;
        let sign = if (k + comp) % 2 == 0 { 1.0 } else { -1.0 };
        sign * base / ((k + 1) * (k + 1)) as f64
    }

    pub fn coefficients(&self, record: usize, item: usize, sub: usize, comp: usize) -> Vec<f64> {
        let n_coeff = self.layout[item].0 as usize;
        (0..n_coeff)
            .map(|k| self.coefficient(record, item, sub, comp, k))
            .collect()
    }

    /// Content of coefficient record `index` (0-based, after header and constants).
    pub fn record(&self, index: usize) -> Vec<f64> {
        let mut values = vec![0.0; self.coeffs_per_record()];
        values[0] = self.time_start + index as f64 * self.record_span;
        values[1] = values[0] + self.record_span;
        for (item, [offset, n_coeff, n_sub]) in self.ipt().iter().enumerate() {
            let (n_coeff, n_sub) = (*n_coeff as usize, *n_sub as usize);
            let ncomp = COMPONENTS[item];
            for sub in 0..n_sub {
                for comp in 0..ncomp {
                    for k in 0..n_coeff {
                        let at = *offset as usize - 1 + sub * n_coeff * ncomp + comp * n_coeff + k;
                        values[at] = self.coefficient(index, item, sub, comp, k);
                    }
                }
            }
        }
        values
    }

    /// Record, sub-interval, Chebyshev time and sub-interval length of `jd`
    /// for `item`, computed independently of the reader.
    pub fn locate(&self, item: usize, jd: f64) -> (usize, usize, f64, f64) {
        let count = self.record_count();
        let record = (((jd - self.time_start) / self.record_span).floor() as usize).min(count - 1);
        let record_start = self.time_start + record as f64 * self.record_span;
        let n_sub = self.layout[item].1 as usize;
        let duration = self.record_span / n_sub as f64;
        let sub = (((jd - record_start) / duration).floor() as usize).min(n_sub - 1);
        let t = (jd - (record_start + sub as f64 * duration)) / duration * 2.0 - 1.0;
        (record, sub, t, duration)
    }

    /// Reference value of every component of `item` at `jd`, using
    /// `T_k(t) = cos(k·acos t)`.
    pub fn expected_position(&self, item: usize, jd: f64) -> Vec<f64> {
        let (record, sub, t, _) = self.locate(item, jd);
        let theta = t.clamp(-1.0, 1.0).acos();
        (0..COMPONENTS[item])
            .map(|comp| {
                self.coefficients(record, item, sub, comp)
                    .iter()
                    .enumerate()
                    .map(|(k, c)| c * (k as f64 * theta).cos())
                    .sum()
            })
            .collect()
    }

    fn put(&self, out: &mut [u8], at: usize, bytes: &[u8]) {
        let dst = &mut out[at..at + bytes.len()];
        dst.copy_from_slice(bytes);
        if self.swap_bytes {
            dst.reverse();
        }
    }

    fn put_f64(&self, out: &mut [u8], at: usize, value: f64) {
        self.put(out, at, &value.to_ne_bytes());
    }

    fn put_i32(&self, out: &mut [u8], at: usize, value: i32) {
        self.put(out, at, &value.to_ne_bytes());
    }

    fn put_text(out: &mut [u8], at: usize, width: usize, text: &str) {
        let mut field = vec![b' '; width];
        let bytes = text.as_bytes();
        let n = bytes.len().min(width);
        field[..n].copy_from_slice(&bytes[..n]);
        out[at..at + width].copy_from_slice(&field);
    }

    /// Serialize the whole file.
    pub fn to_bytes(&self) -> Vec<u8> {
        let size = self.record_byte_size();
        let records = self.record_count();
        let mut out = vec![0u8; size * (2 + records)];
        let nconst = self.constants.len();
        let ipt = self.ipt_override.unwrap_or_else(|| self.ipt());

        assert!(0xB28 + nconst.saturating_sub(400) * 6 + 24 <= size, "header does not fit");
        assert!(nconst <= self.coeffs_per_record(), "constants do not fit");

        for (i, title) in self.titles.iter().enumerate() {
            Self::put_text(&mut out, i * 84, 84, title);
        }
        for (i, (name, _)) in self.constants.iter().take(400).enumerate() {
            Self::put_text(&mut out, 252 + i * 6, 6, name);
        }
        self.put_f64(&mut out, 0xA5C, self.time_start);
        self.put_f64(&mut out, 0xA64, self.time_end);
        self.put_f64(&mut out, 0xA6C, self.record_span);
        self.put_i32(&mut out, 0xA74, nconst as i32);
        self.put_f64(&mut out, 0xA78, self.au);
        self.put_f64(&mut out, 0xA80, self.emrat);
        for (i, value) in ipt[..12].iter().flatten().enumerate() {
            self.put_i32(&mut out, 0xA88 + i * 4, *value);
        }
        self.put_i32(&mut out, 0xB18, self.de_number);
        for (i, value) in ipt[12].iter().enumerate() {
            self.put_i32(&mut out, 0xB1C + i * 4, *value);
        }
        let mut at = 0xB28;
        for (name, _) in self.constants.iter().skip(400) {
            Self::put_text(&mut out, at, 6, name);
            at += 6;
        }
        for (i, value) in ipt[13..].iter().flatten().enumerate() {
            self.put_i32(&mut out, at + i * 4, *value);
        }

        for (i, (_, value)) in self.constants.iter().enumerate() {
            self.put_f64(&mut out, size + i * 8, *value);
        }

        for index in 0..records {
            let base = (2 + index) * size;
            for (i, value) in self.record(index).iter().enumerate() {
                self.put_f64(&mut out, base + i * 8, *value);
            }
        }

        out
    }

    pub fn cursor(&self) -> Cursor<Vec<u8>> {
        Cursor::new(self.to_bytes())
    }
}
