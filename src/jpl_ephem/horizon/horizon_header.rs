//! Header record of a legacy DE binary file.
//!
//! The first record of a DE file holds, at fixed offsets, the time coverage
//! of the file, the number of constants and the item descriptor table
//! (historically called `IPT`). This module reads that region once and
//! produces an immutable [`EphemerisHeader`], together with the
//! [`RecordGeometry`] shared by every coefficient record of the file.
//!
//! Layout of the fixed region (byte offsets):
//!
//! ```text
//! 0x000  3 × CHAR*84     title lines
//! 0x0FC  400 × CHAR*6    constant names (first 400)
//! 0xA5C  3 × f64         time_start, time_end, record_span
//! 0xA74  i32             number of constants (NCON)
//! 0xA78  f64             astronomical unit (km)
//! 0xA80  f64             Earth/Moon mass ratio
//! 0xA88  12 × 3 × i32    item descriptors 0..=11
//! 0xB18  i32             DE number (byte order sentinel)
//! 0xB1C  3 × i32         item descriptor 12
//! 0xB28  (NCON-400) × CHAR*6   overflow constant names, only if NCON > 400
//!        2 × 3 × i32     item descriptors 13 and 14
//! ```
use std::{
    fmt,
    io::{Read, Seek, SeekFrom},
};

use nom::{bytes::complete::take, multi::count, number::Endianness, IResult, Parser};
use tracing::{debug, warn};

use crate::{
    constants::{
        CONSTANT_NAME_LENGTH, DOUBLE_SIZE, ITEM_COMPONENTS, ITEM_COUNT, LEADING_RECORDS,
        MAX_NCONST, OFFSET_DENUM, OFFSET_HEADER_END, TABLE1_ITEMS, TITLE_COUNT, TITLE_LENGTH,
    },
    uephem_errors::{Result, UephemError},
};

use super::{
    byte_order::{infer_byte_order, word_f64, word_i32, ByteOrder},
    horizon_ids::HorizonID,
    horizon_version::JPLHorizonVersion,
};

/// Raw descriptor table as stored in the file: `[offset, n_coeff, n_sub]`
/// for each of the 15 items.
pub type IPT = [[i32; 3]; ITEM_COUNT];

/// Location and shape of one item's coefficients inside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemDescriptor {
    /// 1-based position of the item's first coefficient in the record.
    pub coeff_offset: usize,
    /// Chebyshev coefficients per component and sub-interval.
    pub coeffs_per_component: usize,
    /// Sub-intervals per record; zero when the file has no data for the item.
    pub subintervals_per_record: usize,
    /// Vector components, from the format table.
    pub component_count: usize,
}

impl ItemDescriptor {
    fn from_raw(index: usize, raw: [i32; 3]) -> Result<Self> {
        let field = |value: i32, name: &str| {
            usize::try_from(value).map_err(|_| {
                UephemError::corrupt(format!("item {index}: negative {name} ({value})"))
            })
        };

        let descriptor = ItemDescriptor {
            coeff_offset: field(raw[0], "coefficient offset")?,
            coeffs_per_component: field(raw[1], "coefficient count")?,
            subintervals_per_record: field(raw[2], "sub-interval count")?,
            component_count: ITEM_COMPONENTS[index],
        };

        if descriptor.is_present()
            && (descriptor.coeff_offset == 0 || descriptor.coeffs_per_component == 0)
        {
            return Err(UephemError::corrupt(format!(
                "item {index}: descriptor {raw:?} has sub-intervals but no coefficients"
            )));
        }

        Ok(descriptor)
    }

    /// Whether the file carries coefficients for this item.
    pub fn is_present(&self) -> bool {
        self.subintervals_per_record > 0
    }

    /// Coefficients stored for one sub-interval (all components).
    pub fn coeffs_per_subinterval(&self) -> usize {
        self.coeffs_per_component * self.component_count
    }

    /// 1-based position of the last coefficient of this item in a record.
    ///
    /// For an absent item this is `coeff_offset - 1`, which never exceeds the
    /// extent of the present ones. `None` when the extent overflows `usize`.
    pub fn last_coefficient(&self) -> Option<usize> {
        let extent = self
            .coeffs_per_component
            .checked_mul(self.component_count)?
            .checked_mul(self.subintervals_per_record)?;
        Some(self.coeff_offset.checked_add(extent)?.saturating_sub(1))
    }
}

/// Size of the fixed-length coefficient records, identical for the whole file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordGeometry {
    /// Doubles per record, including the leading start/end Julian Dates.
    pub coeffs_per_record: usize,
    /// `coeffs_per_record * 8`
    pub record_byte_size: u64,
}

impl RecordGeometry {
    /// Derive the record size from the item table: the largest extent of any item.
    pub fn from_items(items: &[ItemDescriptor; ITEM_COUNT]) -> Result<Self> {
        let mut coeffs_per_record = 0;
        for (index, item) in items.iter().enumerate() {
            let last = item.last_coefficient().ok_or_else(|| {
                UephemError::corrupt(format!("item {index}: coefficient extent overflows"))
            })?;
            coeffs_per_record = coeffs_per_record.max(last);
        }

        // start and end Julian Dates at least
        if coeffs_per_record < 2 {
            return Err(UephemError::corrupt(format!(
                "item table describes {coeffs_per_record} coefficients per record"
            )));
        }

        let record_byte_size = coeffs_per_record
            .checked_mul(DOUBLE_SIZE)
            .and_then(|bytes| u64::try_from(bytes).ok())
            .filter(|bytes| bytes.checked_mul(LEADING_RECORDS + 1).is_some())
            .ok_or_else(|| {
                UephemError::corrupt(format!(
                    "record of {coeffs_per_record} coefficients overflows"
                ))
            })?;

        Ok(RecordGeometry {
            coeffs_per_record,
            record_byte_size,
        })
    }

    /// Byte offset of the first coefficient record (after header and constants).
    pub fn first_record_offset(&self) -> u64 {
        LEADING_RECORDS * self.record_byte_size
    }
}

/// Decoded header of a DE binary file.
///
/// Built once per file by [`EphemerisHeader::read`]; never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisHeader {
    titles: Vec<String>,
    de_number: i32,
    byte_order: ByteOrder,
    time_start: f64,
    time_end: f64,
    record_span: f64,
    au_km: f64,
    earth_moon_mass_ratio: f64,
    constant_count: usize,
    ipt: IPT,
    items: [ItemDescriptor; ITEM_COUNT],
    geometry: RecordGeometry,
}

/// Values read from the fixed region, before validation.
struct FixedRegion {
    titles: Vec<String>,
    time: Vec<f64>,
    nconst: i32,
    au_km: f64,
    earth_moon_mass_ratio: f64,
    table1: Vec<i32>,
    de_number: i32,
    table2: Vec<i32>,
}

/// Parse a fixed-width, space padded FORTRAN string.
pub(crate) fn parse_text(len: usize) -> impl Fn(&[u8]) -> IResult<&[u8], String> {
    move |input| {
        let (rest, raw) = take(len)(input)?;
        Ok((rest, String::from_utf8_lossy(raw).trim_end().to_string()))
    }
}

/// Parse the region `[0, 0xB28)` of the header record.
fn parse_fixed_region(input: &[u8], order: Endianness) -> IResult<&[u8], FixedRegion> {
    let (input, titles) = count(parse_text(TITLE_LENGTH), TITLE_COUNT).parse(input)?;
    let (input, _names) = take(MAX_NCONST * CONSTANT_NAME_LENGTH)(input)?;
    let (input, time) = count(word_f64(order), 3).parse(input)?;
    let (input, nconst) = word_i32(order)(input)?;
    let (input, au_km) = word_f64(order)(input)?;
    let (input, earth_moon_mass_ratio) = word_f64(order)(input)?;
    let (input, table1) = count(word_i32(order), TABLE1_ITEMS * 3).parse(input)?;
    let (input, de_number) = word_i32(order)(input)?;
    let (input, table2) = count(word_i32(order), 3).parse(input)?;

    Ok((
        input,
        FixedRegion {
            titles,
            time,
            nconst,
            au_km,
            earth_moon_mass_ratio,
            table1,
            de_number,
            table2,
        },
    ))
}

/// Parse the descriptors of items 13 and 14.
fn parse_ipt_13_14(input: &[u8], order: Endianness) -> IResult<&[u8], Vec<i32>> {
    count(word_i32(order), 6).parse(input)
}

pub(crate) fn malformed(what: &str) -> impl Fn(nom::Err<nom::error::Error<&[u8]>>) -> UephemError + '_ {
    move |e| UephemError::corrupt(format!("malformed {what}: {:?}", e.map(|e| e.code)))
}

impl EphemerisHeader {
    /// Read and validate the header of a DE file.
    ///
    /// The byte order is inferred first from the DE number word; every later
    /// field is decoded in that order. No partially decoded header is ever
    /// returned: any short read or inconsistent field is a
    /// [`UephemError::FileRead`].
    ///
    /// Arguments
    /// -----------------
    /// * `source` — Random-access byte source positioned anywhere.
    ///
    /// Return
    /// ----------
    /// * The decoded header. On return the source is positioned right after
    ///   the descriptors of items 13 and 14.
    ///
    /// A geometry whose first coefficient record does not fit in the source
    /// is rejected before anything is sized from it.
    pub fn read<R: Read + Seek>(source: &mut R) -> Result<Self> {
        let source_len = source
            .seek(SeekFrom::End(0))
            .map_err(|e| UephemError::read("source length", e))?;

        let mut fixed = vec![0u8; OFFSET_HEADER_END];
        source
            .seek(SeekFrom::Start(0))
            .and_then(|_| source.read_exact(&mut fixed))
            .map_err(|e| UephemError::read("header record", e))?;

        let mut version_word = [0u8; 4];
        version_word.copy_from_slice(&fixed[OFFSET_DENUM..OFFSET_DENUM + 4]);
        let byte_order = infer_byte_order(u32::from_ne_bytes(version_word));
        if byte_order == ByteOrder::Swapped {
            warn!("DE number word has its upper half set, reading file with swapped byte order");
        }
        let order = byte_order.endianness();

        let (_, region) =
            parse_fixed_region(&fixed, order).map_err(malformed("header record"))?;

        let constant_count = usize::try_from(region.nconst).map_err(|_| {
            UephemError::corrupt(format!("negative constant count ({})", region.nconst))
        })?;

        // Later formats moved the names beyond the 400th out of the fixed layout.
        if constant_count > MAX_NCONST {
            let skip = ((constant_count - MAX_NCONST) * CONSTANT_NAME_LENGTH) as i64;
            source
                .seek(SeekFrom::Current(skip))
                .map_err(|e| UephemError::read("overflow constant names", e))?;
        }

        let mut extra = [0u8; 6 * 4];
        source
            .read_exact(&mut extra)
            .map_err(|e| UephemError::read("item descriptors 13-14", e))?;
        let (_, table3) =
            parse_ipt_13_14(&extra, order).map_err(malformed("item descriptors 13-14"))?;

        let mut ipt: IPT = [[0; 3]; ITEM_COUNT];
        let raw = region.table1.iter().chain(&region.table2).chain(&table3);
        for (i, value) in raw.enumerate() {
            ipt[i / 3][i % 3] = *value;
        }

        let header = Self::from_parts(
            region.titles,
            region.de_number,
            byte_order,
            [region.time[0], region.time[1], region.time[2]],
            region.au_km,
            region.earth_moon_mass_ratio,
            constant_count,
            ipt,
        )?;

        let geometry = header.geometry;
        let first_record_end = geometry.first_record_offset() + geometry.record_byte_size;
        if first_record_end > source_len {
            return Err(UephemError::corrupt(format!(
                "records of {} bytes do not fit in a {source_len} byte file",
                geometry.record_byte_size
            )));
        }

        debug!(
            version = %header.version_label(),
            start = header.time_start,
            end = header.time_end,
            span = header.record_span,
            record_bytes = header.geometry.record_byte_size,
            ?byte_order,
            "parsed DE header"
        );

        Ok(header)
    }

    /// Validate decoded values and derive the record geometry.
    #[allow(clippy::too_many_arguments)]
    fn from_parts(
        titles: Vec<String>,
        de_number: i32,
        byte_order: ByteOrder,
        time: [f64; 3],
        au_km: f64,
        earth_moon_mass_ratio: f64,
        constant_count: usize,
        ipt: IPT,
    ) -> Result<Self> {
        let [time_start, time_end, record_span] = time;

        if !(time_start.is_finite() && time_end.is_finite() && time_start <= time_end) {
            return Err(UephemError::corrupt(format!(
                "invalid time coverage [{time_start}, {time_end}]"
            )));
        }
        if !(record_span.is_finite() && record_span > 0.0) {
            return Err(UephemError::corrupt(format!(
                "invalid record span {record_span}"
            )));
        }

        let mut items = [ItemDescriptor {
            coeff_offset: 0,
            coeffs_per_component: 0,
            subintervals_per_record: 0,
            component_count: 0,
        }; ITEM_COUNT];
        for (index, raw) in ipt.iter().enumerate() {
            items[index] = ItemDescriptor::from_raw(index, *raw)?;
        }
        let geometry = RecordGeometry::from_items(&items)?;

        Ok(EphemerisHeader {
            titles,
            de_number,
            byte_order,
            time_start,
            time_end,
            record_span,
            au_km,
            earth_moon_mass_ratio,
            constant_count,
            ipt,
            items,
            geometry,
        })
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn de_number(&self) -> i32 {
        self.de_number
    }

    /// Known DE solution for this file, if any.
    pub fn version(&self) -> Option<JPLHorizonVersion> {
        JPLHorizonVersion::from_de_number(self.de_number)
    }

    /// `DE<n>` label, also for unknown numbers.
    pub fn version_label(&self) -> String {
        self.version()
            .map(|v| v.to_string())
            .unwrap_or_else(|| format!("DE{}", self.de_number))
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn time_start(&self) -> f64 {
        self.time_start
    }

    pub fn time_end(&self) -> f64 {
        self.time_end
    }

    /// Julian days covered by one record.
    pub fn record_span(&self) -> f64 {
        self.record_span
    }

    pub fn au_km(&self) -> f64 {
        self.au_km
    }

    pub fn earth_moon_mass_ratio(&self) -> f64 {
        self.earth_moon_mass_ratio
    }

    pub fn constant_count(&self) -> usize {
        self.constant_count
    }

    /// The descriptor table exactly as stored.
    pub fn ipt(&self) -> &IPT {
        &self.ipt
    }

    pub fn items(&self) -> &[ItemDescriptor; ITEM_COUNT] {
        &self.items
    }

    pub fn item(&self, id: HorizonID) -> &ItemDescriptor {
        &self.items[id.index()]
    }

    pub fn geometry(&self) -> RecordGeometry {
        self.geometry
    }

    /// Number of coefficient records covering `[time_start, time_end]`.
    pub fn record_count(&self) -> u64 {
        let count = ((self.time_end - self.time_start) / self.record_span).round();
        if count < 1.0 {
            1
        } else {
            count as u64
        }
    }

    /// Whether `jd` lies inside the file coverage (bounds included).
    pub fn covers(&self, jd: f64) -> bool {
        (self.time_start..=self.time_end).contains(&jd)
    }

    /// [`UephemError::DateOutOfRange`] unless the file covers `jd`.
    pub fn check_date(&self, jd: f64) -> Result<()> {
        if self.covers(jd) {
            Ok(())
        } else {
            Err(UephemError::DateOutOfRange {
                jd,
                start: self.time_start,
                end: self.time_end,
            })
        }
    }
}

const LABEL_WIDTH: usize = 18;
const VALUE_WIDTH: usize = 50;

/// One `| label | value |` line, both cells truncated to their width.
fn write_row(f: &mut fmt::Formatter<'_>, label: &str, value: &str) -> fmt::Result {
    let label: String = label.chars().take(LABEL_WIDTH).collect();
    let value: String = value.chars().take(VALUE_WIDTH).collect();
    writeln!(
        f,
        "| {:<label_w$}| {:<value_w$}|",
        label,
        value,
        label_w = LABEL_WIDTH,
        value_w = VALUE_WIDTH
    )
}

impl fmt::Display for EphemerisHeader {
    /// Render a fixed-width table summarizing the header.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = LABEL_WIDTH + 1,
            value = VALUE_WIDTH + 1
        );

        writeln!(f, "{border}")?;
        write_row(f, "DE Ephemeris", &self.version_label())?;
        writeln!(f, "{border}")?;
        for title in self.titles.iter().filter(|t| !t.is_empty()) {
            write_row(f, "Title", title)?;
        }
        write_row(f, "Start (JD)", &self.time_start.to_string())?;
        write_row(f, "End (JD)", &self.time_end.to_string())?;
        write_row(f, "Record span", &format!("{} days", self.record_span))?;
        write_row(
            f,
            "Record size",
            &format!(
                "{} doubles ({} bytes)",
                self.geometry.coeffs_per_record, self.geometry.record_byte_size
            ),
        )?;
        write_row(f, "Constants", &self.constant_count.to_string())?;
        write_row(f, "Byte order", &format!("{:?}", self.byte_order))?;
        writeln!(f, "{border}")?;
        for id in HorizonID::ALL {
            let item = self.item(id);
            let value = if item.is_present() {
                format!(
                    "offset {} / {} coeffs / {} sub-intervals",
                    item.coeff_offset, item.coeffs_per_component, item.subintervals_per_record
                )
            } else {
                "absent".to_string()
            };
            write_row(f, &format!("{id:?}"), &value)?;
        }
        writeln!(f, "{border}")
    }
}
