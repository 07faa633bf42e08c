mod common;

use std::io::{Cursor, Read, Seek, SeekFrom};

use uephem::jpl_ephem::horizon::{horizon_header::EphemerisHeader, horizon_records::RecordLocator};

use crate::common::{reference_fixture, RECORD_SPAN, TIME_START};

/// Byte source recording how many bytes were read and where seeks went.
#[derive(Default)]
struct Probe {
    bytes_read: usize,
    relative_seeks: Vec<i64>,
}

struct ProbedSource<'a> {
    inner: Cursor<Vec<u8>>,
    probe: &'a mut Probe,
}

impl Read for ProbedSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.probe.bytes_read += n;
        Ok(n)
    }
}

impl Seek for ProbedSource<'_> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        if let SeekFrom::Current(distance) = pos {
            self.probe.relative_seeks.push(distance);
        }
        self.inner.seek(pos)
    }
}

fn jd_in_record(index: u64, fraction: f64) -> f64 {
    TIME_START + (index as f64 + fraction) * RECORD_SPAN
}

#[test]
fn test_reads_only_when_record_changes() {
    let fixture = reference_fixture();
    let record_bytes = fixture.record_byte_size();
    let mut cursor = fixture.cursor();
    let header = EphemerisHeader::read(&mut cursor).unwrap();

    let mut probe = Probe::default();
    {
        let source = ProbedSource {
            inner: cursor,
            probe: &mut probe,
        };
        let mut locator = RecordLocator::new(source, &header).unwrap();

        let dates = [
            (jd_in_record(7, 0.1), 1),
            (jd_in_record(7, 0.9), 1),
            (jd_in_record(7, 0.0), 1),
            (jd_in_record(8, 0.0), 2),
            (jd_in_record(8, 0.5), 2),
            (jd_in_record(3, 0.5), 3),
        ];
        for (jd, expected_loads) in dates {
            locator.locate(jd).unwrap();
            assert_eq!(locator.records_loaded(), expected_loads, "jd {jd}");
        }
    }

    assert_eq!(probe.bytes_read, 3 * record_bytes);
    let size = record_bytes as i64;
    // 7 records skipped, then adjacent, then back from 9 to 3
    assert_eq!(probe.relative_seeks, vec![7 * size, -6 * size]);
}

#[test]
fn test_chunked_skip_total_distance() {
    let fixture = reference_fixture();
    let size = fixture.record_byte_size() as i64;
    let mut cursor = fixture.cursor();
    let header = EphemerisHeader::read(&mut cursor).unwrap();

    let mut probe = Probe::default();
    {
        let source = ProbedSource {
            inner: cursor,
            probe: &mut probe,
        };
        let mut locator = RecordLocator::new(source, &header)
            .unwrap()
            .with_max_seek_offset(7 * size + 1);

        let record = locator.locate(jd_in_record(290, 0.5)).unwrap();
        assert_eq!(record.index(), Some(290));
        assert_eq!(record.as_slice(), fixture.record(290).as_slice());
    }

    assert_eq!(probe.relative_seeks.iter().sum::<i64>(), 290 * size);
    assert!(probe.relative_seeks.iter().all(|d| *d <= 7 * size + 1));
    assert_eq!(probe.relative_seeks.len(), 42);
}
