use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use uephem::{
    ephemeris_query::EphemerisQuery,
    jpl_ephem::horizon::{
        chebyshev::{chebyshev, chebyshev_derivative},
        horizon_data::HorizonData,
        horizon_ids::HorizonID,
    },
};

#[path = "../src/jpl_ephem/horizon/test_fixture.rs"]
mod test_fixture;

use test_fixture::DeFixture;

/// Geocentric Moon coefficients: DE440 uses 13 per component.
fn moon_like_coefficients() -> Vec<f64> {
    (0..13)
        .map(|k| 3.8e5 / ((k + 1) * (k + 1)) as f64 * if k % 2 == 0 { 1.0 } else { -1.0 })
        .collect()
}

/// Evenly spaced points covering the Chebyshev domain.
fn domain_points(n: usize) -> Vec<f64> {
    (0..n).map(|i| -1.0 + 2.0 * i as f64 / (n - 1) as f64).collect()
}

fn bench_value(c: &mut Criterion) {
    let coeffs = moon_like_coefficients();
    let points = domain_points(1024);

    c.bench_function("chebyshev/value_13_coeffs", |b| {
        b.iter(|| {
            for x in &points {
                black_box(chebyshev(black_box(&coeffs), *x));
            }
        })
    });
}

fn bench_derivative(c: &mut Criterion) {
    let coeffs = moon_like_coefficients();
    let points = domain_points(1024);

    c.bench_function("chebyshev/derivative_13_coeffs", |b| {
        b.iter(|| {
            for x in &points {
                black_box(chebyshev_derivative(black_box(&coeffs), *x));
            }
        })
    });
}

/// Sequential query over an in-memory file: one record read per 32 days.
fn bench_query(c: &mut Criterion) {
    let bytes = DeFixture::new(2440400.5, 2450000.5, 32.0).to_bytes();
    let query = EphemerisQuery::range(HorizonID::Moon, 2440400.5, 2450000.5, 10_000).unwrap();

    c.bench_function("query/moon_10000_samples", |b| {
        b.iter_batched(
            || HorizonData::from_reader(std::io::Cursor::new(bytes.clone())).unwrap(),
            |mut data| black_box(data.query(&query).unwrap()),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_value, bench_derivative, bench_query
);
criterion_main!(benches);
