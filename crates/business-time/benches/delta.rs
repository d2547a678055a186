//! Benchmarks for business-time deltas over increasing spans.

use business_time::{BusinessCalendar, CalendarOptions, UsFederalHolidays};
use chrono::{NaiveDate, TimeDelta};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn bench_business_time_delta(c: &mut Criterion) {
    let mut group = c.benchmark_group("business_time_delta");
    let cal = BusinessCalendar::with_holidays(CalendarOptions::default(), UsFederalHolidays)
        .expect("default options are valid");
    let start = NaiveDate::from_ymd_opt(2014, 1, 16)
        .and_then(|d| d.and_hms_opt(18, 30, 0))
        .expect("valid timestamp");

    for days in [1i64, 30, 365, 3650] {
        let end = start + TimeDelta::days(days);
        group.bench_with_input(BenchmarkId::new("us_federal", days), &end, |b, end| {
            b.iter(|| cal.business_time_delta(black_box(start), black_box(*end)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_business_time_delta);
criterion_main!(benches);
