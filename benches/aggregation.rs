use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use station_summary::app::services::aggregator::{Aggregator, StationTable};
use station_summary::app::services::line_parser::{ParseOptions, parse_line};
use station_summary::app::services::reporter::{Report, ReportFormat};

const STATIONS: &[&str] = &[
    "Abha", "Accra", "Bangkok", "Berlin", "Hamburg", "Lima", "Melbourne", "Nuuk",
    "San Francisco", "São Paulo", "Thiruvananthapuram", "Tokyo", "Zürich",
];

/// Deterministic synthetic input of `rows` lines
fn synthetic_input(rows: usize) -> String {
    let mut input = String::with_capacity(rows * 16);
    input.push_str("# synthetic measurements\n");
    for i in 0..rows {
        let station = STATIONS[(i * 7) % STATIONS.len()];
        let tenths = ((i * 37) % 1999) as i64 - 999;
        input.push_str(&format!("{};{:.1}\n", station, tenths as f64 / 10.0));
    }
    input
}

fn bench_parse_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_line");
    let options = ParseOptions::default();

    for line in ["Xi;3.4", "Berlin;12.3", "Thiruvananthapuram;-31.2", "# comment"] {
        group.throughput(Throughput::Bytes(line.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(line), line, |b, line| {
            b.iter(|| parse_line(black_box(line), &options))
        });
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let aggregator = Aggregator::new(ParseOptions::default());

    for rows in [10_000usize, 100_000] {
        let input = synthetic_input(rows);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &input, |b, input| {
            b.iter(|| aggregator.aggregate(black_box(input.as_bytes())).unwrap())
        });
    }

    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let mut table = StationTable::new();
    for (i, station) in STATIONS.iter().cycle().take(10_000).enumerate() {
        table.upsert(station, (i % 100) as f32 / 10.0);
    }

    c.bench_function("report_braced", |b| {
        b.iter(|| {
            Report::from_table(black_box(&table))
                .render(ReportFormat::Braced)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_parse_line, bench_aggregate, bench_report);
criterion_main!(benches);
