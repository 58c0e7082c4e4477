use std::time::Duration;

use criterion::measurement::WallTime;
use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion,
};
use mono_dump::LabelTable;
use serde_json::{json, Map, Value};

fn enemy_table(rows: usize) -> Value {
    let mut root = Map::new();
    for id in 0..rows {
        root.insert(
            id.to_string(),
            json!({
                "_Id": id + 1000,
                "_Name": format!("ENEMY_NAME_{id}"),
                "_Scale": 1.0 + id as f64 / 8.0,
                "_IsBoss": id % 7 == 0,
                "_Drops": [id, id + 1, id + 2],
                "0": {"_Phase": 1, "_Pattern": format!("PATTERN_{id}")},
            }),
        );
    }
    Value::Object(root)
}

fn labels(rows: usize) -> LabelTable {
    (0..rows)
        .map(|id| (format!("ENEMY_NAME_{id}"), format!("Enemy #{id}")))
        .collect()
}

fn bench_parse(
    group: &mut BenchmarkGroup<'_, WallTime>,
    name: &str,
    dump: &str,
    labels: &LabelTable,
) {
    group.throughput(criterion::Throughput::Bytes(dump.len() as u64));
    group.bench_function(BenchmarkId::new("plain", name), |b| {
        b.iter(|| {
            let value = mono_dump::parse_str(black_box(dump)).unwrap();
            black_box(value);
        });
    });
    group.bench_function(BenchmarkId::new("labels", name), |b| {
        b.iter(|| {
            let value = mono_dump::parse_str_with_labels(black_box(dump), labels).unwrap();
            black_box(value);
        });
    });
}

fn bench_pairs(group: &mut BenchmarkGroup<'_, WallTime>, name: &str, dump: &str) {
    group.throughput(criterion::Throughput::Bytes(dump.len() as u64));
    group.bench_function(BenchmarkId::new("pairs", name), |b| {
        b.iter(|| {
            let pairs = mono_dump::parse_pairs(black_box(dump).lines()).unwrap();
            black_box(pairs);
        });
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut parse = c.benchmark_group("parse");
    for rows in [100, 10_000] {
        let dump = mono_dump::to_dump_string(&enemy_table(rows)).unwrap();
        let name = format!("enemies_{rows}");
        bench_parse(&mut parse, &name, &dump, &labels(rows));
        bench_pairs(&mut parse, &name, &dump);
    }
    parse.finish();
}

fn criterion_config() -> Criterion {
    if std::env::var("MONO_BENCH_MINIMAL").is_ok() {
        Criterion::default()
            .warm_up_time(Duration::from_secs(0))
            .measurement_time(Duration::from_millis(10))
            .sample_size(1)
            .nresamples(1)
    } else {
        Criterion::default()
    }
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = criterion_benchmark
}
criterion_main!(benches);
