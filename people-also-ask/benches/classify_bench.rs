//! Benchmarks for answer classification and extraction.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use people_also_ask::answer::{extract_answer, locate};
use people_also_ask::config::ExtractionConfig;
use people_also_ask::dom::Document;
use people_also_ask::testing::fixtures;

fn classify_benchmark(c: &mut Criterion) {
    let config = ExtractionConfig::default();

    for (_, html, shape) in fixtures::canonical() {
        let document = Document::parse(html);
        c.bench_function(&format!("locate/{shape}"), |b| {
            b.iter(|| locate(black_box(&document), &config).map(|(_, shape)| shape));
        });
    }

    c.bench_function("parse_and_extract/table", |b| {
        b.iter(|| {
            let document = Document::parse(black_box(fixtures::TABLE));
            extract_answer("world university rankings 2019", &document, &config)
        });
    });
}

criterion_group!(benches, classify_benchmark);
criterion_main!(benches);
