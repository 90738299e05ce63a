//! Benchmarks for calculator evaluation.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hexlens::buffer::Buffer;
use hexlens::calc::{evaluate, parse};

fn bench_evaluate_literals(c: &mut Criterion) {
    let buffer = Buffer::from_bytes(Vec::new());
    let text = "(0x1234 + 0n99) * 0b1011 << 3 | ~0 & 7f";
    c.bench_function("evaluate_literals", |b| {
        b.iter(|| evaluate(&buffer, black_box(text)))
    });
}

fn bench_evaluate_reads(c: &mut Criterion) {
    let data: Vec<u8> = (0..=255_u8).cycle().take(4096).collect();
    let mut buffer = Buffer::from_bytes(data);
    buffer.set_cursor(100);
    let text = "@l ^ #L + @i * #s - (@b >> 2)";
    c.bench_function("evaluate_reads", |b| {
        b.iter(|| evaluate(&buffer, black_box(text)))
    });
}

fn bench_parse_nested(c: &mut Criterion) {
    let text = format!("{}1{}", "(".repeat(64), " + 1)".repeat(64));
    c.bench_function("parse_nested", |b| b.iter(|| parse(black_box(&text))));
}

criterion_group!(
    benches,
    bench_evaluate_literals,
    bench_evaluate_reads,
    bench_parse_nested
);
criterion_main!(benches);
