use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lince_core::postings::intersect;
use lince_core::tokenizer::tokenize;

fn bench_tokenize(c: &mut Criterion) {
    let text = "La historia del gato doméstico, desde Egipto hasta 2024; ¡una crónica!\n".repeat(200);
    c.bench_function("tokenize_article", |b| b.iter(|| tokenize(black_box(&text))));
}

fn bench_intersect(c: &mut Criterion) {
    let p1: Vec<u32> = (0..100_000).step_by(2).collect();
    let p2: Vec<u32> = (0..100_000).step_by(3).collect();
    c.bench_function("intersect_100k", |b| {
        b.iter(|| intersect(black_box(&p1), black_box(&p2)))
    });
}

criterion_group!(benches, bench_tokenize, bench_intersect);
criterion_main!(benches);
