use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use presence::{Optional, Value};

pub fn criterion_benchmark(c: &mut Criterion) {
    let int = Value::Int(123);
    let text = Value::from("123");
    let float = Value::Float(123.0);
    let null = Value::Null;

    let mut wide = Optional::<i64>::empty();
    c.bench_function("scan i64 into i64 (fast path)", |b| {
        b.iter(|| wide.scan(black_box(int.clone())))
    });
    let mut narrow = Optional::<i8>::empty();
    c.bench_function("scan i64 into i8", |b| {
        b.iter(|| narrow.scan(black_box(int.clone())))
    });
    c.bench_function("scan text into i8", |b| {
        b.iter(|| narrow.scan(black_box(text.clone())))
    });
    c.bench_function("scan f64 into i8", |b| {
        b.iter(|| narrow.scan(black_box(float.clone())))
    });
    c.bench_function("scan null", |b| {
        b.iter(|| narrow.scan(black_box(null.clone())))
    });
    let mut pointer = Optional::<Option<i8>>::empty();
    c.bench_function("scan i64 into Option<i8>", |b| {
        b.iter(|| pointer.scan(black_box(int.clone())))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
