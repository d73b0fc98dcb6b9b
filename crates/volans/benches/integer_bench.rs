use criterion::{black_box, criterion_group, criterion_main, Criterion};
use volans::Integer;

fn bench_inline_arithmetic(c: &mut Criterion) {
    c.bench_function("integer_inline_add", |b| {
        let x = Integer::from(123_456_789i64);
        let y = Integer::from(987_654_321i64);
        b.iter(|| black_box(&x) + black_box(&y));
    });

    c.bench_function("integer_inline_fma", |b| {
        let y = Integer::from(1_000_000_007i64);
        let z = Integer::from(998_244_353i64);
        b.iter(|| {
            let mut acc = Integer::from(3i64);
            for _ in 0..100 {
                acc.multiply_accumulate(black_box(&y), black_box(&z));
            }
            acc
        });
    });
}

fn bench_promoted_arithmetic(c: &mut Criterion) {
    let big: Integer = "123456789012345678901234567890123456789012345678901234567890"
        .parse()
        .unwrap();

    c.bench_function("integer_heap_add", |b| {
        let x = big.clone();
        let y = big.clone();
        b.iter(|| black_box(&x) + black_box(&y));
    });

    c.bench_function("integer_heap_fma", |b| {
        b.iter(|| {
            let mut acc = big.clone();
            for _ in 0..100 {
                acc.multiply_accumulate(black_box(&big), black_box(&big));
            }
            acc
        });
    });
}

fn bench_decimal_io(c: &mut Criterion) {
    c.bench_function("integer_parse_small", |b| {
        b.iter(|| "123456789".parse::<Integer>().unwrap());
    });

    c.bench_function("integer_format_small", |b| {
        let x = Integer::from(123_456_789i64);
        b.iter(|| black_box(&x).to_string());
    });
}

criterion_group!(
    benches,
    bench_inline_arithmetic,
    bench_promoted_arithmetic,
    bench_decimal_io
);
criterion_main!(benches);
