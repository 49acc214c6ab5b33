use criterion::{criterion_group, criterion_main, Bencher, BenchmarkId, Criterion};

use fftpack_compat::num_complex::Complex;
use fftpack_compat::{dct, fft, rfft, Normalization, Sequence, TransformOptions};
use ndarray::{ArrayD, IxDyn};

/// Times a full entry-point call, including the packed-layout conversion,
/// for a given length
fn bench_fft(b: &mut Bencher, len: usize) {
    let options = TransformOptions::default();
    let signal = Sequence::from(ArrayD::<Complex<f64>>::zeros(IxDyn(&[len])));
    b.iter(|| fft(&signal, None, -1, &options).unwrap());
}

fn bench_rfft(b: &mut Bencher, len: usize) {
    let options = TransformOptions::default();
    let signal = Sequence::from(ArrayD::<f64>::zeros(IxDyn(&[len])));
    b.iter(|| rfft(&signal, None, -1, &options).unwrap());
}

fn bench_dct2(b: &mut Bencher, len: usize) {
    let options = TransformOptions::default();
    let signal = Sequence::from(ArrayD::<f64>::zeros(IxDyn(&[len])));
    b.iter(|| dct(&signal, 2, None, -1, Normalization::Ortho, &options).unwrap());
}

fn bench_pow2(c: &mut Criterion) {
    let mut group = c.benchmark_group("Powers of 2");
    for i in [8, 16, 32, 64, 128, 256, 1024, 4096, 65536].iter() {
        group.bench_with_input(BenchmarkId::new("Complex", i), i, |b, i| bench_fft(b, *i));
        group.bench_with_input(BenchmarkId::new("Real", i), i, |b, i| bench_rfft(b, *i));
        group.bench_with_input(BenchmarkId::new("Cosine II", i), i, |b, i| {
            bench_dct2(b, *i)
        });
    }
    group.finish();
}

fn bench_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("Range 1022-1025");
    for i in 1022..1026 {
        group.bench_with_input(BenchmarkId::new("Complex", i), &i, |b, i| bench_fft(b, *i));
        group.bench_with_input(BenchmarkId::new("Real", i), &i, |b, i| bench_rfft(b, *i));
        group.bench_with_input(BenchmarkId::new("Cosine II", i), &i, |b, i| {
            bench_dct2(b, *i)
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pow2, bench_range);

criterion_main!(benches);
