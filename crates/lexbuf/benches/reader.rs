//! Benchmark – `lexbuf::BufferedReader` driven like a scanner loop
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lexbuf::{BufferedReader, CharStream, ReaderOptions, TextSource, Trickle, split_source};

/// A deterministic source file of at least `target_len` bytes: short
/// identifiers, tabs, newlines and the occasional wide character.
fn make_source(target_len: usize) -> String {
    const LINE: &str = "\tlet value_中 = call(arg, 42);\n";
    let mut s = String::with_capacity(target_len + LINE.len());
    while s.len() < target_len {
        s.push_str(LINE);
    }
    s
}

/// Splits the input into words and single-character punctuation, accepting
/// each one. Returns the token count so Criterion cannot drop the work.
fn run_tokens<S: CharStream<Unit = char>>(source: S, chunk_size: usize) -> usize {
    let options = ReaderOptions {
        chunk_size,
        ..Default::default()
    };
    let mut reader = BufferedReader::with_options(source, options).expect("valid options");
    let mut tokens = 0usize;
    while let Some(ch) = reader.read().expect("open reader") {
        if ch.is_whitespace() {
            reader.discard().expect("open reader");
            continue;
        }
        if ch.is_alphanumeric() {
            while reader
                .peek()
                .expect("open reader")
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
            {
                reader.read().expect("open reader");
            }
        }
        black_box(reader.accept().expect("open reader"));
        tokens += 1;
    }
    tokens
}

fn bench_reader(c: &mut Criterion) {
    let payload = make_source(64 * 1024);

    let mut group = c.benchmark_group("reader_tokens");
    group.throughput(Throughput::Bytes(payload.len() as u64));

    for &chunk_size in &[16usize, 256, 4096] {
        group.bench_with_input(
            BenchmarkId::new("text", chunk_size),
            &chunk_size,
            |b, &size| {
                b.iter(|| run_tokens(TextSource::from(black_box(payload.as_str())), size));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("split_64", chunk_size),
            &chunk_size,
            |b, &size| {
                b.iter(|| run_tokens(split_source(black_box(&payload), 64), size));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("trickle_7", chunk_size),
            &chunk_size,
            |b, &size| {
                b.iter(|| {
                    let source = Trickle::new(TextSource::from(black_box(payload.as_str())), 7);
                    run_tokens(source, size)
                });
            },
        );
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(8));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_reader }
criterion_main!(benches);
