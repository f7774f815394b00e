//! Performance benchmarks for event-stream decoding
//!
//! Measures line splitting, event assembly, and full stream decoding for
//! bodies of different sizes and chunk granularities.
//! Run with: cargo bench

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use futures::StreamExt;
use sse_decode::sse::{events, EventAssembler, LineSplitter};

/// Generate a chat-completion style body with `count` events
fn generate_body(count: usize) -> String {
    let mut body = String::from(": connected\n\n");
    for i in 0..count {
        body.push_str(&format!(
            "id: {}\nevent: delta\ndata: {{\"choices\":[{{\"delta\":{{\"content\":\"token {}\"}}}}]}}\n\n",
            i, i
        ));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

/// Benchmark splitting and assembling a body held in memory
fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");

    for count in [10, 100, 1000].iter() {
        let body = generate_body(*count);
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_events", count)),
            &body,
            |b, body| {
                b.iter(|| {
                    let mut lines = LineSplitter::new(true);
                    let mut assembler = EventAssembler::new();
                    lines.push(black_box(body));
                    lines.finish();
                    let mut emitted = 0;
                    while let Some(line) = lines.next_line() {
                        if assembler.feed_line(&line).is_some() {
                            emitted += 1;
                        }
                    }
                    black_box(emitted)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the full stream for different chunk sizes
fn bench_event_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_stream");
    let body = generate_body(500);
    group.throughput(Throughput::Bytes(body.len() as u64));

    for chunk_size in [1, 16, 256, 4096].iter() {
        let chunks: Vec<Bytes> = body
            .as_bytes()
            .chunks(*chunk_size)
            .map(Bytes::copy_from_slice)
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_byte_chunks", chunk_size)),
            &chunks,
            |b, chunks| {
                b.iter(|| {
                    let source = futures::stream::iter(
                        chunks.iter().cloned().map(Ok::<_, std::io::Error>),
                    );
                    let count = futures::executor::block_on(events(Some(source), None).count());
                    black_box(count)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_assemble, bench_event_stream);

criterion_main!(benches);
