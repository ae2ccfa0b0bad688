//! Chat log throughput: appends into a full ring and incremental reads.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glitch::chat::ChatLog;
use glitch::models::ChatMessage;
use glitch::websocket::decode_chat_frame;

fn message(i: usize) -> ChatMessage {
    ChatMessage::new(
        format!("viewer{}", i % 37),
        format!("message number {} in the chat", i),
        "2024-05-01T18:05:00Z",
    )
}

fn full_log(capacity: usize) -> ChatLog {
    let mut log = ChatLog::new(capacity);
    for i in 0..capacity * 2 {
        log.push(message(i));
    }
    log
}

/// Appends once the ring is full, so every push evicts.
fn bench_push_full(c: &mut Criterion) {
    let mut group = c.benchmark_group("chat_log_push_full");

    for capacity in [100, 500, 2000].iter() {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            capacity,
            |b, &capacity| {
                let mut log = full_log(capacity);
                let mut i = 0usize;
                b.iter(|| {
                    i += 1;
                    black_box(log.push(message(i)))
                });
            },
        );
    }

    group.finish();
}

/// Reading only what a printer has not seen yet.
fn bench_since(c: &mut Criterion) {
    let mut group = c.benchmark_group("chat_log_since");
    let log = full_log(500);
    let total = log.total_received();

    for unseen in [1u64, 50, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(unseen), unseen, |b, &unseen| {
            b.iter(|| log.since(black_box(total - unseen)).count());
        });
    }

    group.finish();
}

fn bench_decode_frame(c: &mut Criterion) {
    let frame = r#"{"username":"bob","message":"hello everyone, how is the stream going?","at":"2024-05-01T18:05:00Z"}"#;
    c.bench_function("decode_chat_frame", |b| {
        b.iter(|| decode_chat_frame(black_box(frame)))
    });
}

criterion_group!(benches, bench_push_full, bench_since, bench_decode_frame);
criterion_main!(benches);
