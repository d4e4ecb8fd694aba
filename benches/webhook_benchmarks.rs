//! Performance benchmarks for webhook classification and log parsing
//!
//! Run with: cargo bench
//! Or for specific benchmarks: cargo bench -- <filter>

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use serde_json::json;
use std::time::Duration;
use vapi_webhook::core::{classify, dispatch, parse_log_text};
use vapi_webhook::store::WebhookStore;
use vapi_webhook::utils::ReceiptTime;

/// Benchmark shape classification of the common payload kinds
fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");
    group.measurement_time(Duration::from_secs(5));

    let payloads = [
        (
            "function_call",
            json!({"message": {"type": "function-call", "functionCall": {"name": "getCallsData"}}}),
        ),
        (
            "assistant",
            json!({"id": "asst-1", "transcriber": {}, "model": {"messages": []}, "voice": {}}),
        ),
        (
            "conversation_update",
            json!({"type": "conversation-update", "conversation": {"messages": [{"role": "user", "content": "hi"}]}}),
        ),
        ("unrecognized", json!({"event": "unknown", "data": [1, 2, 3]})),
    ];

    for (name, payload) in payloads {
        group.bench_with_input(BenchmarkId::new("classify", name), &payload, |b, payload| {
            b.iter(|| classify(black_box(payload.clone())));
        });
    }

    group.finish();
}

/// Benchmark raw log text parsing
fn bench_log_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_parsing");

    for lines in [10usize, 100, 1000] {
        let text: String = (0..lines)
            .map(|i| {
                if i % 3 == 0 {
                    format!("free text line {i}\n")
                } else {
                    format!("12:34:56:{:03} [WARN] message number {i}\n", i % 1000)
                }
            })
            .collect();

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_log_text", lines), &text, |b, text| {
            b.iter(|| parse_log_text(black_box(text), "2025-01-01T00:00:00.000Z"));
        });
    }

    group.finish();
}

/// Benchmark ingestion into a full (evicting) call history
fn bench_dispatch_at_capacity(c: &mut Criterion) {
    let store = WebhookStore::default();
    let received = ReceiptTime::now();
    for i in 0..100 {
        let payload = json!({"callId": format!("warm-{i}"), "callData": {}});
        let _ = dispatch(&store, classify(payload), &received);
    }

    c.bench_function("dispatch_legacy_call_at_capacity", |b| {
        b.iter(|| {
            let payload = json!({"callId": "bench", "callData": {"caller": "+421900000000"}});
            let _ = dispatch(&store, classify(black_box(payload)), &received);
        });
    });
}

criterion_group!(
    benches,
    bench_classification,
    bench_log_parsing,
    bench_dispatch_at_capacity
);
criterion_main!(benches);
