use std::collections::HashSet;
use std::sync::Arc;

use beacon::domain::models::{ContextSuggestion, DataProvenance, Priority, SuggestionType};
use beacon::domain::ports::{ManualClock, NullCuePort};
use beacon::services::{SuggestionEngine, SuggestionFilter, TraceIngestor, TrustScorer};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

fn response(steps: usize, sources: usize) -> serde_json::Value {
    let steps: Vec<_> = (1..=steps)
        .map(|n| {
            json!({
                "step_number": n,
                "component": format!("component-{}", n % 7),
                "action": "query",
                "duration_ms": 1.5,
                "data_source": "postgres",
                "cache_hit": n % 3 == 0
            })
        })
        .collect();
    let provenance: Vec<_> = (0..sources)
        .map(|i| {
            json!({
                "source_type": "database",
                "source_id": format!("table-{i}"),
                "timestamp": "2024-03-01T12:00:00Z",
                "confidence": 0.5 + (i % 5) as f64 * 0.1,
                "verified": i % 11 != 0
            })
        })
        .collect();
    json!({
        "execution_trace": {
            "request_id": "bench",
            "total_duration_ms": 42.0,
            "steps": steps,
            "data_sources_used": ["postgres", "redis"],
            "agents_involved": ["planner"],
            "database_queries": 3
        },
        "data_provenance": provenance
    })
}

fn batch(size: usize) -> Vec<ContextSuggestion> {
    let kinds = [
        SuggestionType::Logs,
        SuggestionType::Metrics,
        SuggestionType::Models,
        SuggestionType::Documentation,
        SuggestionType::Alert,
    ];
    (0..size)
        .map(|i| ContextSuggestion {
            id: format!("s-{i}"),
            kind: kinds[i % kinds.len()],
            title: "bench".to_string(),
            preview: String::new(),
            confidence: (i % 10) as f64 / 10.0,
            priority: Priority::Medium,
            kernel: format!("kernel-{}", i % 4),
            timestamp: String::new(),
        })
        .collect()
}

fn bench_trust_pipeline(c: &mut Criterion) {
    let ingestor = TraceIngestor::new();
    let scorer = TrustScorer::new();
    let mut group = c.benchmark_group("trust_pipeline");

    for size in [4usize, 64, 512] {
        let raw = response(size, size);
        group.bench_with_input(BenchmarkId::new("ingest_and_score", size), &raw, |b, raw| {
            b.iter(|| {
                let observability = ingestor.ingest_response(black_box(raw));
                scorer.metrics(&observability)
            });
        });

        let records: Vec<DataProvenance> = (0..size)
            .map(|i| DataProvenance::new("database", 0.9, i % 2 == 0))
            .collect();
        group.bench_with_input(BenchmarkId::new("score", size), &records, |b, records| {
            b.iter(|| scorer.score(black_box(records)));
        });
    }
    group.finish();
}

fn bench_suggestion_cycle(c: &mut Criterion) {
    let candidates = batch(50);
    let dismissed: HashSet<String> = ["logs:kernel-0".to_string()].into_iter().collect();
    let filter = SuggestionFilter::new();

    c.bench_function("filter_50", |b| {
        b.iter(|| filter.filter(black_box(&candidates), &dismissed));
    });

    c.bench_function("process_batch_50", |b| {
        let clock = Arc::new(ManualClock::at_millis(0));
        let mut engine = SuggestionEngine::new(clock.clone(), Arc::new(NullCuePort));
        b.iter(|| {
            clock.advance_ms(30_000);
            let events = engine.process_batch(black_box(&candidates));
            if let Some(id) = engine.toast_id().map(String::from) {
                engine.expire_toast(&id);
            }
            events
        });
    });
}

criterion_group!(benches, bench_trust_pipeline, bench_suggestion_cycle);
criterion_main!(benches);
