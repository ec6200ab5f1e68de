//! Benchmarks for the reply pipeline.
//!
//! Measures intent classification on its own and the full
//! classify -> select -> compose path over the bundled catalog. Replies are
//! composed synchronously here; the session's typing delay is not part of
//! the measurement.

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tembea_chat::{ChatOrchestrator, IntentClassifier, TripPlanner};
use tembea_core::config::ChatConfig;
use tembea_core::ContentStore;

/// Utterances covering every intent, including the fallback.
fn utterances() -> Vec<String> {
    let mut list: Vec<String> = vec![
        "Show me wildlife".to_string(),
        "What beaches do you recommend?".to_string(),
        "Show me cultural events".to_string(),
        "Any festival this month?".to_string(),
        "Something affordable please".to_string(),
        "Can I reserve a tour?".to_string(),
        "Hello there".to_string(),
    ];
    for d in 0..TripPlanner::destinations().len() {
        if let Some(sel) = TripPlanner::selection(d, d % TripPlanner::timeframes().len()) {
            list.push(sel.utterance());
        }
    }
    list
}

fn bench_classify(c: &mut Criterion) {
    let classifier = IntentClassifier::new();
    let inputs = utterances();

    let mut group = c.benchmark_group("classify");
    group.measurement_time(Duration::from_secs(3));

    group.bench_function("mixed_utterances", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let intent = classifier.classify(black_box(&inputs[idx % inputs.len()]));
            idx += 1;
            intent
        });
    });

    let long = "tell me more about kenya ".repeat(80);
    group.bench_function("long_fallback", |b| {
        b.iter(|| classifier.classify(black_box(&long)));
    });

    group.finish();
}

fn bench_respond(c: &mut Criterion) {
    let store = Arc::new(ContentStore::bundled().expect("bundled catalog loads"));
    let orchestrator = ChatOrchestrator::new(store, &ChatConfig::default());
    let inputs = utterances();

    let mut group = c.benchmark_group("respond");
    group.measurement_time(Duration::from_secs(3));

    group.bench_function("mixed_utterances", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let message = orchestrator.respond(idx as u64, black_box(&inputs[idx % inputs.len()]));
            idx += 1;
            message
        });
    });

    group.finish();
}

criterion_group!(benches, bench_classify, bench_respond);
criterion_main!(benches);
