//! Performance benchmarks for tessera-state operations.
//!
//! Run with: cargo bench --package tessera-state

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Map, Value};
use tessera_state::{patch_by_type, patch_state, Path, PatchOptions, StateValue};

// ============================================================================
// Helper functions to generate test data
// ============================================================================

/// Generate a flat document with N fields
fn generate_flat_doc(num_fields: usize) -> StateValue {
    let mut obj = Map::new();
    for i in 0..num_fields {
        obj.insert(format!("field_{i}"), json!({"value": i}));
    }
    StateValue::from(Value::Object(obj))
}

/// Generate a deeply nested document and the dotted path to its leaf
fn generate_nested_doc(depth: usize) -> (StateValue, Path) {
    let mut current = json!({"value": 42});
    for i in (0..depth).rev() {
        let mut obj = Map::new();
        obj.insert(format!("level_{i}"), current);
        obj.insert(format!("sibling_{i}"), json!({"payload": [1, 2, 3]}));
        current = Value::Object(obj);
    }
    let dotted = (0..depth)
        .map(|i| format!("level_{i}"))
        .collect::<Vec<_>>()
        .join(".");
    (StateValue::from(current), Path::parse(&dotted))
}

// ============================================================================
// Benchmark: patch_state with varying document sizes
// ============================================================================

fn bench_patch_flat(c: &mut Criterion) {
    let mut group = c.benchmark_group("patch_state_flat_doc");
    let patch = StateValue::from(json!({"value": -1}));

    for size in [10, 100, 1000] {
        let doc = generate_flat_doc(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| patch_state(black_box(doc), "field_0", Some(black_box(&patch))));
        });
    }
    group.finish();
}

fn bench_patch_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("patch_state_nested_doc");
    let patch = StateValue::from(json!({"value": -1}));

    for depth in [1, 5, 10, 20] {
        let (doc, path) = generate_nested_doc(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &doc, |b, doc| {
            b.iter(|| patch_state(black_box(doc), path.clone(), Some(black_box(&patch))));
        });
    }
    group.finish();
}

// ============================================================================
// Benchmark: sequence splicing
// ============================================================================

fn bench_sequence_splice(c: &mut Criterion) {
    let mut group = c.benchmark_group("patch_by_type_sequence");
    let insert = StateValue::from(json!({"id": "new"}));

    for len in [10, 1000, 10000] {
        let seq = StateValue::from(Value::Array((0..len).map(|i| json!({"id": i})).collect()));
        group.bench_with_input(BenchmarkId::new("middle", len), &seq, |b, seq| {
            b.iter(|| patch_by_type(black_box(seq), Some(&insert), Some(len as i64 / 2)));
        });
        group.bench_with_input(BenchmarkId::new("gap_fill", len), &seq, |b, seq| {
            b.iter(|| {
                patch_state(
                    black_box(seq),
                    PatchOptions::new().with_at(len as i64 + 16),
                    Some(&insert),
                )
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_patch_flat,
    bench_patch_nested,
    bench_sequence_splice,
);
criterion_main!(benches);
