//! Criterion micro-benchmarks for dictionary insert, lookup, and removal.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;
use scree_arena::Arena;
use scree_core::{int_compare, Datum};
use scree_hash::Dictionary;

fn int_hash(key: Datum) -> u64 {
    key.as_int().unwrap_or(0) as u64
}

/// Deterministic shuffled key set so runs are comparable.
fn make_keys(count: usize) -> Vec<i64> {
    let mut keys: Vec<i64> = (0..count as i64).collect();
    let mut rng = StdRng::seed_from_u64(0x5c4ee);
    keys.shuffle(&mut rng);
    keys
}

fn bench_add(c: &mut Criterion) {
    let keys = make_keys(1024);
    c.bench_function("dictionary_add_1024", |b| {
        b.iter(|| {
            let mut arena = Arena::new();
            let mut dict = Dictionary::create(&mut arena, int_hash, int_compare, 16);
            for &k in &keys {
                dict.add(&mut arena, Datum::Int(k), Datum::Int(2 * k));
            }
            black_box(dict.len())
        });
    });
}

fn bench_lookup(c: &mut Criterion) {
    let keys = make_keys(1024);
    let mut arena = Arena::new();
    let mut dict = Dictionary::create(&mut arena, int_hash, int_compare, 16);
    for &k in &keys {
        dict.add(&mut arena, Datum::Int(k), Datum::Int(2 * k));
    }

    c.bench_function("dictionary_lookup_hit", |b| {
        b.iter(|| {
            for &k in &keys {
                black_box(dict.lookup(&arena, Datum::Int(k)));
            }
        });
    });

    c.bench_function("dictionary_lookup_miss", |b| {
        b.iter(|| {
            for &k in &keys {
                black_box(dict.lookup(&arena, Datum::Int(k + 10_000)));
            }
        });
    });
}

fn bench_add_remove_churn(c: &mut Criterion) {
    let keys = make_keys(512);
    c.bench_function("dictionary_add_remove_churn", |b| {
        b.iter(|| {
            let mut arena = Arena::new();
            let mut dict = Dictionary::create(&mut arena, int_hash, int_compare, 16);
            for &k in &keys {
                dict.add(&mut arena, Datum::Int(k), Datum::Int(k));
            }
            for &k in &keys {
                black_box(dict.remove(&mut arena, Datum::Int(k)));
            }
            black_box(dict.len())
        });
    });
}

criterion_group!(benches, bench_add, bench_lookup, bench_add_remove_churn);
criterion_main!(benches);
