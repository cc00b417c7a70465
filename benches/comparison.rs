// Copyright © SurrealDB Ltd
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Criterion benchmarks comparing the dendrology AVL tree against `BTreeSet`.
//!
//! This benchmark suite compares:
//! - `dendrology::Tree` - Box-linked AVL tree
//! - `std::collections::BTreeSet` - Standard library B-tree
//!
//! Both are single-threaded ordered sets, so the comparison isolates the
//! cost of binary rebalancing against wide B-tree nodes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dendrology::order::TokenOrder;
use dendrology::Tree;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::BTreeSet;
use std::hint::black_box;

const SEED: u64 = 42;

// ============================================================================
// Helper Functions
// ============================================================================

/// Generate sequential keys from 0 to count-1
fn sequential_keys(count: usize) -> Vec<i64> {
	(0..count as i64).collect()
}

/// Generate random keys using a seeded RNG
fn random_keys(count: usize) -> Vec<i64> {
	let mut rng = StdRng::seed_from_u64(SEED);
	(0..count).map(|_| rng.random()).collect()
}

/// Generate keys that don't exist in a sequential key set
fn missing_keys(count: usize) -> Vec<i64> {
	(0..count as i64).map(|i| -(i + 1)).collect()
}

/// Generate lowercase words of 1 to 12 letters
fn random_words(count: usize) -> Vec<String> {
	let mut rng = StdRng::seed_from_u64(SEED);
	(0..count)
		.map(|_| {
			let len = rng.random_range(1..=12);
			(0..len).map(|_| rng.random_range(b'a'..=b'z') as char).collect()
		})
		.collect()
}

// ============================================================================
// Insert Benchmarks
// ============================================================================

fn bench_insert_sequential(c: &mut Criterion) {
	let mut group = c.benchmark_group("insert_sequential");

	for count in [1_000, 10_000, 100_000] {
		let keys = sequential_keys(count);
		group.throughput(Throughput::Elements(count as u64));

		// AVL tree
		group.bench_with_input(BenchmarkId::new("avl", count), &keys, |b, keys| {
			b.iter_batched(
				Tree::new,
				|mut tree| {
					for &k in keys {
						black_box(tree.insert(k));
					}
					tree
				},
				criterion::BatchSize::SmallInput,
			)
		});

		// BTreeSet
		group.bench_with_input(BenchmarkId::new("btreeset", count), &keys, |b, keys| {
			b.iter_batched(
				BTreeSet::new,
				|mut set| {
					for &k in keys {
						black_box(set.insert(k));
					}
					set
				},
				criterion::BatchSize::SmallInput,
			)
		});
	}
	group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
	let mut group = c.benchmark_group("insert_random");

	for count in [1_000, 10_000, 100_000] {
		let keys = random_keys(count);
		group.throughput(Throughput::Elements(count as u64));

		// AVL tree
		group.bench_with_input(BenchmarkId::new("avl", count), &keys, |b, keys| {
			b.iter_batched(
				Tree::new,
				|mut tree| {
					for &k in keys {
						black_box(tree.insert(k));
					}
					tree
				},
				criterion::BatchSize::SmallInput,
			)
		});

		// BTreeSet
		group.bench_with_input(BenchmarkId::new("btreeset", count), &keys, |b, keys| {
			b.iter_batched(
				BTreeSet::new,
				|mut set| {
					for &k in keys {
						black_box(set.insert(k));
					}
					set
				},
				criterion::BatchSize::SmallInput,
			)
		});
	}
	group.finish();
}

fn bench_insert_words(c: &mut Criterion) {
	let mut group = c.benchmark_group("insert_words");

	for count in [1_000, 10_000] {
		let words = random_words(count);
		group.throughput(Throughput::Elements(count as u64));

		for code in [0, 1, 3] {
			let order = TokenOrder::try_from(code).expect("valid order code");
			let id = BenchmarkId::new(format!("avl_order_{}", code), count);
			group.bench_with_input(id, &words, |b, words| {
				b.iter_batched(
					|| Tree::with_comparator(order),
					|mut tree| {
						for w in words {
							black_box(tree.insert(w.clone()));
						}
						tree
					},
					criterion::BatchSize::SmallInput,
				)
			});
		}

		// BTreeSet, lexicographic only
		group.bench_with_input(BenchmarkId::new("btreeset", count), &words, |b, words| {
			b.iter_batched(
				BTreeSet::new,
				|mut set| {
					for w in words {
						black_box(set.insert(w.clone()));
					}
					set
				},
				criterion::BatchSize::SmallInput,
			)
		});
	}
	group.finish();
}

// ============================================================================
// Lookup Benchmarks
// ============================================================================

fn bench_lookup_hit(c: &mut Criterion) {
	let mut group = c.benchmark_group("lookup_hit");

	for count in [1_000, 10_000, 100_000] {
		let keys = random_keys(count);
		let tree: Tree<i64> = keys.iter().copied().collect();
		let set: BTreeSet<i64> = keys.iter().copied().collect();
		group.throughput(Throughput::Elements(count as u64));

		// AVL tree
		group.bench_with_input(BenchmarkId::new("avl", count), &keys, |b, keys| {
			b.iter(|| {
				for k in keys {
					black_box(tree.contains(k));
				}
			})
		});

		// BTreeSet
		group.bench_with_input(BenchmarkId::new("btreeset", count), &keys, |b, keys| {
			b.iter(|| {
				for k in keys {
					black_box(set.contains(k));
				}
			})
		});
	}
	group.finish();
}

fn bench_lookup_miss(c: &mut Criterion) {
	let mut group = c.benchmark_group("lookup_miss");

	for count in [1_000, 10_000, 100_000] {
		let tree: Tree<i64> = sequential_keys(count).into_iter().collect();
		let set: BTreeSet<i64> = sequential_keys(count).into_iter().collect();
		let missing = missing_keys(count);
		group.throughput(Throughput::Elements(count as u64));

		// AVL tree
		group.bench_with_input(BenchmarkId::new("avl", count), &missing, |b, keys| {
			b.iter(|| {
				for k in keys {
					black_box(tree.contains(k));
				}
			})
		});

		// BTreeSet
		group.bench_with_input(BenchmarkId::new("btreeset", count), &missing, |b, keys| {
			b.iter(|| {
				for k in keys {
					black_box(set.contains(k));
				}
			})
		});
	}
	group.finish();
}

// ============================================================================
// Remove Benchmarks
// ============================================================================

fn bench_remove(c: &mut Criterion) {
	let mut group = c.benchmark_group("remove");

	for count in [1_000, 10_000, 100_000] {
		let keys = random_keys(count);
		group.throughput(Throughput::Elements(count as u64));

		// AVL tree
		group.bench_with_input(BenchmarkId::new("avl", count), &keys, |b, keys| {
			b.iter_batched(
				|| keys.iter().copied().collect::<Tree<i64>>(),
				|mut tree| {
					for k in keys {
						black_box(tree.remove(k));
					}
					tree
				},
				criterion::BatchSize::SmallInput,
			)
		});

		// BTreeSet
		group.bench_with_input(BenchmarkId::new("btreeset", count), &keys, |b, keys| {
			b.iter_batched(
				|| keys.iter().copied().collect::<BTreeSet<i64>>(),
				|mut set| {
					for k in keys {
						black_box(set.remove(k));
					}
					set
				},
				criterion::BatchSize::SmallInput,
			)
		});
	}
	group.finish();
}

// ============================================================================
// Traversal and Shape Benchmarks
// ============================================================================

fn bench_iter(c: &mut Criterion) {
	let mut group = c.benchmark_group("iter");

	for count in [1_000, 10_000, 100_000] {
		let tree: Tree<i64> = random_keys(count).into_iter().collect();
		let set: BTreeSet<i64> = random_keys(count).into_iter().collect();
		group.throughput(Throughput::Elements(count as u64));

		group.bench_function(BenchmarkId::new("avl_in_order", count), |b| {
			b.iter(|| black_box(tree.iter().fold(0i64, |acc, k| acc.wrapping_add(*k))))
		});

		group.bench_function(BenchmarkId::new("avl_level_order", count), |b| {
			b.iter(|| black_box(tree.level_order().fold(0i64, |acc, k| acc.wrapping_add(*k))))
		});

		group.bench_function(BenchmarkId::new("btreeset", count), |b| {
			b.iter(|| black_box(set.iter().fold(0i64, |acc, k| acc.wrapping_add(*k))))
		});
	}
	group.finish();
}

fn bench_shape_queries(c: &mut Criterion) {
	let mut group = c.benchmark_group("shape");

	for count in [1_000, 10_000, 100_000] {
		let tree: Tree<i64> = random_keys(count).into_iter().collect();

		group.bench_function(BenchmarkId::new("height", count), |b| {
			b.iter(|| black_box(tree.height()))
		});

		group.bench_function(BenchmarkId::new("is_complete", count), |b| {
			b.iter(|| black_box(tree.is_complete()))
		});

		group.bench_function(BenchmarkId::new("check_invariants", count), |b| {
			b.iter(|| black_box(tree.check_invariants().is_ok()))
		});
	}
	group.finish();
}

criterion_group!(
	benches,
	bench_insert_sequential,
	bench_insert_random,
	bench_insert_words,
	bench_lookup_hit,
	bench_lookup_miss,
	bench_remove,
	bench_iter,
	bench_shape_queries,
);

criterion_main!(benches);
