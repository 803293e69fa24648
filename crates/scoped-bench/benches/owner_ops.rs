//! Criterion micro-benchmarks for owner construction, reset, swap, and indexing.
//!
//! Each owner benchmark has a plain `Box` counterpart so the owner overhead
//! is visible side by side.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use scoped::SingleOwner;
use scoped_bench::{array_owner, single_owners, Payload};

fn bench_construct_drop(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct_drop");
    group.bench_function("single_owner", |b| {
        b.iter(|| {
            let owner = SingleOwner::from_box(Box::new(Payload::new(black_box(7))));
            black_box(owner.lanes[0])
        });
    });
    group.bench_function("box", |b| {
        b.iter(|| {
            let boxed = Box::new(Payload::new(black_box(7)));
            black_box(boxed.lanes[0])
        });
    });
    group.finish();
}

fn bench_reset(c: &mut Criterion) {
    let mut group = c.benchmark_group("reset");
    group.bench_function("single_owner", |b| {
        let mut owner = SingleOwner::from_box(Box::new(Payload::new(0)));
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            owner.reset(Some(Box::new(Payload::new(seed))));
            black_box(owner.get());
        });
    });
    group.bench_function("box_assign", |b| {
        let mut boxed = Box::new(Payload::new(0));
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            boxed = Box::new(Payload::new(seed));
            black_box(&*boxed);
        });
    });
    group.finish();
}

fn bench_swap(c: &mut Criterion) {
    c.bench_function("swap_1k_pairs", |b| {
        b.iter_batched(
            || single_owners(1024),
            |mut owners| {
                let (left, right) = owners.split_at_mut(512);
                for (x, y) in left.iter_mut().zip(right.iter_mut()) {
                    x.swap(y);
                }
                owners
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_array_index(c: &mut Criterion) {
    let block = array_owner(4096);
    let boxed: Box<[Payload]> = (0..4096u64).map(Payload::new).collect();

    let mut group = c.benchmark_group("index_sum_4k");
    group.bench_function("array_owner", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for i in 0..block.len() {
                sum = sum.wrapping_add(block[i].lanes[0]);
            }
            black_box(sum)
        });
    });
    group.bench_function("boxed_slice", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for i in 0..boxed.len() {
                sum = sum.wrapping_add(boxed[i].lanes[0]);
            }
            black_box(sum)
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_construct_drop,
    bench_reset,
    bench_swap,
    bench_array_index
);
criterion_main!(benches);
