use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use vocab_atom::{Interval, RandSource, RangeSampler, SeededRandom, ThreadRandom};

// Identifiers drained per iteration
const POPULATION: u64 = 1 << 14;

// Identifiers behind the fragmented sampler
const FRAGMENTED_POPULATION: u64 = 1 << 20;

/// Drain a fresh sampler in batches of `quota`, the way fetch episodes do.
fn bench_drain<R>(c: &mut Criterion, group_name: &str, rng_fn: impl Fn() -> R)
where
    R: RandSource,
{
    let mut group = c.benchmark_group(group_name);
    let full = Interval::new(1, POPULATION).unwrap();

    for quota in [1, 10, 30, 100, 1_000] {
        group.throughput(Throughput::Elements(POPULATION));
        group.bench_function(format!("population/{POPULATION}/quota/{quota}"), |b| {
            b.iter(|| {
                let mut sampler = RangeSampler::new(rng_fn());
                sampler.initialize(full);
                while !sampler.is_done() {
                    black_box(sampler.next_batch(quota));
                }
            });
        });
    }

    group.finish();
}

/// A single batch out of a heavily fragmented sampler.
fn bench_fragmented(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampler/fragmented");
    let mut sampler = RangeSampler::new(SeededRandom::new(42));
    sampler.initialize(Interval::new(1, FRAGMENTED_POPULATION).unwrap());
    for id in (1..FRAGMENTED_POPULATION).step_by(64) {
        sampler.shrink_or_remove(id);
    }

    group.bench_function("next_batch/30", |b| {
        b.iter_batched(
            || sampler.clone(),
            |mut sampler| black_box(sampler.next_batch(30)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn benchmark_drain_thread(c: &mut Criterion) {
    bench_drain(c, "sampler/drain/thread", || ThreadRandom);
}

fn benchmark_drain_seeded(c: &mut Criterion) {
    bench_drain(c, "sampler/drain/seeded", || SeededRandom::new(7));
}

criterion_group!(
    benches,
    benchmark_drain_thread,
    benchmark_drain_seeded,
    bench_fragmented
);
criterion_main!(benches);
