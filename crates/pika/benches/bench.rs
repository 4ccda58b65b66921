use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use pika::{
    BasicPikaGenerator, GeneratorConfig, LockPikaGenerator, MonotonicClock, Pika, PikaGenerator,
    PikaOptions, Poll, PrefixDefinition, TimeSource,
};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

struct FixedMockTime {
    millis: u64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// A fresh generator mints this many IDs in one frozen millisecond before it
// has to wait.
const TOTAL_IDS: usize = 4095;

fn mock_config() -> GeneratorConfig {
    GeneratorConfig::default()
}

/// Benchmarks a hot-path generator where every poll is `Ready`.
fn bench_generator<G>(c: &mut Criterion, group_name: &str, generator_factory: impl Fn() -> G)
where
    G: PikaGenerator,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{}", TOTAL_IDS), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = generator_factory();
                for _ in 0..TOTAL_IDS {
                    match generator.try_poll() {
                        Ok(Poll::Ready { id }) => {
                            black_box(id);
                        }
                        _ => unreachable!(),
                    }
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks generators that spin through exhausted milliseconds on a real
/// clock.
fn bench_generator_yield<G>(c: &mut Criterion, group_name: &str, generator_factory: impl Fn() -> G)
where
    G: PikaGenerator,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{}", TOTAL_IDS), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = generator_factory();
                for _ in 0..TOTAL_IDS {
                    let id = generator
                        .try_next_id(|_| core::hint::spin_loop())
                        .unwrap();
                    black_box(id);
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks one generator shared across threads.
fn bench_generator_contended<G>(c: &mut Criterion, group_name: &str, generator_fn: impl Fn() -> G)
where
    G: PikaGenerator + Send + Sync,
{
    let mut group = c.benchmark_group(group_name);

    for thread_count in [1, 2, 4, 8] {
        let ids_per_thread = TOTAL_IDS / thread_count;

        group.throughput(Throughput::Elements((ids_per_thread * thread_count) as u64));
        group.bench_function(
            format!("elems/{}/threads/{}", ids_per_thread * thread_count, thread_count),
            |b| {
                b.iter_custom(|iters| {
                    let start = Instant::now();

                    for _ in 0..iters {
                        let generator = Arc::new(generator_fn());
                        let barrier = Arc::new(Barrier::new(thread_count + 1));
                        scope(|s| {
                            for _ in 0..thread_count {
                                let generator = Arc::clone(&generator);
                                let barrier = Arc::clone(&barrier);
                                s.spawn(move || {
                                    barrier.wait();
                                    for _ in 0..ids_per_thread {
                                        let id = generator
                                            .try_next_id(pika::sleep_yield)
                                            .unwrap();
                                        black_box(id);
                                    }
                                });
                            }
                            barrier.wait();
                        });
                    }

                    start.elapsed()
                });
            },
        );
    }

    group.finish();
}

// --- MOCK CLOCK (fixed, non-advancing time) ---

fn benchmark_mock_sequential_basic(c: &mut Criterion) {
    bench_generator(c, "mock/sequential/basic", || {
        BasicPikaGenerator::new(mock_config(), FixedMockTime { millis: 1 })
    });
}

fn benchmark_mock_sequential_lock(c: &mut Criterion) {
    bench_generator(c, "mock/sequential/lock", || {
        LockPikaGenerator::new(mock_config(), FixedMockTime { millis: 1 })
    });
}

// --- MONOTONIC CLOCK (realistic time with potential yielding) ---

fn benchmark_mono_sequential_basic(c: &mut Criterion) {
    let clock = MonotonicClock::default();
    bench_generator_yield(c, "mono/sequential/basic", || {
        BasicPikaGenerator::new(mock_config(), clock.clone())
    });
}

fn benchmark_mono_sequential_lock(c: &mut Criterion) {
    let clock = MonotonicClock::default();
    bench_generator_yield(c, "mono/sequential/lock", || {
        LockPikaGenerator::new(mock_config(), clock.clone())
    });
}

fn benchmark_mono_contended_lock(c: &mut Criterion) {
    let clock = MonotonicClock::default();
    bench_generator_contended(c, "mono/contended/lock", || {
        LockPikaGenerator::new(mock_config(), clock.clone())
    });
}

// --- CODEC ---

fn codec() -> Pika {
    Pika::new(
        PikaOptions::new()
            .prefix(PrefixDefinition::new("user"))
            .prefix(PrefixDefinition::new("sk").secure(true)),
    )
    .unwrap()
}

fn benchmark_codec(c: &mut Criterion) {
    let pika = codec();
    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Elements(1));

    group.bench_function("generate", |b| {
        b.iter(|| black_box(pika.generate(black_box("user")).unwrap()));
    });
    group.bench_function("generate/secure", |b| {
        b.iter(|| black_box(pika.generate(black_box("sk")).unwrap()));
    });

    let plain = pika.generate("user").unwrap();
    let secure = pika.generate("sk").unwrap();
    group.bench_function("decode", |b| {
        b.iter(|| black_box(pika.decode(black_box(plain.as_str())).unwrap()));
    });
    group.bench_function("decode/secure", |b| {
        b.iter(|| black_box(pika.decode(black_box(secure.as_str())).unwrap()));
    });
    group.bench_function("validate", |b| {
        b.iter(|| black_box(pika.validate(black_box(plain.as_str()), None)));
    });

    group.finish();
}

criterion_group!(
    benches,
    // Mock clock
    benchmark_mock_sequential_basic,
    benchmark_mock_sequential_lock,
    // Monotonic clock (yielding)
    benchmark_mono_sequential_basic,
    benchmark_mono_sequential_lock,
    benchmark_mono_contended_lock,
    // Codec
    benchmark_codec,
);
criterion_main!(benches);
