use std::sync::Arc;

use criterion::{criterion_group, BenchmarkId, Criterion};
use probemap::{hash, SharedHashMap};
use rand::prelude::*;

pub fn contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared");
    for num_workers in [1, 2, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_workers),
            num_workers,
            |b, &num_workers| {
                let pool = threadpool::ThreadPool::new(num_workers);
                let mut rng = StdRng::seed_from_u64(0x5eed);
                let keys: Arc<Vec<u64>> = Arc::new((0..2048).map(|_| rng.gen()).collect());
                b.iter(|| {
                    let hasher: fn(&u64) -> i64 = hash::std_hash::<u64>;
                    let map = Arc::new(SharedHashMap::with_capacity(4096, hasher));
                    for worker in 0..num_workers {
                        let map = map.clone();
                        let keys = keys.clone();
                        pool.execute(move || {
                            for k in keys.iter().skip(worker).step_by(num_workers) {
                                let _ = map.insert(*k, worker);
                                let _ = map.get(k);
                            }
                        });
                    }
                    pool.join();
                })
            },
        );
    }
    group.finish()
}

criterion_group!(shared, contended);
