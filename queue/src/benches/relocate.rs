use criterion::{criterion_group, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::num::NonZeroUsize;
use tessel_queue::{Config, Owned, Queue, StorageMode};

fn bench_relocate(c: &mut Criterion) {
    for storage in [StorageMode::Array, StorageMode::LinkedList] {
        for items in [1_000, 10_000, 100_000] {
            let mut cfg = Config::new(NonZeroUsize::new(8).unwrap());
            cfg.storage = storage;
            let mut queue = Queue::<Owned>::init(cfg);
            for i in 0..items as u64 {
                queue.add(&i.to_be_bytes()).unwrap();
            }
            let mut rng = StdRng::seed_from_u64(items as u64);
            c.bench_function(
                &format!("{}/storage={storage:?} items={items}", module_path!()),
                |b| {
                    b.iter(|| {
                        let dest = rng.gen_range(0..items);
                        let src = rng.gen_range(0..items);
                        queue.relocate(dest, src).unwrap();
                    })
                },
            );
        }
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_relocate
}
