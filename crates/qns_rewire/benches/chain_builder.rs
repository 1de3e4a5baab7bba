use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use qns_core::archgraphs;
use qns_core::config::{subgraph_size, BuilderConfig, OptType};
use qns_rewire::QueknoBuilder;

fn bench_build(c: &mut Criterion) {
    let config = BuilderConfig::new(OptType::Opt2, 20, archgraphs::tokyo(), subgraph_size::TOKYO, 1.5);

    c.bench_function("build_opt2_tokyo_cost20", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(0);
            QueknoBuilder::new(&config).run(&mut rng).unwrap()
        })
    });
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
