use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use standard_merkle::{LeafType, LeafValue, StandardMerkleTree};

const ENCODING: [LeafType; 2] = [LeafType::Address, LeafType::Uint(256)];

pub fn generate_random_value() -> Vec<LeafValue> {
    vec![
        LeafValue::from(rand::random::<[u8; 20]>()),
        LeafValue::from(rand::random::<u128>()),
    ]
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Standard Tree Build");

    for num_leaves in [16, 256, 4096] {
        let values: Vec<_> = (0..num_leaves).map(|_| generate_random_value()).collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(num_leaves),
            &values,
            |b, values| {
                b.iter(|| {
                    black_box(StandardMerkleTree::of(values.clone(), &ENCODING)).unwrap();
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
