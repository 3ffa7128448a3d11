use criterion::{black_box, criterion_group, criterion_main, Criterion};
use standard_merkle::{verify, LeafType, LeafValue, Proof, StandardMerkleTree};

const ENCODING: [LeafType; 2] = [LeafType::Address, LeafType::Uint(256)];

pub fn generate_random_value() -> Vec<LeafValue> {
    vec![
        LeafValue::from(rand::random::<[u8; 20]>()),
        LeafValue::from(rand::random::<u128>()),
    ]
}

fn setup_tree(num_leaves: usize) -> (StandardMerkleTree, Vec<Vec<LeafValue>>) {
    let values: Vec<_> = (0..num_leaves).map(|_| generate_random_value()).collect();
    let tree = StandardMerkleTree::of(values.clone(), &ENCODING).unwrap();
    (tree, values)
}

fn bench_proof_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Standard Tree Proof Generation");

    // Setup a tree with 1000 leaves
    let (tree, values) = setup_tree(1000);

    group.bench_function("By Value", |b| {
        b.iter(|| {
            for value in &values {
                black_box(tree.prove_value(value)).unwrap();
            }
        })
    });

    group.bench_function("By Index", |b| {
        b.iter(|| {
            for index in 0..values.len() {
                black_box(tree.prove_entry(index)).unwrap();
            }
        })
    });

    group.finish();
}

fn bench_proof_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("Standard Tree Proof Verification");

    let (tree, values) = setup_tree(1000);
    let root = tree.root();
    let proofs: Vec<Proof> = values
        .iter()
        .map(|value| tree.prove_value(value).unwrap())
        .collect();

    group.bench_function("Detached", |b| {
        b.iter(|| {
            for (value, proof) in values.iter().zip(&proofs) {
                assert!(black_box(verify(&root, &ENCODING, value, proof)).unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_proof_generation, bench_proof_verification);
criterion_main!(benches);
