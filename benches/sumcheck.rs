use ark_std::test_rng;
use ark_std::UniformRand;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hypercube_sumcheck::config::SumCheckConfig;
use hypercube_sumcheck::field::bls12_381::Fr;
use hypercube_sumcheck::polynomial::MultilinearPolynomial;
use hypercube_sumcheck::sumcheck::{prove, verify, SumCheckProver, Transcript};

fn random_poly(num_vars: usize) -> MultilinearPolynomial<Fr> {
    let mut rng = test_rng();
    let evals: Vec<Fr> = (0..1usize << num_vars).map(|_| Fr::rand(&mut rng)).collect();
    MultilinearPolynomial::new(evals).unwrap()
}

/// Benchmark: non-interactive prover, O(2^n) field operations over n rounds
fn bench_sumcheck_prove(c: &mut Criterion) {
    let mut group = c.benchmark_group("sumcheck_prove");

    for num_vars in [8, 10, 12, 14].iter() {
        let poly = random_poly(*num_vars);
        let sum = poly.sum_over_hypercube();

        group.throughput(Throughput::Elements(1u64 << num_vars));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("n={}", num_vars)),
            num_vars,
            |b, _| {
                b.iter(|| {
                    let mut transcript = Transcript::<Fr>::new(b"bench");
                    black_box(prove(poly.clone(), sum, &mut transcript, SumCheckConfig::default()).unwrap())
                });
            },
        );
    }
    group.finish();
}

/// Benchmark: verifier rounds are O(n); the table oracle dominates the final check
fn bench_sumcheck_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("sumcheck_verify");

    for num_vars in [8, 10, 12, 14].iter() {
        let poly = random_poly(*num_vars);
        let sum = poly.sum_over_hypercube();
        let mut transcript = Transcript::<Fr>::new(b"bench");
        let (proof, _) = prove(poly.clone(), sum, &mut transcript, SumCheckConfig::default()).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("n={}", num_vars)),
            num_vars,
            |b, nv| {
                b.iter(|| {
                    let mut transcript = Transcript::<Fr>::new(b"bench");
                    black_box(verify(&proof, *nv, sum, &mut transcript, &poly, SumCheckConfig::default()).unwrap())
                });
            },
        );
    }
    group.finish();
}

/// Benchmark: first round of the prover (largest table)
fn bench_sumcheck_first_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("sumcheck_first_round");

    for num_vars in [10, 14, 16].iter() {
        let poly = random_poly(*num_vars);
        let sum = poly.sum_over_hypercube();

        group.throughput(Throughput::Elements(1u64 << num_vars));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("n={}", num_vars)),
            num_vars,
            |b, _| {
                b.iter(|| {
                    let mut prover = SumCheckProver::new();
                    prover.start(poly.clone(), sum).unwrap();
                    black_box(prover.produce_round().unwrap())
                });
            },
        );
    }
    group.finish();
}

/// Benchmark: parallel vs sequential prover at the same size
fn bench_parallel_vs_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("sumcheck_parallelism");
    let num_vars = 16;
    let poly = random_poly(num_vars);
    let sum = poly.sum_over_hypercube();

    for (name, config) in [
        ("parallel", SumCheckConfig::default()),
        ("sequential", SumCheckConfig::sequential()),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut transcript = Transcript::<Fr>::new(b"bench");
                black_box(prove(poly.clone(), sum, &mut transcript, config).unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sumcheck_prove,
    bench_sumcheck_verify,
    bench_sumcheck_first_round,
    bench_parallel_vs_sequential,
);
criterion_main!(benches);
