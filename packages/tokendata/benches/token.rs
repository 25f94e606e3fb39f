//! Signing and verification benchmarks
//!
//! Compares ES256 and RS256 across payload sizes, and the blocking-pool
//! round trip of the async parser against the inline sync parser.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;
use tokendata::{Algorithm, AsyncParser, Parser, Signer};

const ES256_PRIVATE: &str = include_str!("../tests/fixtures/es256_private.pem");
const ES256_PUBLIC: &str = include_str!("../tests/fixtures/es256_public.pem");
const RS256_PRIVATE: &str = include_str!("../tests/fixtures/rs256_private.pem");
const RS256_PUBLIC: &str = include_str!("../tests/fixtures/rs256_public.pem");

fn keys(algorithm: Algorithm) -> (&'static str, &'static str) {
    match algorithm {
        Algorithm::Es256 => (ES256_PRIVATE, ES256_PUBLIC),
        Algorithm::Rs256 => (RS256_PRIVATE, RS256_PUBLIC),
    }
}

fn payload(size: usize) -> serde_json::Value {
    json!({ "userId": 42, "role": "admin", "data": "x".repeat(size) })
}

fn bench_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("sign");

    for algorithm in [Algorithm::Es256, Algorithm::Rs256] {
        let (private_key, _) = keys(algorithm);
        let signer = Signer::with_algorithm(algorithm, private_key).expect("valid private key");
        let data = payload(256);

        group.bench_function(algorithm.name(), |b| {
            b.iter(|| signer.sign(black_box(&data)).expect("signing should succeed"));
        });
    }

    group.finish();
}

fn bench_parse_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_by_size");

    for algorithm in [Algorithm::Es256, Algorithm::Rs256] {
        let (private_key, public_key) = keys(algorithm);
        let signer = Signer::with_algorithm(algorithm, private_key).expect("valid private key");
        let parser = Parser::with_algorithm(algorithm, public_key).expect("valid public key");

        for size in [64, 1024, 16384] {
            let token = signer.sign(&payload(size)).expect("signing should succeed");
            group.throughput(Throughput::Bytes(token.len() as u64));
            group.bench_function(format!("{}_{size}", algorithm.name()), |b| {
                b.iter(|| parser.parse(black_box(&token)));
            });
        }
    }

    group.finish();
}

fn bench_rejection(c: &mut Criterion) {
    let signer = Signer::new(ES256_PRIVATE).expect("valid private key");
    let parser = Parser::new(ES256_PUBLIC).expect("valid public key");
    let token = signer.sign(&payload(256)).expect("signing should succeed");
    let tampered = format!("{token}x");

    let mut group = c.benchmark_group("reject");

    group.bench_function("too_short", |b| {
        b.iter(|| parser.parse(black_box("short")));
    });
    group.bench_function("bad_signature", |b| {
        b.iter(|| parser.parse(black_box(&tampered)));
    });

    group.finish();
}

fn bench_async_parse(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .build()
        .expect("tokio runtime");
    let signer = Signer::new(ES256_PRIVATE).expect("valid private key");
    let parser = Parser::new(ES256_PUBLIC).expect("valid public key");
    let async_parser = AsyncParser::from(parser.clone());
    let token = signer.sign(&payload(256)).expect("signing should succeed");

    let mut group = c.benchmark_group("async_parse");

    group.bench_function("sync_inline", |b| {
        b.iter(|| parser.parse(black_box(&token)));
    });
    group.bench_function("blocking_pool", |b| {
        b.iter(|| runtime.block_on(async_parser.parse(black_box(&token))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_sign,
    bench_parse_by_size,
    bench_rejection,
    bench_async_parse
);
criterion_main!(benches);
