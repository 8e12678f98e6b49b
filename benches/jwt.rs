//! Encode and decode throughput.
//!
//! Run with:
//! ```bash
//! cargo bench --bench jwt
//! ```

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use grantjwt::{Algorithm, AlgorithmBinding, DecodingKey, Grants, Validation, decode, encode};

const KEY: &[u8] = b"012345678901234567890123456789XY012345678901234567890123456789XY";

fn sample_grants() -> Grants {
    let mut grants = Grants::new();
    grants.add("iss", "files.cyphre.com").unwrap();
    grants.add("sub", "user0").unwrap();
    grants.add("ref", "XXXX-YYYY-ZZZZ-AAAA-CCCC").unwrap();
    grants.add("iat", 1475980545_i64).unwrap();
    grants.extend_from_json(r#"{"scope":{"read":true,"write":["a","b"]}}"#).unwrap();
    grants
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let grants = sample_grants();

    for alg in [Algorithm::None, Algorithm::HS256, Algorithm::HS512] {
        let binding = if alg.is_keyed() {
            AlgorithmBinding::keyed(alg, KEY).unwrap()
        } else {
            AlgorithmBinding::none()
        };
        group.bench_with_input(BenchmarkId::from_parameter(alg), &binding, |b, binding| {
            b.iter(|| black_box(encode(&grants, binding).unwrap()));
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let grants = sample_grants();
    let key = DecodingKey::from_secret(KEY);

    for alg in [Algorithm::HS256, Algorithm::HS512] {
        let token = encode(&grants, &AlgorithmBinding::keyed(alg, KEY).unwrap()).unwrap();
        let validation = Validation::new(alg);
        group.bench_with_input(BenchmarkId::from_parameter(alg), &token, |b, token| {
            b.iter(|| black_box(decode(token, &validation, &key).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
