#![cfg(any(feature = "rust_crypto", feature = "aws_lc_rs"))]

mod common;

use grantjwt::errors::ErrorKind;
use grantjwt::{Algorithm, AlgorithmBinding, AlgorithmFamily, Jwt};

const KEY: &[u8] = b"012345678901234567890123456789XY";

#[test]
fn binding_owns_its_key() {
    common::install_provider();
    let mut buffer = KEY.to_vec();
    let binding = AlgorithmBinding::keyed(Algorithm::HS256, &buffer).unwrap();
    let expected = binding.sign(b"input").unwrap();

    buffer.iter_mut().for_each(|b| *b = 0);
    drop(buffer);

    assert_eq!(binding.key().unwrap().inner(), KEY);
    assert_eq!(binding.sign(b"input").unwrap(), expected);
}

#[test]
fn every_keyed_algorithm_accepts_a_key() {
    for id in 1..=9 {
        let binding = AlgorithmBinding::from_raw_parts(id, Some(KEY), KEY.len()).unwrap();
        assert!(binding.algorithm().is_keyed());
        assert_eq!(binding.algorithm().id(), id);
    }
    let binding = AlgorithmBinding::from_raw_parts(0, None, 0).unwrap();
    assert_eq!(binding.algorithm(), Algorithm::None);
}

#[test]
fn declared_length_must_match_key() {
    let err = AlgorithmBinding::from_raw_parts(1, Some(KEY), KEY.len() - 1).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidArgument(_)));
}

#[test]
fn verify_checks_the_declared_algorithm() {
    common::install_provider();
    let binding = AlgorithmBinding::keyed(Algorithm::HS384, KEY).unwrap();
    let signature = binding.sign(b"header.payload").unwrap();
    assert_eq!(signature.len(), 48);

    assert!(binding.verify(b"header.payload", &signature, Algorithm::HS384, false).unwrap());
    assert!(!binding.verify(b"header.payload", &signature, Algorithm::HS256, false).unwrap());
    assert!(!binding.verify(b"header.payloaX", &signature, Algorithm::HS384, false).unwrap());
}

#[test]
fn unsecured_binding_verifies_only_when_allowed() {
    let binding = AlgorithmBinding::none();
    assert_eq!(binding.sign(b"anything").unwrap(), Vec::<u8>::new());
    assert!(!binding.verify(b"h.p", b"", Algorithm::None, false).unwrap());
    assert!(binding.verify(b"h.p", b"", Algorithm::None, true).unwrap());
    assert!(!binding.verify(b"h.p", b"x", Algorithm::None, true).unwrap());
}

#[test]
fn reserved_families_have_no_primitive() {
    common::install_provider();
    for alg in [Algorithm::RS512, Algorithm::ES256] {
        assert!(matches!(alg.family(), AlgorithmFamily::Rsa | AlgorithmFamily::Ec));
        let binding = AlgorithmBinding::keyed(alg, KEY).unwrap();
        let err = binding.sign(b"input").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::EncodingFailure(_)));
    }
}

#[test]
fn copied_instance_keeps_binding() {
    common::install_provider();
    let mut jwt = Jwt::new();
    jwt.add_grant("sub", "user0").unwrap();
    jwt.set_alg(Algorithm::HS512, Some(KEY)).unwrap();

    let copy = jwt.clone();
    jwt.set_alg(Algorithm::None, None).unwrap();

    assert_eq!(copy.alg(), Algorithm::HS512);
    assert_ne!(copy.encode().unwrap(), jwt.encode().unwrap());
}
