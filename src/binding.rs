use crate::algorithms::Algorithm;
use crate::crypto;
use crate::decoding::DecodingKey;
use crate::encoding::EncodingKey;
use crate::errors::{ErrorKind, Result};

/// A signing algorithm paired with its key material, validated as a unit.
///
/// The unsecured `none` algorithm takes no key; every keyed algorithm takes a non-empty
/// one. A binding owns a copy of its key, so the caller's buffer can be dropped or reused
/// right after construction.
///
/// Bindings are plain values: rebinding a token means assigning a new one, which drops the
/// previous key along with any state derived from it.
#[derive(Debug, Clone, Default)]
pub struct AlgorithmBinding {
    algorithm: Algorithm,
    key: Option<EncodingKey>,
}

impl AlgorithmBinding {
    /// The unsecured binding: algorithm `none`, no key. This is also the default.
    pub fn none() -> Self {
        Self::default()
    }

    /// Bind `algorithm` to `key`.
    ///
    /// Accepts exactly `(none, None)` and `(keyed, Some(non-empty))`.
    pub fn new(algorithm: Algorithm, key: Option<&[u8]>) -> Result<Self> {
        Self::validated(algorithm, key, key.map_or(0, <[u8]>::len))
    }

    /// Bind a keyed algorithm to a non-empty key.
    pub fn keyed(algorithm: Algorithm, key: &[u8]) -> Result<Self> {
        Self::new(algorithm, Some(key))
    }

    /// Bind from a numeric algorithm identifier, an optional key and a declared key length.
    ///
    /// Only `(none, None, 0)` and `(keyed, Some(key), n > 0)` are accepted, and `n` must be
    /// the length of `key`. Unknown identifiers are rejected whatever the key.
    pub fn from_raw_parts(id: u32, key: Option<&[u8]>, key_len: usize) -> Result<Self> {
        let algorithm = Algorithm::from_id(id)?;
        if let Some(key) = key.filter(|key| key.len() != key_len) {
            return Err(invalid(format!(
                "declared key length {key_len} does not match key of {} bytes",
                key.len()
            )));
        }
        Self::validated(algorithm, key, key_len)
    }

    fn validated(algorithm: Algorithm, key: Option<&[u8]>, key_len: usize) -> Result<Self> {
        match (algorithm.is_keyed(), key) {
            (false, None) if key_len == 0 => Ok(Self::none()),
            (false, _) => Err(invalid("algorithm `none` takes no key".to_owned())),
            (true, Some(key)) if key_len > 0 => {
                Ok(Self { algorithm, key: Some(EncodingKey::from_secret(key)) })
            }
            (true, _) => Err(invalid(format!("algorithm `{algorithm}` requires a non-empty key"))),
        }
    }

    /// The bound algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The bound key, absent for `none`.
    pub fn key(&self) -> Option<&EncodingKey> {
        self.key.as_ref()
    }

    /// Sign `signing_input`, the `b64(header) "." b64(payload)` bytes.
    ///
    /// `none` produces an empty signature. Backend failures, including algorithms with no
    /// registered primitive, are `EncodingFailure`.
    pub fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>> {
        match &self.key {
            None => Ok(Vec::new()),
            Some(key) => crypto::sign(signing_input, key, self.algorithm),
        }
    }

    /// Check `signature` over `signing_input` for a token that declared `expected`.
    ///
    /// Returns `false` whenever `expected` is not the bound algorithm. An unsecured token only
    /// verifies if `allow_none` is set and the signature is empty. Keyed signatures are
    /// recomputed and compared in constant time by the backend.
    pub fn verify(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        expected: Algorithm,
        allow_none: bool,
    ) -> Result<bool> {
        if expected != self.algorithm {
            return Ok(false);
        }
        match &self.key {
            None => Ok(allow_none && signature.is_empty()),
            Some(key) => {
                let key = DecodingKey::from_secret(key.inner());
                crypto::verify(signature, signing_input, &key, self.algorithm)
            }
        }
    }
}

fn invalid(reason: String) -> crate::errors::Error {
    ErrorKind::InvalidArgument(reason).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"012345678901234567890123456789XY012345678901234567890123456789XY";

    fn assert_invalid(result: Result<AlgorithmBinding>) {
        match result {
            Err(err) => assert!(matches!(err.kind(), ErrorKind::InvalidArgument(_)), "{err}"),
            Ok(binding) => panic!("accepted {binding:?}"),
        }
    }

    #[test]
    fn rejects_every_invalid_shape() {
        let hs512 = Algorithm::HS512.id();
        let none = Algorithm::None.id();
        assert_invalid(AlgorithmBinding::from_raw_parts(hs512, None, 0));
        assert_invalid(AlgorithmBinding::from_raw_parts(hs512, None, KEY.len()));
        assert_invalid(AlgorithmBinding::from_raw_parts(hs512, Some(KEY), 0));
        assert_invalid(AlgorithmBinding::from_raw_parts(none, Some(KEY), KEY.len()));
        assert_invalid(AlgorithmBinding::from_raw_parts(none, Some(KEY), 0));
        assert_invalid(AlgorithmBinding::from_raw_parts(none, None, KEY.len()));
        assert_invalid(AlgorithmBinding::from_raw_parts(999, None, 0));
    }

    #[test]
    fn accepts_only_matching_shapes() {
        let binding = AlgorithmBinding::from_raw_parts(Algorithm::None.id(), None, 0).unwrap();
        assert_eq!(binding.algorithm(), Algorithm::None);
        assert!(binding.key().is_none());

        let binding =
            AlgorithmBinding::from_raw_parts(Algorithm::HS512.id(), Some(KEY), KEY.len()).unwrap();
        assert_eq!(binding.algorithm(), Algorithm::HS512);
        assert_eq!(binding.key().map(EncodingKey::inner), Some(KEY));
    }

    #[test]
    fn typed_constructor_applies_same_rules() {
        assert_invalid(AlgorithmBinding::new(Algorithm::HS256, None));
        assert_invalid(AlgorithmBinding::new(Algorithm::HS256, Some(b"".as_slice())));
        assert_invalid(AlgorithmBinding::new(Algorithm::None, Some(b"".as_slice())));
        assert_invalid(AlgorithmBinding::new(Algorithm::None, Some(KEY)));
        assert_invalid(AlgorithmBinding::keyed(Algorithm::None, KEY));
        assert!(AlgorithmBinding::new(Algorithm::None, None).is_ok());
        assert!(AlgorithmBinding::keyed(Algorithm::HS384, KEY).is_ok());
    }

    #[test]
    fn declared_length_must_match_key() {
        assert_invalid(AlgorithmBinding::from_raw_parts(Algorithm::HS256.id(), Some(KEY), 32));
    }

    #[test]
    fn key_is_copied() {
        let mut buffer = KEY.to_vec();
        let binding = AlgorithmBinding::keyed(Algorithm::HS256, &buffer).unwrap();
        buffer.fill(0);
        drop(buffer);
        assert_eq!(binding.key().map(EncodingKey::inner), Some(KEY));
    }

    #[test]
    fn none_signs_empty_and_verifies_only_when_allowed() {
        let binding = AlgorithmBinding::none();
        assert!(binding.sign(b"input").unwrap().is_empty());
        assert!(binding.verify(b"input", b"", Algorithm::None, true).unwrap());
        assert!(!binding.verify(b"input", b"", Algorithm::None, false).unwrap());
        assert!(!binding.verify(b"input", b"sig", Algorithm::None, true).unwrap());
        assert!(!binding.verify(b"input", b"", Algorithm::HS256, true).unwrap());
    }

    #[cfg(any(feature = "rust_crypto", feature = "aws_lc_rs"))]
    #[test]
    fn keyed_sign_then_verify() {
        crypto::install_test_provider();
        for alg in [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512] {
            let binding = AlgorithmBinding::keyed(alg, KEY).unwrap();
            let signature = binding.sign(b"input").unwrap();
            assert!(binding.verify(b"input", &signature, alg, false).unwrap());
            assert!(!binding.verify(b"inpuT", &signature, alg, false).unwrap());
            assert!(!binding.verify(b"input", &signature[1..], alg, false).unwrap());
            assert!(!binding.verify(b"input", &signature, Algorithm::None, true).unwrap());
        }
    }
}
