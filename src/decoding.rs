use std::fmt;

use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::algorithms::Algorithm;
use crate::binding::AlgorithmBinding;
use crate::errors::{Error, ErrorKind, Malformed, Result};
use crate::grants::Grants;
use crate::header::Header;
use crate::serialization::{b64_decode, b64_decode_exact};
use crate::validation::Validation;

/// A key to verify token signatures with.
///
/// Holds its own copy of the key bytes, wiped when dropped.
#[derive(Clone)]
pub struct DecodingKey {
    content: Zeroizing<Vec<u8>>,
}

impl DecodingKey {
    /// If you're using HMAC, use this.
    pub fn from_secret(secret: &[u8]) -> Self {
        DecodingKey { content: Zeroizing::new(secret.to_vec()) }
    }

    /// If you're using HMAC with a base64 encoded secret, use this.
    pub fn from_base64_secret(secret: &str) -> Result<Self> {
        Ok(DecodingKey { content: Zeroizing::new(b64_decode(secret)?) })
    }

    /// Get the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }
}

impl fmt::Debug for DecodingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodingKey").field("len", &self.content.len()).finish_non_exhaustive()
    }
}

/// Supplies the verification key for the algorithm a token declares.
///
/// Only consulted for keyed algorithms that already passed the [`Validation`] allowlist.
pub trait KeyResolver {
    /// The key to verify `algorithm` signatures with, if any.
    fn resolve(&self, algorithm: Algorithm) -> Option<DecodingKey>;
}

impl KeyResolver for DecodingKey {
    fn resolve(&self, _: Algorithm) -> Option<DecodingKey> {
        Some(self.clone())
    }
}

impl<F> KeyResolver for F
where
    F: Fn(Algorithm) -> Option<DecodingKey>,
{
    fn resolve(&self, algorithm: Algorithm) -> Option<DecodingKey> {
        self(algorithm)
    }
}

/// The three segments of a compact token.
struct Segments<'a> {
    token: &'a str,
    header: &'a str,
    payload: &'a str,
    signature: &'a str,
}

impl<'a> Segments<'a> {
    fn split(token: &'a str) -> std::result::Result<Self, Malformed> {
        let mut parts = token.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(header), Some(payload), Some(signature), None) => {
                Ok(Segments { token, header, payload, signature })
            }
            _ => Err(Malformed::SegmentCount(token.split('.').count())),
        }
    }

    /// `b64(header) "." b64(payload)`, the bytes the signature covers.
    fn signing_input(&self) -> &'a str {
        &self.token[..self.header.len() + 1 + self.payload.len()]
    }
}

/// Decode and verify a token, returning its grants.
///
/// The steps run in a fixed order and the first failure rejects the token:
///
/// 1. the token must have exactly three `.`-separated segments (`MalformedToken`);
/// 2. header and payload must be valid base64url (`MalformedToken`);
/// 3. the header must be a JSON object naming a known `alg` (`MalformedToken`);
/// 4. that algorithm must be allowed by `validation` (`AlgorithmNotAllowed`);
/// 5. for keyed algorithms, `resolver` must supply a non-empty key (`KeyUnavailable`);
/// 6. the signature must match (`SignatureMismatch`);
/// 7. the payload must be a JSON object with non-empty claim names (`MalformedToken`).
///
/// An unsecured (`none`) token is only accepted when `validation` lists `none` explicitly,
/// and only with an empty signature segment.
///
/// ```rust
/// use grantjwt::{Algorithm, AlgorithmBinding, DecodingKey, Grants, Validation, decode, encode};
///
/// let mut grants = Grants::new();
/// grants.add("sub", "user0")?;
/// let token = encode(&grants, &AlgorithmBinding::keyed(Algorithm::HS384, b"secret")?)?;
///
/// let key = DecodingKey::from_secret(b"secret");
/// let decoded = decode(&token, &Validation::new(Algorithm::HS384), &key)?;
/// assert_eq!(decoded, grants);
/// # Ok::<(), grantjwt::errors::Error>(())
/// ```
pub fn decode<R>(token: &str, validation: &Validation, resolver: &R) -> Result<Grants>
where
    R: KeyResolver + ?Sized,
{
    verify_and_parse(token, validation, resolver).inspect_err(|err| {
        debug!(error = %err, status = err.status(), "rejected token");
    })
}

fn verify_and_parse<R>(token: &str, validation: &Validation, resolver: &R) -> Result<Grants>
where
    R: KeyResolver + ?Sized,
{
    let segments = Segments::split(token)?;
    let header = Header::from_encoded(segments.header)?;
    let payload = b64_decode(segments.payload)?;
    let alg = header.alg;

    if !validation.allows(alg) {
        return Err(ErrorKind::AlgorithmNotAllowed(alg).into());
    }

    let binding = if alg.is_keyed() {
        let key = resolver
            .resolve(alg)
            .filter(|key| !key.as_bytes().is_empty())
            .ok_or(ErrorKind::KeyUnavailable(alg))?;
        AlgorithmBinding::keyed(alg, key.as_bytes())?
    } else {
        AlgorithmBinding::none()
    };

    // Only the unpadded spelling `encode` writes can match.
    let signature = b64_decode_exact(segments.signature).map_err(|_| signature_mismatch())?;
    let allow_none = validation.allows(Algorithm::None);
    if !binding.verify(segments.signing_input().as_bytes(), &signature, alg, allow_none)? {
        return Err(signature_mismatch());
    }

    let grants = Grants::from_payload(&payload)?;
    trace!(%alg, grants = grants.len(), "verified token");
    Ok(grants)
}

fn signature_mismatch() -> Error {
    ErrorKind::SignatureMismatch.into()
}

/// Decode just the header of a token, without verifying anything.
///
/// Useful for picking a key or a policy before calling [`decode`]. Never make trust decisions
/// from the result.
pub fn decode_header(token: &str) -> Result<Header> {
    let segments = Segments::split(token)?;
    Header::from_encoded(segments.header)
}

/// Decode a token's grants without checking the algorithm allowlist or the signature.
///
/// The header must still be well formed.
pub fn insecure_decode(token: &str) -> Result<Grants> {
    let segments = Segments::split(token)?;
    Header::from_encoded(segments.header)?;
    let payload = b64_decode(segments.payload)?;
    Ok(Grants::from_payload(&payload)?)
}
