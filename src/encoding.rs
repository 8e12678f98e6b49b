use std::fmt;
use std::io::Write;

use tracing::trace;
use zeroize::Zeroizing;

use crate::binding::AlgorithmBinding;
use crate::errors::Result;
use crate::grants::Grants;
use crate::header::Header;
use crate::serialization::{b64_decode, b64_encode, b64_encode_part};

/// A key to sign tokens with.
///
/// Holds its own copy of the key bytes, wiped when dropped.
#[derive(Clone)]
pub struct EncodingKey {
    content: Zeroizing<Vec<u8>>,
}

impl EncodingKey {
    /// If you're using a HMAC secret that is not base64, use that.
    pub fn from_secret(secret: &[u8]) -> Self {
        EncodingKey { content: Zeroizing::new(secret.to_vec()) }
    }

    /// If you have a base64 HMAC secret, use that.
    pub fn from_base64_secret(secret: &str) -> Result<Self> {
        Ok(EncodingKey { content: Zeroizing::new(b64_decode(secret)?) })
    }

    /// Get the raw key bytes, for use by a [`CryptoProvider`](crate::crypto::CryptoProvider).
    pub fn inner(&self) -> &[u8] {
        &self.content
    }
}

impl fmt::Debug for EncodingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodingKey").field("len", &self.content.len()).finish_non_exhaustive()
    }
}

/// Encode `grants` into a token signed with `binding`.
///
/// The header is `{"alg":"none"}` for the unsecured binding and `{"alg":"X","typ":"JWT"}`
/// otherwise. Header and payload are serialized canonically, so equal grants and an equal
/// binding always produce the same text. Nothing is returned if signing fails.
///
/// ```rust
/// use grantjwt::{AlgorithmBinding, Algorithm, Grants, encode};
///
/// let mut grants = Grants::new();
/// grants.add("sub", "user0")?;
///
/// let binding = AlgorithmBinding::keyed(Algorithm::HS256, b"secret")?;
/// let token = encode(&grants, &binding)?;
/// assert!(token.starts_with("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9."));
/// # Ok::<(), grantjwt::errors::Error>(())
/// ```
pub fn encode(grants: &Grants, binding: &AlgorithmBinding) -> Result<String> {
    let header = Header::new(binding.algorithm());
    let encoded_header = b64_encode_part(&header)?;
    let encoded_grants = b64_encode_part(grants)?;
    let message = [encoded_header, encoded_grants].join(".");

    let signature = binding.sign(message.as_bytes())?;
    trace!(alg = %header.alg, grants = grants.len(), "encoded token");

    Ok([message, b64_encode(signature)].join("."))
}

/// Encode `grants` and write the whole token to `writer` in a single write.
///
/// Nothing is written if encoding fails. A failed write is reported, not retried.
pub fn encode_to<W: Write>(
    grants: &Grants,
    binding: &AlgorithmBinding,
    mut writer: W,
) -> Result<()> {
    let token = encode(grants, binding)?;
    writer.write_all(token.as_bytes())?;
    Ok(())
}
