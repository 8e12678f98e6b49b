use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, ErrorKind, Result};

/// The family of cryptographic primitive an [`Algorithm`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmFamily {
    /// The unsecured `none` algorithm. Takes no key and produces no signature.
    Unsecured,
    /// HMAC with a shared secret.
    Hmac,
    /// RSA signatures. Reserved: no built-in provider registers a primitive for it.
    Rsa,
    /// ECDSA signatures. Reserved: no built-in provider registers a primitive for it.
    Ec,
}

/// The algorithms known to the token header.
///
/// The numeric identifiers returned by [`Algorithm::id`] are stable and are what
/// [`Algorithm::from_id`] accepts.
#[derive(Debug, Default, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Algorithm {
    /// No signature at all. Only ever accepted on decode when explicitly allowed.
    #[default]
    #[serde(rename = "none")]
    None,
    /// HMAC using SHA-256
    HS256,
    /// HMAC using SHA-384
    HS384,
    /// HMAC using SHA-512
    HS512,
    /// RSASSA-PKCS1-v1_5 using SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 using SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 using SHA-512
    RS512,
    /// ECDSA using SHA-256
    ES256,
    /// ECDSA using SHA-384
    ES384,
    /// ECDSA using SHA-512
    ES512,
}

impl Algorithm {
    const ALL: [Algorithm; 10] = [
        Algorithm::None,
        Algorithm::HS256,
        Algorithm::HS384,
        Algorithm::HS512,
        Algorithm::RS256,
        Algorithm::RS384,
        Algorithm::RS512,
        Algorithm::ES256,
        Algorithm::ES384,
        Algorithm::ES512,
    ];

    /// The stable numeric identifier of this algorithm.
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// Look an algorithm up by its numeric identifier.
    pub fn from_id(id: u32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.id() == id)
            .ok_or_else(|| ErrorKind::InvalidArgument(format!("unknown algorithm id {id}")).into())
    }

    /// The name used in the `alg` header member.
    pub const fn as_str(self) -> &'static str {
        match self {
            Algorithm::None => "none",
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
            Algorithm::RS256 => "RS256",
            Algorithm::RS384 => "RS384",
            Algorithm::RS512 => "RS512",
            Algorithm::ES256 => "ES256",
            Algorithm::ES384 => "ES384",
            Algorithm::ES512 => "ES512",
        }
    }

    /// The primitive family of this algorithm.
    pub const fn family(self) -> AlgorithmFamily {
        match self {
            Algorithm::None => AlgorithmFamily::Unsecured,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => AlgorithmFamily::Hmac,
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => AlgorithmFamily::Rsa,
            Algorithm::ES256 | Algorithm::ES384 | Algorithm::ES512 => AlgorithmFamily::Ec,
        }
    }

    /// Whether the algorithm requires key material.
    pub const fn is_keyed(self) -> bool {
        !matches!(self, Algorithm::None)
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| ErrorKind::InvalidArgument(format!("unknown algorithm `{s}`")).into())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
