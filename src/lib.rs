//! Create and verify JWTs (JSON Web Tokens) whose text is byte-for-byte deterministic.
//!
//! Grants are stored sorted by name and serialized canonically, so equal grants signed with
//! an equal [`AlgorithmBinding`] always encode to the same token. Decoding only verifies
//! algorithms the caller allows through [`Validation`]; the unsecured `none` algorithm must be
//! allowed explicitly.
//!
//! ```rust
//! use grantjwt::{Algorithm, DecodingKey, Jwt, Validation, decode};
//!
//! let key = b"012345678901234567890123456789XY";
//!
//! let mut jwt = Jwt::new();
//! jwt.add_grant("sub", "user0")?;
//! jwt.add_grant("iat", 1475980545_i64)?;
//! jwt.set_alg(Algorithm::HS256, Some(key.as_slice()))?;
//! let token = jwt.encode()?;
//!
//! let validation = Validation::new(Algorithm::HS256);
//! let grants = decode(&token, &validation, &DecodingKey::from_secret(key))?;
//! assert_eq!(&grants, jwt.grants());
//! # Ok::<(), grantjwt::errors::Error>(())
//! ```

#![deny(missing_docs)]

pub use algorithms::{Algorithm, AlgorithmFamily};
pub use binding::AlgorithmBinding;
pub use decoding::{DecodingKey, KeyResolver, decode, decode_header};
pub use encoding::{EncodingKey, encode, encode_to};
pub use grants::{Grant, Grants};
pub use header::Header;
pub use jwt::Jwt;
pub use validation::Validation;

/// Things needed to implement a custom crypto provider.
#[cfg(feature = "custom-provider")]
pub mod custom_provider {
    pub use signature::{Error, Signer, Verifier};
}

/// Dangerous decoding functions that should be audited and used with extreme care.
pub mod dangerous {
    pub use super::decoding::insecure_decode;
}

mod algorithms;
mod binding;
/// Lower level functions, if you want to do something other than JWTs
pub mod crypto;
mod decoding;
mod encoding;
/// All the errors that can be encountered while building, encoding or decoding JWTs
pub mod errors;
pub mod grants;
mod header;
mod jwt;
mod serialization;
mod validation;
