//! The cryptography of the `grantjwt` crate is decoupled behind
//! [`JwtSigner`] and [`JwtVerifier`] traits. These make use of `signature`'s
//! [`Signer`] and [`Verifier`] traits respectively.
//! Crypto provider selection is handled by [`CryptoProvider`].
//!
//! [`JwtSigner`]: crate::crypto::JwtSigner
//! [`JwtVerifier`]: crate::crypto::JwtVerifier
//! [`Signer`]: signature::Signer
//! [`Verifier`]: signature::Verifier
//! [`CryptoProvider`]: crate::crypto::CryptoProvider

use std::sync::Arc;

use crate::algorithms::Algorithm;
use crate::errors::{ErrorKind, Result};
use crate::{DecodingKey, EncodingKey};

#[macro_use]
mod macros;

/// `aws_lc_rs` based CryptoProvider.
#[cfg(feature = "aws_lc_rs")]
pub mod aws_lc;

/// `RustCrypto` based CryptoProvider.
#[cfg(feature = "rust_crypto")]
pub mod rust_crypto;

use signature::{Signer, Verifier};

/// Trait providing the functionality to sign a JWT.
///
/// Allows an arbitrary crypto backend to be provided.
pub trait JwtSigner: Signer<Vec<u8>> {
    /// Return the [`Algorithm`] corresponding to the signing module.
    fn algorithm(&self) -> Algorithm;
}

/// Trait providing the functionality to verify a JWT.
///
/// Allows an arbitrary crypto backend to be provided.
pub trait JwtVerifier: Verifier<Vec<u8>> {
    /// Return the [`Algorithm`] corresponding to the signing module.
    fn algorithm(&self) -> Algorithm;
}

/// Sign `message` with `key` using the given keyed algorithm and return the raw signature.
///
/// If you just want to encode a JWT, use `encode` instead.
pub fn sign(message: &[u8], key: &EncodingKey, algorithm: Algorithm) -> Result<Vec<u8>> {
    let provider = CryptoProvider::get_default_or_install_from_crate_features()?;
    let signer = (provider.signer_factory)(&algorithm, key)?;
    signer.try_sign(message).map_err(|e| {
        ErrorKind::EncodingFailure(format!("{algorithm} signing failed: {e}")).into()
    })
}

/// Compares the signature given with a re-computed signature for HMAC.
///
/// The comparison is done by the backend in constant time.
/// If you just want to decode a JWT, use `decode` instead.
///
/// `signature` is the raw (base64url-decoded) signature of a token.
///
/// `message` is base64(header) + "." + base64(claims)
pub fn verify(
    signature: &[u8],
    message: &[u8],
    key: &DecodingKey,
    algorithm: Algorithm,
) -> Result<bool> {
    let provider = CryptoProvider::get_default_or_install_from_crate_features()?;
    let verifier = (provider.verifier_factory)(&algorithm, key)?;
    Ok(verifier.verify(message, &signature.to_vec()).is_ok())
}

/// Error for an algorithm without a primitive in the active provider.
pub(crate) fn unsupported(algorithm: &Algorithm) -> crate::errors::Error {
    ErrorKind::EncodingFailure(format!("no primitive registered for `{algorithm}`")).into()
}

/// Controls the cryptography used by grantjwt.
///
/// You can either install one of the built-in options:
/// - [`crypto::aws_lc::DEFAULT_PROVIDER`]: (behind the `aws_lc_rs` crate feature).
///   This provider uses the [aws-lc-rs](https://github.com/aws/aws-lc-rs) crate.
/// - [`crypto::rust_crypto::DEFAULT_PROVIDER`]: (behind the `rust_crypto` crate feature)
///   This provider uses crates from the [Rust Crypto](https://github.com/RustCrypto) project.
///
/// or provide your own custom implementation of `CryptoProvider`
/// (see the `custom_provider` demo).
// The install-once default follows the shape of the `rustls` CryptoProvider.
#[derive(Clone, Debug)]
pub struct CryptoProvider {
    /// A function that produces a [`JwtSigner`] for a given [`Algorithm`]
    pub signer_factory: fn(&Algorithm, &EncodingKey) -> Result<Box<dyn JwtSigner>>,
    /// A function that produces a [`JwtVerifier`] for a given [`Algorithm`]
    pub verifier_factory: fn(&Algorithm, &DecodingKey) -> Result<Box<dyn JwtVerifier>>,
}

impl CryptoProvider {
    /// Set this `CryptoProvider` as the default for this process.
    ///
    /// This can be called successfully at most once in any process execution.
    pub fn install_default(self) -> std::result::Result<(), Arc<Self>> {
        static_default::install_default(self)
    }

    /// Get the default `CryptoProvider` for this process.
    ///
    /// This will be `None` if no default has been set yet.
    pub fn get_default() -> Option<&'static Arc<Self>> {
        static_default::get_default()
    }

    /// Get the default if it has been set yet, or install one based on the crate features.
    pub(crate) fn get_default_or_install_from_crate_features() -> Result<&'static Arc<Self>> {
        if let Some(provider) = Self::get_default() {
            return Ok(provider);
        }

        let provider = Self::from_crate_features().ok_or_else(|| {
            ErrorKind::EncodingFailure(
                "no process-level CryptoProvider: call CryptoProvider::install_default() or \
                 enable exactly one of the 'rust_crypto' and 'aws_lc_rs' features"
                    .to_owned(),
            )
        })?;
        // Losing an install race is fine, the winner is used.
        let _ = provider.install_default();
        Self::get_default().ok_or_else(|| {
            ErrorKind::EncodingFailure("CryptoProvider installation failed".to_owned()).into()
        })
    }

    /// Determine a `CryptoProvider` based on crate features.
    pub fn from_crate_features() -> Option<Self> {
        #[cfg(all(
            feature = "rust_crypto",
            not(feature = "aws_lc_rs"),
            not(feature = "custom-provider")
        ))]
        {
            return Some(rust_crypto::DEFAULT_PROVIDER);
        }

        #[cfg(all(
            feature = "aws_lc_rs",
            not(feature = "rust_crypto"),
            not(feature = "custom-provider")
        ))]
        {
            return Some(aws_lc::DEFAULT_PROVIDER);
        }

        #[allow(unreachable_code)]
        None
    }
}

mod static_default {
    use std::sync::{Arc, OnceLock};

    use super::CryptoProvider;

    static PROCESS_DEFAULT_PROVIDER: OnceLock<Arc<CryptoProvider>> = OnceLock::new();

    pub(crate) fn install_default(
        default_provider: CryptoProvider,
    ) -> Result<(), Arc<CryptoProvider>> {
        PROCESS_DEFAULT_PROVIDER.set(Arc::new(default_provider))
    }

    pub(crate) fn get_default() -> Option<&'static Arc<CryptoProvider>> {
        PROCESS_DEFAULT_PROVIDER.get()
    }
}

/// Install a built-in provider for unit tests, whatever else the crate features select.
#[cfg(all(test, any(feature = "rust_crypto", feature = "aws_lc_rs")))]
pub(crate) fn install_test_provider() {
    #[cfg(feature = "rust_crypto")]
    let _ = CryptoProvider::install_default(rust_crypto::DEFAULT_PROVIDER);
    #[cfg(all(feature = "aws_lc_rs", not(feature = "rust_crypto")))]
    let _ = CryptoProvider::install_default(aws_lc::DEFAULT_PROVIDER);
}
