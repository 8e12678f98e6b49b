//! Helpers shared by the integration tests.

use grantjwt::crypto::CryptoProvider;

/// Install a built-in provider as the process default.
///
/// With `custom-provider` enabled nothing is picked from the crate features, so tests that
/// sign or verify install one themselves. Installing twice keeps the first one.
pub fn install_provider() {
    #[cfg(feature = "rust_crypto")]
    let _ = CryptoProvider::install_default(grantjwt::crypto::rust_crypto::DEFAULT_PROVIDER);
    #[cfg(all(feature = "aws_lc_rs", not(feature = "rust_crypto")))]
    let _ = CryptoProvider::install_default(grantjwt::crypto::aws_lc::DEFAULT_PROVIDER);
}
