#[cfg(any(feature = "rust_crypto", feature = "aws_lc_rs"))]
macro_rules! define_default_provider {
    ($name:literal, $link:literal) => {
        #[doc = concat!("The default [`CryptoProvider`] backed by [`", $name, "`]")]
        #[doc = ""]
        #[doc = concat!("[`", $name, "`]: ", $link)]
        pub const DEFAULT_PROVIDER: CryptoProvider =
            CryptoProvider { signer_factory: new_signer, verifier_factory: new_verifier };

        #[doc = "Create a new [`JwtSigner`] for a given [`Algorithm`]."]
        #[doc = ""]
        #[doc = "Only the HMAC family is registered, anything else is an `EncodingFailure`."]
        pub fn new_signer(
            algorithm: &Algorithm,
            key: &EncodingKey,
        ) -> Result<Box<dyn JwtSigner>, Error> {
            let jwt_signer = match algorithm {
                Algorithm::HS256 => Box::new(hmac::Hs256Signer::new(key)?) as Box<dyn JwtSigner>,
                Algorithm::HS384 => Box::new(hmac::Hs384Signer::new(key)?) as Box<dyn JwtSigner>,
                Algorithm::HS512 => Box::new(hmac::Hs512Signer::new(key)?) as Box<dyn JwtSigner>,
                Algorithm::None
                | Algorithm::RS256
                | Algorithm::RS384
                | Algorithm::RS512
                | Algorithm::ES256
                | Algorithm::ES384
                | Algorithm::ES512 => return Err(crate::crypto::unsupported(algorithm)),
            };

            Ok(jwt_signer)
        }

        #[doc = "Create a new [`JwtVerifier`] for a given [`Algorithm`]."]
        pub fn new_verifier(
            algorithm: &Algorithm,
            key: &DecodingKey,
        ) -> Result<Box<dyn JwtVerifier>, Error> {
            let jwt_verifier = match algorithm {
                Algorithm::HS256 => {
                    Box::new(hmac::Hs256Verifier::new(key)?) as Box<dyn JwtVerifier>
                }
                Algorithm::HS384 => {
                    Box::new(hmac::Hs384Verifier::new(key)?) as Box<dyn JwtVerifier>
                }
                Algorithm::HS512 => {
                    Box::new(hmac::Hs512Verifier::new(key)?) as Box<dyn JwtVerifier>
                }
                Algorithm::None
                | Algorithm::RS256
                | Algorithm::RS384
                | Algorithm::RS512
                | Algorithm::ES256
                | Algorithm::ES384
                | Algorithm::ES512 => return Err(crate::crypto::unsupported(algorithm)),
            };

            Ok(jwt_verifier)
        }
    };
}
