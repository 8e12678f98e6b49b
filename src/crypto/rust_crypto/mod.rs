use crate::{
    Algorithm, DecodingKey, EncodingKey,
    crypto::{CryptoProvider, JwtSigner, JwtVerifier},
    errors::Error,
};

mod hmac;

define_default_provider!("rust_crypto", "https://github.com/RustCrypto");
