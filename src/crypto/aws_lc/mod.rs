use crate::{
    Algorithm, DecodingKey, EncodingKey,
    crypto::{CryptoProvider, JwtSigner, JwtVerifier},
    errors::Error,
};

mod hmac;

define_default_provider!("aws_lc_rs", "https://github.com/aws/aws-lc-rs");
