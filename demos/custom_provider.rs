use grantjwt::{
    Algorithm, AlgorithmBinding, DecodingKey, EncodingKey, Grants, Validation,
    crypto::{CryptoProvider, JwtSigner, JwtVerifier},
    custom_provider::{Error as SigError, Signer, Verifier},
    decode, encode,
    errors::{Error, ErrorKind},
};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn new_signer(algorithm: &Algorithm, key: &EncodingKey) -> Result<Box<dyn JwtSigner>, Error> {
    let jwt_signer = match algorithm {
        Algorithm::HS256 => Box::new(Hs256Signer::new(key.inner())?) as Box<dyn JwtSigner>,
        other => {
            return Err(ErrorKind::EncodingFailure(format!("{other} is not supported")).into());
        }
    };

    Ok(jwt_signer)
}

fn new_verifier(algorithm: &Algorithm, key: &DecodingKey) -> Result<Box<dyn JwtVerifier>, Error> {
    let jwt_verifier = match algorithm {
        Algorithm::HS256 => {
            Box::new(Hs256Verifier(Hs256Signer::new(key.as_bytes())?)) as Box<dyn JwtVerifier>
        }
        other => {
            return Err(ErrorKind::EncodingFailure(format!("{other} is not supported")).into());
        }
    };

    Ok(jwt_verifier)
}

struct Hs256Signer(HmacSha256);

impl Hs256Signer {
    fn new(key: &[u8]) -> Result<Self, Error> {
        let mac = HmacSha256::new_from_slice(key)
            .map_err(|e| ErrorKind::InvalidArgument(e.to_string()))?;
        Ok(Self(mac))
    }
}

impl Signer<Vec<u8>> for Hs256Signer {
    fn try_sign(&self, msg: &[u8]) -> std::result::Result<Vec<u8>, SigError> {
        let mut mac = self.0.clone();
        mac.update(msg);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

impl JwtSigner for Hs256Signer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::HS256
    }
}

struct Hs256Verifier(Hs256Signer);

impl Verifier<Vec<u8>> for Hs256Verifier {
    fn verify(&self, msg: &[u8], signature: &Vec<u8>) -> std::result::Result<(), SigError> {
        let mut mac = self.0.0.clone();
        mac.update(msg);
        mac.verify_slice(signature).map_err(|_| SigError::new())
    }
}

impl JwtVerifier for Hs256Verifier {
    fn algorithm(&self) -> Algorithm {
        Algorithm::HS256
    }
}

fn main() {
    // create and install our custom provider
    let my_crypto_provider =
        CryptoProvider { signer_factory: new_signer, verifier_factory: new_verifier };
    my_crypto_provider.install_default().unwrap();

    let key = b"012345678901234567890123456789XY";

    let mut grants = Grants::new();
    grants.add("sub", "me").unwrap();
    grants.add("exp", 10000000000_i64).unwrap();

    // our crypto provider only supports HS256
    let binding = AlgorithmBinding::keyed(Algorithm::HS256, key).unwrap();

    let token = match encode(&grants, &binding) {
        Ok(t) => t,
        Err(_) => panic!(), // in practice you would return an error
    };
    println!("{token}");

    let decoded = match decode(
        &token,
        &Validation::new(Algorithm::HS256),
        &DecodingKey::from_secret(key),
    ) {
        Ok(g) => g,
        Err(_) => panic!(),
    };

    assert_eq!(grants, decoded);

    // anything else is refused by the provider
    let binding = AlgorithmBinding::keyed(Algorithm::HS512, key).unwrap();
    assert!(encode(&grants, &binding).is_err());
}
