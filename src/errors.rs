use std::error::Error as StdError;
use std::fmt;
use std::io;

use thiserror::Error as ThisError;

use crate::algorithms::Algorithm;

/// A crate private constructor for `Error`.
pub(crate) fn new_error(kind: ErrorKind) -> Error {
    Error(Box::new(kind))
}

/// A type alias for `Result<T, grantjwt::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur when building, encoding or decoding a token.
///
/// Every failure is returned by value to the immediate caller. Nothing is retried and no
/// partially built token is ever produced.
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    /// Return the specific type of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Unwrap this error into its underlying type.
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// A stable process-level status for hosts that report failures as exit codes.
    ///
    /// `0` is never returned.
    pub fn status(&self) -> i32 {
        match self.kind() {
            ErrorKind::InvalidArgument(_) => 2,
            ErrorKind::EncodingFailure(_) => 3,
            ErrorKind::MalformedToken(_) => 4,
            ErrorKind::AlgorithmNotAllowed(_) => 5,
            ErrorKind::KeyUnavailable(_) => 6,
            ErrorKind::SignatureMismatch => 7,
            ErrorKind::NotFound(_) => 8,
            ErrorKind::Io(_) => 9,
        }
    }
}

/// The specific type of an error.
#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum ErrorKind {
    /// An empty claim name, a malformed algorithm/key pairing or an unknown algorithm id.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The signing backend or the serializer failed. No token text was produced.
    #[error("encoding failed: {0}")]
    EncodingFailure(String),
    /// The token text could not be split, decoded or parsed.
    #[error("malformed token: {0}")]
    MalformedToken(#[source] Malformed),
    /// The token declares an algorithm the caller did not allow.
    #[error("algorithm `{0}` is not allowed")]
    AlgorithmNotAllowed(Algorithm),
    /// The key resolver had no key for the declared keyed algorithm.
    #[error("no verification key available for `{0}`")]
    KeyUnavailable(Algorithm),
    /// The signature does not match the signing input.
    #[error("signature mismatch")]
    SignatureMismatch,
    /// A grant lookup missed.
    #[error("grant `{0}` not found")]
    NotFound(String),
    /// Writing an encoded token to a sink failed.
    #[error("failed to write token: {0}")]
    Io(#[source] io::Error),
}

/// Why a token was rejected as malformed.
#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum Malformed {
    /// The token did not split into exactly three segments.
    #[error("expected 3 segments, found {0}")]
    SegmentCount(usize),
    /// A segment was not valid base64url.
    #[error("invalid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    /// A segment was not valid JSON of the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The header has no `alg` member.
    #[error("header has no `alg`")]
    MissingAlgorithm,
    /// The header names an algorithm outside the known table.
    #[error("unrecognized algorithm `{0}`")]
    UnknownAlgorithm(String),
    /// The header or payload is valid JSON but not an object.
    #[error("segment is not a JSON object")]
    NotAnObject,
    /// The payload carries a claim with an empty name.
    #[error("payload contains an empty claim name")]
    EmptyClaimName,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        new_error(kind)
    }
}

impl From<Malformed> for Error {
    fn from(err: Malformed) -> Error {
        new_error(ErrorKind::MalformedToken(err))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Error {
        Malformed::Base64(err).into()
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        new_error(ErrorKind::Io(err))
    }
}
