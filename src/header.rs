use serde::Serialize;
use serde_json::Value;

use crate::algorithms::Algorithm;
use crate::errors::{Malformed, Result};
use crate::serialization::b64_decode;

/// The `typ` value written for every signed token.
const JWT_TYPE: &str = "JWT";

/// A token header.
///
/// Serializes as `{"alg":"none"}` for unsecured tokens and as `{"alg":"X","typ":"JWT"}`
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Header {
    /// The algorithm used to sign the token.
    pub alg: Algorithm,
    /// The media type; present only when `alg` is not `none`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl Header {
    /// The header written for tokens signed with `alg`.
    pub fn new(alg: Algorithm) -> Self {
        let typ = alg.is_keyed().then(|| JWT_TYPE.to_owned());
        Self { alg, typ }
    }

    /// Parse a base64url-encoded header segment.
    ///
    /// Members other than `alg` and `typ` are ignored.
    pub(crate) fn from_encoded<T: AsRef<[u8]>>(encoded_part: T) -> Result<Self> {
        let decoded = b64_decode(encoded_part)?;
        let value: Value = serde_json::from_slice(&decoded).map_err(Malformed::Json)?;
        let Value::Object(mut members) = value else {
            return Err(Malformed::NotAnObject.into());
        };
        let alg = match members.remove("alg") {
            None | Some(Value::Null) => return Err(Malformed::MissingAlgorithm.into()),
            Some(Value::String(name)) => {
                name.parse::<Algorithm>().map_err(|_| Malformed::UnknownAlgorithm(name))?
            }
            Some(other) => return Err(Malformed::UnknownAlgorithm(other.to_string()).into()),
        };
        let typ = match members.remove("typ") {
            Some(Value::String(typ)) => Some(typ),
            _ => None,
        };
        Ok(Self { alg, typ })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::serialization::{b64_encode, to_canonical_json};

    #[test]
    fn none_header_has_no_typ() {
        let json = to_canonical_json(&Header::new(Algorithm::None)).unwrap();
        assert_eq!(json, br#"{"alg":"none"}"#);
    }

    #[test]
    fn keyed_header_has_jwt_typ() {
        let json = to_canonical_json(&Header::new(Algorithm::HS256)).unwrap();
        assert_eq!(json, br#"{"alg":"HS256","typ":"JWT"}"#);
    }

    #[test]
    fn parses_encoded_header() {
        let header = Header::from_encoded("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9").unwrap();
        assert_eq!(header, Header::new(Algorithm::HS256));

        let header = Header::from_encoded(b64_encode(r#"{"kid":"k1","alg":"none"}"#)).unwrap();
        assert_eq!(header.alg, Algorithm::None);
        assert_eq!(header.typ, None);
    }

    #[test]
    fn rejects_missing_or_unknown_alg() {
        let err = Header::from_encoded(b64_encode(r#"{"typ":"JWT"}"#)).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::MalformedToken(Malformed::MissingAlgorithm)));

        let err = Header::from_encoded(b64_encode(r#"{"alg":"PS256"}"#)).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::MalformedToken(Malformed::UnknownAlgorithm(a)) if a == "PS256"
        ));

        let err = Header::from_encoded(b64_encode(r#"["none"]"#)).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::MalformedToken(Malformed::NotAnObject)));

        let err = Header::from_encoded(b64_encode("{alg")).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::MalformedToken(Malformed::Json(_))));
    }
}
