use std::io::Write;

use crate::algorithms::Algorithm;
use crate::binding::AlgorithmBinding;
use crate::encoding;
use crate::errors::Result;
use crate::grants::{Grant, Grants};
use crate::header::Header;
use crate::serialization::{to_canonical_string, to_pretty_json};

/// A token under construction: a set of grants plus the algorithm binding that will sign it.
///
/// Starts with no grants and the unsecured `none` binding. Every call to [`Jwt::encode`]
/// builds the token text afresh from the current grants and binding.
///
/// `Jwt` is not meant to be shared between threads while being mutated; build one per token.
///
/// ```rust
/// use grantjwt::{Algorithm, Jwt};
///
/// let mut jwt = Jwt::new();
/// jwt.add_grant("iss", "files.cyphre.com")?;
/// jwt.add_grant("iat", 1475980545_i64)?;
/// jwt.set_alg(Algorithm::HS256, Some(b"012345678901234567890123456789XY".as_slice()))?;
///
/// let token = jwt.encode()?;
/// assert_eq!(token.split('.').count(), 3);
/// # Ok::<(), grantjwt::errors::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Jwt {
    grants: Grants,
    binding: AlgorithmBinding,
}

impl Jwt {
    /// An empty, unsecured token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of grants, e.g. one returned by [`decode`](crate::decode).
    pub fn from_grants(grants: Grants) -> Self {
        Self { grants, binding: AlgorithmBinding::none() }
    }

    /// The current grants.
    pub fn grants(&self) -> &Grants {
        &self.grants
    }

    /// Mutable access to the grants.
    pub fn grants_mut(&mut self) -> &mut Grants {
        &mut self.grants
    }

    /// Add or replace a grant. Fails if `name` is empty.
    pub fn add_grant(&mut self, name: impl Into<String>, value: impl Into<Grant>) -> Result<()> {
        self.grants.add(name, value)
    }

    /// Merge the members of a JSON object into the grants.
    pub fn add_grants_json(&mut self, json: &str) -> Result<()> {
        self.grants.extend_from_json(json)
    }

    /// Look a grant up by name.
    pub fn grant(&self, name: &str) -> Result<&Grant> {
        self.grants.get(name)
    }

    /// Look up a text grant.
    pub fn grant_str(&self, name: &str) -> Result<&str> {
        self.grants.get_str(name)
    }

    /// Look up an integer grant.
    pub fn grant_int(&self, name: &str) -> Result<i64> {
        self.grants.get_int(name)
    }

    /// Look up a boolean grant.
    pub fn grant_bool(&self, name: &str) -> Result<bool> {
        self.grants.get_bool(name)
    }

    /// Canonical JSON of one grant, or of all of them when `name` is `None`.
    pub fn grants_json(&self, name: Option<&str>) -> Result<String> {
        match name {
            Some(name) => self.grants.get(name)?.to_json(),
            None => self.grants.to_json(),
        }
    }

    /// Delete a grant. Absent names are ignored.
    pub fn del_grant(&mut self, name: &str) -> Option<Grant> {
        self.grants.remove(name)
    }

    /// Delete every grant.
    pub fn clear_grants(&mut self) {
        self.grants.clear();
    }

    /// Replace the algorithm binding.
    ///
    /// On failure the previous binding stays in place.
    pub fn set_alg(&mut self, algorithm: Algorithm, key: Option<&[u8]>) -> Result<()> {
        self.binding = AlgorithmBinding::new(algorithm, key)?;
        Ok(())
    }

    /// Replace the algorithm binding from a numeric identifier, key and declared key length.
    ///
    /// On failure the previous binding stays in place.
    pub fn set_alg_raw(&mut self, id: u32, key: Option<&[u8]>, key_len: usize) -> Result<()> {
        self.binding = AlgorithmBinding::from_raw_parts(id, key, key_len)?;
        Ok(())
    }

    /// Install an already validated binding.
    pub fn bind(&mut self, binding: AlgorithmBinding) {
        self.binding = binding;
    }

    /// The current binding.
    pub fn binding(&self) -> &AlgorithmBinding {
        &self.binding
    }

    /// The bound algorithm.
    pub fn alg(&self) -> Algorithm {
        self.binding.algorithm()
    }

    /// The header the next [`Jwt::encode`] will write.
    pub fn header(&self) -> Header {
        Header::new(self.alg())
    }

    /// Encode and sign the token.
    pub fn encode(&self) -> Result<String> {
        encoding::encode(&self.grants, &self.binding)
    }

    /// Encode the token and write it to `writer` in one write.
    pub fn encode_to<W: Write>(&self, writer: W) -> Result<()> {
        encoding::encode_to(&self.grants, &self.binding, writer)
    }

    /// Render `header "." payload` as JSON without signing, for inspection.
    ///
    /// With `pretty`, each object is indented; key order is the canonical one either way.
    pub fn dump(&self, pretty: bool) -> Result<String> {
        let header = self.header();
        let (header, grants) = if pretty {
            (to_pretty_json(&header)?, to_pretty_json(&self.grants)?)
        } else {
            (to_canonical_string(&header)?, to_canonical_string(&self.grants)?)
        };
        Ok(format!("{header}.{grants}"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::errors::ErrorKind;

    const KEY: &[u8] = b"012345678901234567890123456789XY";

    #[test]
    fn starts_unsecured() {
        let jwt = Jwt::new();
        assert_eq!(jwt.alg(), Algorithm::None);
        assert!(jwt.binding().key().is_none());
        assert_eq!(jwt.encode().unwrap(), "eyJhbGciOiJub25lIn0.e30.");
    }

    #[test]
    fn failed_rebinding_keeps_previous_binding() {
        let mut jwt = Jwt::new();
        jwt.set_alg(Algorithm::HS256, Some(KEY)).unwrap();
        let err = jwt.set_alg(Algorithm::HS512, None).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument(_)));
        assert_eq!(jwt.alg(), Algorithm::HS256);

        let err = jwt.set_alg_raw(999, None, 0).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument(_)));
        assert_eq!(jwt.alg(), Algorithm::HS256);
    }

    #[test]
    fn failed_first_assignment_leaves_default() {
        let mut jwt = Jwt::new();
        assert!(jwt.set_alg(Algorithm::None, Some(KEY)).is_err());
        assert_eq!(jwt.alg(), Algorithm::None);
        assert!(jwt.binding().key().is_none());
    }

    #[test]
    fn grant_accessors() {
        let mut jwt = Jwt::new();
        jwt.add_grant("sub", "user0").unwrap();
        jwt.add_grant("admin", true).unwrap();
        jwt.add_grants_json(r#"{"exp":1477514812,"scope":["read"]}"#).unwrap();

        assert_eq!(jwt.grant_str("sub").unwrap(), "user0");
        assert!(jwt.grant_bool("admin").unwrap());
        assert_eq!(jwt.grant_int("exp").unwrap(), 1477514812);
        assert_eq!(jwt.grants_json(Some("scope")).unwrap(), r#"["read"]"#);
        assert_eq!(jwt.grants_json(Some("sub")).unwrap(), r#""user0""#);
        let err = jwt.grants_json(Some("nope")).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::NotFound(_)));

        assert_eq!(jwt.del_grant("admin"), Some(Grant::Boolean(true)));
        assert_eq!(jwt.del_grant("admin"), None);
        assert_eq!(
            jwt.grants_json(None).unwrap(),
            r#"{"exp":1477514812,"scope":["read"],"sub":"user0"}"#
        );

        jwt.clear_grants();
        assert!(jwt.grants().is_empty());
    }

    #[test]
    fn dump_renders_header_and_payload() {
        let mut jwt = Jwt::new();
        jwt.add_grant("sub", "user0").unwrap();
        jwt.add_grant("iat", 1).unwrap();
        jwt.set_alg(Algorithm::HS384, Some(KEY)).unwrap();
        assert_eq!(
            jwt.dump(false).unwrap(),
            r#"{"alg":"HS384","typ":"JWT"}.{"iat":1,"sub":"user0"}"#
        );
        assert_eq!(
            jwt.dump(true).unwrap(),
            "{\n  \"alg\": \"HS384\",\n  \"typ\": \"JWT\"\n}.{\n  \"iat\": 1,\n  \"sub\": \"user0\"\n}"
        );
    }

    #[test]
    fn clone_is_independent() {
        let mut jwt = Jwt::new();
        jwt.add_grant("a", 1).unwrap();
        let mut copy = jwt.clone();
        copy.add_grant("b", 2).unwrap();
        copy.set_alg(Algorithm::HS256, Some(KEY)).unwrap();
        assert!(!jwt.grants().contains("b"));
        assert_eq!(jwt.alg(), Algorithm::None);
    }

    #[test]
    fn bind_replaces_binding() {
        let mut jwt = Jwt::from_grants(Grants::new());
        jwt.bind(AlgorithmBinding::keyed(Algorithm::HS512, KEY).unwrap());
        assert_eq!(jwt.header(), Header::new(Algorithm::HS512));
        jwt.bind(AlgorithmBinding::none());
        assert_eq!(jwt.header().typ, None);
    }
}
