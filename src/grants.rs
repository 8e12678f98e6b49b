//! The claim store carried in a token's payload.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::{Map, Value};

use crate::errors::{ErrorKind, Malformed, Result};
use crate::serialization::{Canonical, to_canonical_string};

/// A single claim value.
///
/// Primitive JSON values always live in their dedicated variant: constructing a grant from a
/// [`serde_json::Value`] that is a string, an `i64` or a boolean yields `Text`, `Integer` or
/// `Boolean`. `Json` only ever holds structured values, `null`, floats and integers outside
/// the `i64` range.
#[derive(Debug, Clone, PartialEq)]
pub enum Grant {
    /// A JSON string.
    Text(String),
    /// A JSON integer, rendered in base 10.
    Integer(i64),
    /// A JSON boolean.
    Boolean(bool),
    /// Any other JSON value.
    Json(Value),
}

impl Grant {
    /// The text of a `Text` grant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Grant::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value of an `Integer` grant.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Grant::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The value of a `Boolean` grant.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Grant::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Convert into a plain JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            Grant::Text(s) => Value::String(s.clone()),
            Grant::Integer(i) => Value::from(*i),
            Grant::Boolean(b) => Value::Bool(*b),
            Grant::Json(v) => v.clone(),
        }
    }

    /// The canonical JSON text of this value alone.
    pub fn to_json(&self) -> Result<String> {
        to_canonical_string(self)
    }

    fn normalized(self) -> Grant {
        match self {
            Grant::Json(value) => Grant::from(value),
            other => other,
        }
    }
}

impl Serialize for Grant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Grant::Text(s) => serializer.serialize_str(s),
            Grant::Integer(i) => serializer.serialize_i64(*i),
            Grant::Boolean(b) => serializer.serialize_bool(*b),
            Grant::Json(v) => Canonical(v).serialize(serializer),
        }
    }
}

impl From<Value> for Grant {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Grant::Text(s),
            Value::Bool(b) => Grant::Boolean(b),
            Value::Number(n) if n.is_i64() => match n.as_i64() {
                Some(i) => Grant::Integer(i),
                None => Grant::Json(Value::Number(n)),
            },
            other => Grant::Json(other),
        }
    }
}

impl From<&str> for Grant {
    fn from(value: &str) -> Self {
        Grant::Text(value.to_owned())
    }
}

impl From<String> for Grant {
    fn from(value: String) -> Self {
        Grant::Text(value)
    }
}

impl From<i64> for Grant {
    fn from(value: i64) -> Self {
        Grant::Integer(value)
    }
}

impl From<i32> for Grant {
    fn from(value: i32) -> Self {
        Grant::Integer(value.into())
    }
}

impl From<u32> for Grant {
    fn from(value: u32) -> Self {
        Grant::Integer(value.into())
    }
}

impl From<bool> for Grant {
    fn from(value: bool) -> Self {
        Grant::Boolean(value)
    }
}

/// The set of grants (claims) of a token, keyed by name.
///
/// Entries are kept ordered by the byte order of their names, so the serialized payload never
/// depends on insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grants {
    entries: BTreeMap<String, Grant>,
}

impl Grants {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `name`, replacing any previous value.
    ///
    /// Fails with `InvalidArgument` if `name` is empty.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<Grant>) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(ErrorKind::InvalidArgument("grant name must not be empty".into()).into());
        }
        self.entries.insert(name, value.into().normalized());
        Ok(())
    }

    /// Delete the grant under `name`. Absent names are not an error.
    pub fn remove(&mut self, name: &str) -> Option<Grant> {
        self.entries.remove(name)
    }

    /// Delete every grant.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Look a grant up by name.
    pub fn get(&self, name: &str) -> Result<&Grant> {
        self.entries.get(name).ok_or_else(|| ErrorKind::NotFound(name.to_owned()).into())
    }

    /// Look up a `Text` grant.
    pub fn get_str(&self, name: &str) -> Result<&str> {
        let grant = self.get(name)?;
        grant.as_str().ok_or_else(|| mismatched(name, "a string"))
    }

    /// Look up an `Integer` grant.
    pub fn get_int(&self, name: &str) -> Result<i64> {
        self.get(name)?.as_i64().ok_or_else(|| mismatched(name, "an integer"))
    }

    /// Look up a `Boolean` grant.
    pub fn get_bool(&self, name: &str) -> Result<bool> {
        self.get(name)?.as_bool().ok_or_else(|| mismatched(name, "a boolean"))
    }

    /// Whether a grant named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of grants.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no grants.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by byte-lexicographic name.
    pub fn sorted_entries(&self) -> Entries<'_> {
        Entries { inner: self.entries.iter() }
    }

    /// Merge every member of a JSON object into the store, replacing existing names.
    ///
    /// On failure the store is left untouched.
    pub fn extend_from_json(&mut self, json: &str) -> Result<()> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| ErrorKind::InvalidArgument(format!("grants are not valid JSON: {e}")))?;
        let Value::Object(members) = value else {
            return Err(ErrorKind::InvalidArgument("grants must be a JSON object".into()).into());
        };
        if members.keys().any(String::is_empty) {
            return Err(ErrorKind::InvalidArgument("grant name must not be empty".into()).into());
        }
        for (name, value) in members {
            self.entries.insert(name, Grant::from(value));
        }
        Ok(())
    }

    /// Canonical JSON object of all grants.
    pub fn to_json(&self) -> Result<String> {
        to_canonical_string(self)
    }

    /// Rebuild a store from a received payload.
    pub(crate) fn from_payload(payload: &[u8]) -> std::result::Result<Self, Malformed> {
        let Value::Object(members) = serde_json::from_slice::<Value>(payload)? else {
            return Err(Malformed::NotAnObject);
        };
        Self::from_members(members)
    }

    fn from_members(members: Map<String, Value>) -> std::result::Result<Self, Malformed> {
        let mut entries = BTreeMap::new();
        for (name, value) in members {
            if name.is_empty() {
                return Err(Malformed::EmptyClaimName);
            }
            entries.insert(name, Grant::from(value));
        }
        Ok(Self { entries })
    }
}

fn mismatched(name: &str, expected: &str) -> crate::errors::Error {
    ErrorKind::InvalidArgument(format!("grant `{name}` is not {expected}")).into()
}

impl Serialize for Grants {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, grant) in self.sorted_entries() {
            map.serialize_entry(name, grant)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a Grants {
    type Item = (&'a str, &'a Grant);
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorted_entries()
    }
}

/// Iterator over the grants of a [`Grants`] store, in name order.
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    inner: btree_map::Iter<'a, String, Grant>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, &'a Grant);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, grant)| (name.as_str(), grant))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Entries<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(name, grant)| (name.as_str(), grant))
    }
}

impl ExactSizeIterator for Entries<'_> {}
