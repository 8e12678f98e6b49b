use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use serde::{Serialize, Serializer, ser::SerializeMap, ser::SerializeSeq};
use serde_json::Value;

use crate::errors::{ErrorKind, Result};

/// URL-safe alphabet, never pads on encode, takes padded or unpadded input on decode.
const URL_SAFE_ANY_PAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// URL-safe alphabet, rejects `=` padding on decode. Accepts only what [`b64_encode`] writes.
const URL_SAFE_EXACT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

/// Encode bytes with the unpadded base64url alphabet.
pub(crate) fn b64_encode<T: AsRef<[u8]>>(input: T) -> String {
    URL_SAFE_ANY_PAD.encode(input)
}

/// Decode base64url text, with or without `=` padding.
pub(crate) fn b64_decode<T: AsRef<[u8]>>(input: T) -> Result<Vec<u8>> {
    URL_SAFE_ANY_PAD.decode(input).map_err(|e| e.into())
}

/// Decode base64url text that must be spelled exactly as [`b64_encode`] spells it.
pub(crate) fn b64_decode_exact<T: AsRef<[u8]>>(input: T) -> Result<Vec<u8>> {
    URL_SAFE_EXACT.decode(input).map_err(|e| e.into())
}

/// Serialize `value` canonically and base64url-encode the bytes.
pub(crate) fn b64_encode_part<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = to_canonical_json(value)?;
    Ok(b64_encode(json))
}

/// Compact JSON with no inserted whitespace.
///
/// Key order is whatever `value` serializes in; [`Canonical`] and the crate's own
/// `Serialize` impls always emit keys sorted by byte value.
pub(crate) fn to_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| ErrorKind::EncodingFailure(e.to_string()).into())
}

/// [`to_canonical_json`] as text.
pub(crate) fn to_canonical_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| ErrorKind::EncodingFailure(e.to_string()).into())
}

/// Indented JSON with the same key order as [`to_canonical_json`].
pub(crate) fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ErrorKind::EncodingFailure(e.to_string()).into())
}

/// Serializes a JSON value with object keys sorted by byte value at every depth.
///
/// This does not rely on how `serde_json::Map` happens to be ordered, which changes with the
/// `preserve_order` feature of `serde_json`.
pub(crate) struct Canonical<'a>(pub(crate) &'a Value);

impl Serialize for Canonical<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Canonical(item))?;
                }
                seq.end()
            }
            Value::Object(members) => {
                let mut sorted: Vec<(&String, &Value)> = members.iter().collect();
                sorted.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
                let mut map = serializer.serialize_map(Some(sorted.len()))?;
                for (key, value) in sorted {
                    map.serialize_entry(key, &Canonical(value))?;
                }
                map.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}
