//! Seed normalization.
//!
//! A draw may be seeded with an integer, with arbitrary text, or not at all. Text
//! seeds are hashed with SHA-256 and the first eight digest bytes are read as a
//! big-endian `u64`, so the same phrase always reproduces the same draw.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::errors::DrawError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SeedInput {
    /// No seed: the draw uses an unpredictable source.
    #[default]
    Unseeded,
    Integer(u64),
    Text(String),
}

impl SeedInput {
    /// Integer or text seed parsed from a command-line token: all digits is an integer.
    pub fn from_arg(arg: &str) -> Self {
        match arg.parse::<u64>() {
            Ok(n) if arg.bytes().all(|b| b.is_ascii_digit()) => SeedInput::Integer(n),
            _ => SeedInput::Text(arg.to_string()),
        }
    }

    /// Converts a loosely typed JSON value. Only `null`, non-negative integers and
    /// strings are seeds.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, DrawError> {
        match value {
            serde_json::Value::Null => Ok(SeedInput::Unseeded),
            serde_json::Value::Number(n) => n.as_u64().map(SeedInput::Integer).ok_or_else(|| {
                DrawError::invalid(format!("seed must be a non-negative integer, got {}", n))
            }),
            serde_json::Value::String(s) => Ok(SeedInput::Text(s.clone())),
            other => Err(DrawError::invalid(format!(
                "seed must be an integer, a string or null, got {}",
                json_kind(other)
            ))),
        }
    }

    pub fn normalize(&self) -> Option<u64> {
        match self {
            SeedInput::Unseeded => None,
            SeedInput::Integer(n) => Some(*n),
            SeedInput::Text(s) => Some(hash_text_seed(s)),
        }
    }
}

impl From<u64> for SeedInput {
    fn from(n: u64) -> Self {
        SeedInput::Integer(n)
    }
}

impl From<&str> for SeedInput {
    fn from(s: &str) -> Self {
        SeedInput::Text(s.to_string())
    }
}

impl From<String> for SeedInput {
    fn from(s: String) -> Self {
        SeedInput::Text(s)
    }
}

impl<T: Into<SeedInput>> From<Option<T>> for SeedInput {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or_default()
    }
}

impl Serialize for SeedInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SeedInput::Unseeded => serializer.serialize_none(),
            SeedInput::Integer(n) => serializer.serialize_u64(*n),
            SeedInput::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for SeedInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        SeedInput::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// SHA-256 of the UTF-8 text, first 8 bytes as a big-endian `u64`.
pub fn hash_text_seed(text: &str) -> u64 {
    let digest = Sha256::digest(text.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_seed_uses_sha256_prefix() {
        // sha256("abc") = ba7816bf8f01cfea...
        assert_eq!(hash_text_seed("abc"), 0xba78_16bf_8f01_cfea);
        // sha256("") = e3b0c44298fc1c14...
        assert_eq!(hash_text_seed(""), 0xe3b0_c442_98fc_1c14);
    }

    #[test]
    fn normalize_variants() {
        assert_eq!(SeedInput::Unseeded.normalize(), None);
        assert_eq!(SeedInput::Integer(42).normalize(), Some(42));
        assert_eq!(
            SeedInput::from("abc").normalize(),
            Some(0xba78_16bf_8f01_cfea)
        );
    }

    #[test]
    fn text_seed_is_stable_and_distinct() {
        let a = SeedInput::from("demo-seed").normalize();
        let b = SeedInput::from("demo-seed").normalize();
        let c = SeedInput::from("demo-seed-2").normalize();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn from_json_accepts_int_string_null() {
        assert_eq!(SeedInput::from_json(&json!(null)), Ok(SeedInput::Unseeded));
        assert_eq!(SeedInput::from_json(&json!(7)), Ok(SeedInput::Integer(7)));
        assert_eq!(
            SeedInput::from_json(&json!("x")),
            Ok(SeedInput::Text("x".into()))
        );
    }

    #[test]
    fn from_json_rejects_other_types() {
        for bad in [json!(-1), json!(1.5), json!(true), json!([1]), json!({"a": 1})] {
            let err = SeedInput::from_json(&bad).unwrap_err();
            assert!(
                matches!(err, DrawError::InvalidParameter(_)),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn from_arg_splits_digits_and_text() {
        assert_eq!(SeedInput::from_arg("12345"), SeedInput::Integer(12345));
        assert_eq!(SeedInput::from_arg("+5"), SeedInput::Text("+5".into()));
        assert_eq!(
            SeedInput::from_arg("demo-seed"),
            SeedInput::Text("demo-seed".into())
        );
    }

    #[test]
    fn serde_round_trip_shapes() {
        let s: SeedInput = serde_json::from_str("\"hello\"").unwrap();
        assert_eq!(s, SeedInput::Text("hello".into()));
        let n: SeedInput = serde_json::from_str("99").unwrap();
        assert_eq!(n, SeedInput::Integer(99));
        assert!(serde_json::from_str::<SeedInput>("false").is_err());
        assert_eq!(serde_json::to_string(&SeedInput::Unseeded).unwrap(), "null");
    }
}
