//! 布尔值编解码
//!
//! ClouDNS rarely sends JSON booleans. Flags arrive as `1`/`0`, as `"1"`/`"0"`,
//! or as `"true"`/`"false"`, and are expected back as the numbers `1`/`0`.
//!
//! - Serialization: `bool` -> `1` or `0`
//! - Deserialization: JSON bool, number or string -> `bool`
//!
//! Use [`ApiBool`] directly, or annotate a plain `bool` field with
//! `#[serde(with = "crate::utils::api_bool")]`.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A boolean in the ClouDNS wire representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ApiBool(pub bool);

impl From<bool> for ApiBool {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl From<ApiBool> for bool {
    fn from(value: ApiBool) -> Self {
        value.0
    }
}

impl From<ApiBool> for serde_json::Value {
    fn from(value: ApiBool) -> Self {
        Self::from(u8::from(value.0))
    }
}

impl Serialize for ApiBool {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(self.0))
    }
}

impl<'de> Deserialize<'de> for ApiBool {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ApiBoolVisitor)
    }
}

struct ApiBoolVisitor;

impl Visitor<'_> for ApiBoolVisitor {
    type Value = ApiBool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean encoded as true/false or 1/0, optionally quoted")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ApiBool(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        parse(&v.to_string())
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        parse(&v.to_string())
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        parse(&v.to_string())
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        parse(v)
    }
}

/// Parses the textual form of a wire boolean.
fn parse<E: de::Error>(raw: &str) -> Result<ApiBool, E> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(ApiBool(true)),
        "false" | "0" | "" => Ok(ApiBool(false)),
        _ => Err(E::custom(format!(
            "could not unmarshal boolean from invalid input: {raw}"
        ))),
    }
}

/// 序列化 `bool` 为 `1` / `0`
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    ApiBool(*value).serialize(serializer)
}

/// 反序列化：支持 bool、数字或字符串
pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    ApiBool::deserialize(deserializer).map(bool::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(raw: &str) -> Result<bool, serde_json::Error> {
        serde_json::from_str::<ApiBool>(raw).map(bool::from)
    }

    #[test]
    fn encode_true_as_one() {
        assert_eq!(serde_json::to_string(&ApiBool(true)).unwrap(), "1");
    }

    #[test]
    fn encode_false_as_zero() {
        assert_eq!(serde_json::to_string(&ApiBool(false)).unwrap(), "0");
    }

    #[test]
    fn decode_truthy_encodings() {
        for raw in ["true", "1", "\"1\"", "\"true\"", "\"TRUE\"", "\"True\""] {
            assert!(decode(raw).unwrap(), "{raw} should decode to true");
        }
    }

    #[test]
    fn decode_falsy_encodings() {
        for raw in ["false", "0", "\"0\"", "\"false\"", "\"\"", "\"FALSE\""] {
            assert!(!decode(raw).unwrap(), "{raw} should decode to false");
        }
    }

    #[test]
    fn decode_invalid_reports_raw_value() {
        let err = decode("\"maybe\"").unwrap_err();
        assert!(err.to_string().contains("invalid input: maybe"), "{err}");

        let err = decode("2").unwrap_err();
        assert!(err.to_string().contains("invalid input: 2"), "{err}");
    }

    #[test]
    fn decode_rejects_null() {
        assert!(decode("null").is_err());
    }

    #[test]
    fn field_helper_round_trip() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Flag {
            #[serde(with = "crate::utils::api_bool")]
            status: bool,
        }

        let flag: Flag = serde_json::from_str(r#"{"status":"1"}"#).unwrap();
        assert_eq!(flag, Flag { status: true });
        assert_eq!(serde_json::to_string(&flag).unwrap(), r#"{"status":1}"#);
    }

    #[test]
    fn into_json_value_is_numeric() {
        assert_eq!(serde_json::Value::from(ApiBool(true)), serde_json::json!(1));
        assert_eq!(serde_json::Value::from(ApiBool(false)), serde_json::json!(0));
    }
}
