//! Tolerant serde helpers for API responses.
//!
//! ClouDNS encodes most numbers as strings, leaves unused fields as empty
//! strings, and returns `[]` instead of `{}` for empty collections.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::net::IpAddr;
use std::str::FromStr;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    U64(u64),
    I64(i64),
    F64(f64),
    String(String),
}

impl NumberOrString {
    fn into_text(self) -> String {
        match self {
            Self::U64(v) => v.to_string(),
            Self::I64(v) => v.to_string(),
            Self::F64(v) => v.to_string(),
            Self::String(s) => s,
        }
    }
}

/// 反序列化数字：支持 JSON 数字或数字字符串
///
/// `null` and `""` decode to `T::default()`.
pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let Some(raw) = Option::<NumberOrString>::deserialize(deserializer)? else {
        return Ok(T::default());
    };

    let text = raw.into_text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }

    trimmed
        .parse::<T>()
        .map_err(|_| de::Error::custom(format!("invalid numeric value: {text}")))
}

/// 反序列化字符串：`null` 视为空字符串，数字按文本处理
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NumberOrString>::deserialize(deserializer)?
        .map(NumberOrString::into_text)
        .unwrap_or_default())
}

/// 反序列化 IP 地址：空字符串视为 `None`
pub fn optional_ip<'de, D>(deserializer: D) -> Result<Option<IpAddr>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.trim().is_empty() => s
            .trim()
            .parse::<IpAddr>()
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid IP address {s:?}: {e}"))),
        _ => Ok(None),
    }
}

/// Decodes a JSON object into a map, accepting a JSON array as an empty map.
///
/// List endpoints answer `[]` when nothing matches, although a match is
/// returned as an object keyed by id.
pub fn object_or_empty_array<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    deserializer.deserialize_any(ObjectOrArray(PhantomData))
}

struct ObjectOrArray<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> Visitor<'de> for ObjectOrArray<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    type Value = BTreeMap<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object, or an array standing in for an empty object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut out = BTreeMap::new();
        while let Some((key, value)) = map.next_entry()? {
            out.insert(key, value);
        }
        Ok(out)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut skipped = 0usize;
        while seq.next_element::<IgnoredAny>()?.is_some() {
            skipped += 1;
        }
        if skipped > 0 {
            log::warn!("Expected an object but got an array of {skipped} element(s), treating as empty");
        } else {
            log::debug!("Empty array in place of an object, treating as empty");
        }
        Ok(BTreeMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Numbers {
        #[serde(default, deserialize_with = "number")]
        ttl: u32,
        #[serde(default, deserialize_with = "number")]
        funds: f64,
    }

    #[derive(Deserialize, Debug)]
    struct Listing(#[serde(deserialize_with = "object_or_empty_array")] BTreeMap<String, u32>);

    #[test]
    fn number_from_string() {
        let n: Numbers = serde_json::from_str(r#"{"ttl":"3600","funds":"12.50"}"#).unwrap();
        assert_eq!(n.ttl, 3600);
        assert!((n.funds - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn number_from_number() {
        let n: Numbers = serde_json::from_str(r#"{"ttl":60,"funds":3}"#).unwrap();
        assert_eq!(n.ttl, 60);
        assert!((n.funds - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn number_empty_null_and_missing_use_default() {
        let n: Numbers = serde_json::from_str(r#"{"ttl":"","funds":null}"#).unwrap();
        assert_eq!(n, Numbers { ttl: 0, funds: 0.0 });

        let n: Numbers = serde_json::from_str("{}").unwrap();
        assert_eq!(n.ttl, 0);
    }

    #[test]
    fn number_rejects_garbage() {
        let err = serde_json::from_str::<Numbers>(r#"{"ttl":"soon"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid numeric value: soon"), "{err}");
    }

    #[test]
    fn text_accepts_null_and_numbers() {
        #[derive(Deserialize)]
        struct Txt {
            #[serde(default, deserialize_with = "text")]
            a: String,
            #[serde(default, deserialize_with = "text")]
            b: String,
            #[serde(default, deserialize_with = "text")]
            c: String,
        }

        let t: Txt = serde_json::from_str(r#"{"a":null,"b":128,"c":"issue"}"#).unwrap();
        assert_eq!(t.a, "");
        assert_eq!(t.b, "128");
        assert_eq!(t.c, "issue");
    }

    #[test]
    fn optional_ip_handles_empty() {
        #[derive(Deserialize)]
        struct Ns {
            #[serde(default, deserialize_with = "optional_ip")]
            ip4: Option<IpAddr>,
            #[serde(default, deserialize_with = "optional_ip")]
            ip6: Option<IpAddr>,
        }

        let ns: Ns = serde_json::from_str(r#"{"ip4":"185.136.96.66","ip6":""}"#).unwrap();
        assert_eq!(ns.ip4, Some("185.136.96.66".parse().unwrap()));
        assert_eq!(ns.ip6, None);
    }

    #[test]
    fn listing_from_object() {
        let listing: Listing = serde_json::from_str(r#"{"a":1,"b":2}"#).unwrap();
        assert_eq!(listing.0.len(), 2);
        assert_eq!(listing.0.get("b"), Some(&2));
    }

    #[test]
    fn listing_from_empty_array() {
        let listing: Listing = serde_json::from_str("[]").unwrap();
        assert!(listing.0.is_empty());
    }

    #[test]
    fn listing_rejects_other_shapes() {
        assert!(serde_json::from_str::<Listing>("\"nope\"").is_err());
    }
}
