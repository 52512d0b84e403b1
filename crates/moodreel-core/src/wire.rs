//! Deserialization helpers for the loosely typed backend payloads.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Str(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::UInt(n) => n.to_string(),
            RawId::Float(n) => n.to_string(),
        }
    }
}

/// Identifier sent either as a JSON string or as a number.
pub(crate) fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

/// Like [`id`], but `null` yields `None`.
pub(crate) fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "super::id")]
        id: String,
        #[serde(default, deserialize_with = "super::opt_id")]
        other: Option<String>,
        #[serde(default, deserialize_with = "super::null_as_default")]
        items: Vec<u8>,
    }

    #[test]
    fn numeric_and_string_ids_become_strings() {
        let h: Holder = serde_json::from_str(r#"{"id": 42, "other": "x"}"#).unwrap();
        assert_eq!(h.id, "42");
        assert_eq!(h.other.as_deref(), Some("x"));

        let h: Holder = serde_json::from_str(r#"{"id": "abc", "other": null}"#).unwrap();
        assert_eq!(h.id, "abc");
        assert!(h.other.is_none());
    }

    #[test]
    fn ids_beyond_i64_stay_exact() {
        let h: Holder = serde_json::from_str(r#"{"id": 18446744073709551615}"#).unwrap();
        assert_eq!(h.id, "18446744073709551615");
    }

    #[test]
    fn null_list_is_empty() {
        let h: Holder = serde_json::from_str(r#"{"id": 1, "items": null}"#).unwrap();
        assert!(h.items.is_empty());
    }
}
