//! Communication records.

use crate::model::Address;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

const SOURCE_KEYS: [&str; 3] = ["src_ip", "src", "source"];
const DESTINATION_KEYS: [&str; 3] = ["dst_ip", "dst", "destination"];

/// A single communication event between two endpoints.
///
/// Only the two address fields are read; any other keys present in the
/// source data are ignored. Either field may be missing or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Source endpoint, as it appeared in the input.
    pub src_ip: Option<String>,
    /// Destination endpoint, as it appeared in the input.
    pub dst_ip: Option<String>,
}

/// First string value among `keys`, checked in order.
///
/// Non-string values (numbers, objects, null) count as absent, so a bad
/// canonical key falls through to its aliases.
fn string_field(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::to_owned)
}

impl Record {
    /// Create a record from optional raw address fields.
    pub fn new(src_ip: Option<&str>, dst_ip: Option<&str>) -> Self {
        Self {
            src_ip: src_ip.map(str::to_owned),
            dst_ip: dst_ip.map(str::to_owned),
        }
    }

    /// Create a record with both endpoints present.
    pub fn between(src_ip: &str, dst_ip: &str) -> Self {
        Self::new(Some(src_ip), Some(dst_ip))
    }

    /// Source address, or `None` when missing or empty.
    pub fn source(&self) -> Option<Address> {
        Address::from_field(self.src_ip.as_deref())
    }

    /// Destination address, or `None` when missing or empty.
    pub fn destination(&self) -> Option<Address> {
        Address::from_field(self.dst_ip.as_deref())
    }

    /// Read a record from a decoded JSON value, one field at a time.
    ///
    /// Returns `None` only when `value` is not an object. A badly typed
    /// address field is dropped on its own and the other field is kept.
    pub fn from_json_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            src_ip: string_field(object, &SOURCE_KEYS),
            dst_ip: string_field(object, &DESTINATION_KEYS),
        })
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_json_value(&value)
            .ok_or_else(|| D::Error::custom("record must be a JSON object"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_canonical_keys() {
        let record: Record =
            serde_json::from_str(r#"{"src_ip":"10.0.0.1","dst_ip":"10.0.0.2","bytes":12}"#)
                .unwrap();
        assert_eq!(record, Record::between("10.0.0.1", "10.0.0.2"));
    }

    #[test]
    fn deserializes_short_aliases() {
        let record: Record = serde_json::from_str(r#"{"src":"a","dst":"b"}"#).unwrap();
        assert_eq!(record.source().unwrap().as_str(), "a");
        assert_eq!(record.destination().unwrap().as_str(), "b");
    }

    #[test]
    fn missing_fields_default_to_none() {
        let record: Record = serde_json::from_str(r#"{"timestamp":1}"#).unwrap();
        assert_eq!(record.source(), None);
        assert_eq!(record.destination(), None);
    }

    #[test]
    fn non_string_field_keeps_the_other_endpoint() {
        let record: Record = serde_json::from_str(r#"{"src_ip":42,"dst_ip":"B"}"#).unwrap();
        assert_eq!(record.source(), None);
        assert_eq!(record.destination().unwrap().as_str(), "B");
    }

    #[test]
    fn canonical_key_wins_over_alias() {
        let record: Record =
            serde_json::from_str(r#"{"src":"A2","src_ip":"A","dst_ip":"B"}"#).unwrap();
        assert_eq!(record, Record::between("A", "B"));
    }

    #[test]
    fn alias_is_used_when_canonical_key_is_not_a_string() {
        let record: Record = serde_json::from_str(r#"{"src_ip":[1],"source":"A"}"#).unwrap();
        assert_eq!(record.source().unwrap().as_str(), "A");
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(serde_json::from_str::<Record>("42").is_err());
        assert_eq!(Record::from_json_value(&serde_json::json!(["a", "b"])), None);
    }

    #[test]
    fn null_and_empty_fields_are_absent() {
        let record: Record = serde_json::from_str(r#"{"src_ip":null,"dst_ip":""}"#).unwrap();
        assert_eq!(record.source(), None);
        assert_eq!(record.destination(), None);
    }
}
