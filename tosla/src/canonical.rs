//! Request records → flat wire maps.
//!
//! Each request type declares its wire table with serde attributes: `rename`
//! gives the wire name, `skip` drops the field and
//! `skip_serializing_if = "String::is_empty"` makes it omit-if-empty.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub type FieldMap = Map<String, Value>;

/// Serializes `record` into a flat wire map.
pub fn to_field_map<T: Serialize>(record: &T) -> Result<FieldMap> {
    let Value::Object(map) = serde_json::to_value(record)? else {
        return Err(Error::Shape {
            field: "<root>".to_string(),
        });
    };

    if let Some((field, _)) = map
        .iter()
        .find(|(_, value)| matches!(value, Value::Object(_) | Value::Array(_)))
    {
        return Err(Error::Shape {
            field: field.clone(),
        });
    }

    Ok(map)
}

/// Later maps overwrite keys of earlier ones.
pub fn combine_maps(maps: impl IntoIterator<Item = FieldMap>) -> FieldMap {
    let mut result = FieldMap::new();

    for map in maps {
        result.extend(map);
    }

    result
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
        *value == T::default()
    }

    #[derive(Serialize, Default)]
    struct Record {
        #[serde(rename = "orderId", skip_serializing_if = "String::is_empty")]
        order_id: String,

        #[serde(rename = "amount")]
        amount: i64,

        #[serde(rename = "installmentCount", skip_serializing_if = "is_zero")]
        installment_count: i32,

        #[serde(skip)]
        local_note: String,
    }

    #[test]
    fn test_omit_if_empty_drops_zero_values() {
        let map = to_field_map(&Record::default()).unwrap();

        assert!(!map.contains_key("orderId"));
        assert!(!map.contains_key("installmentCount"));
        assert_eq!(map.get("amount"), Some(&json!(0)));
    }

    #[test]
    fn test_omit_if_empty_keeps_set_values() {
        let record = Record {
            order_id: "ORD-7".to_string(),
            amount: 6999,
            installment_count: 3,
            local_note: "internal".to_string(),
        };
        let map = to_field_map(&record).unwrap();

        assert_eq!(map.get("orderId"), Some(&json!("ORD-7")));
        assert_eq!(map.get("amount"), Some(&json!(6999)));
        assert_eq!(map.get("installmentCount"), Some(&json!(3)));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_skipped_field_never_emitted() {
        let record = Record {
            local_note: "internal".to_string(),
            ..Default::default()
        };
        let map = to_field_map(&record).unwrap();

        assert!(!map.contains_key("local_note"));
        assert!(!map.values().any(|v| v == "internal"));
    }

    #[test]
    fn test_non_record_is_shape_error() {
        let err = to_field_map(&"just a string").unwrap_err();
        assert!(matches!(err, Error::Shape { ref field } if field == "<root>"));

        let err = to_field_map(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::Shape { .. }));
    }

    #[test]
    fn test_nested_value_is_shape_error() {
        #[derive(Serialize)]
        struct Nested {
            inner: Vec<u8>,
        }

        let err = to_field_map(&Nested { inner: vec![1] }).unwrap_err();
        assert!(matches!(err, Error::Shape { ref field } if field == "inner"));
    }

    #[test]
    fn test_combine_maps_last_wins() {
        let first = to_field_map(&json!({"clientId": "1", "hash": "h"})).unwrap();
        let second = to_field_map(&json!({"hash": "override", "bin": 589283})).unwrap();

        let combined = combine_maps([first, second]);

        assert_eq!(
            Value::Object(combined),
            json!({"clientId": "1", "hash": "override", "bin": 589283})
        );
    }
}
