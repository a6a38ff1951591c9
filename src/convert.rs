//! Conversion between YAML nodes and `serde_json::Value`.
//!
//! The two directions are asymmetric. [`YamlNode::from_json`] writes the JSON
//! value out as text and decodes that text with the YAML codec, giving the
//! same tree as loading the JSON file as YAML. [`YamlNode::to_json`] converts
//! the tree structurally, without a text round trip.

use crate::document::codec;
use crate::document::key::Key;
use crate::document::node::{YamlNumber, YamlValue};
use crate::document::tree::YamlNode;
use crate::error::{Error, Result};
use serde_json::{Map, Number, Value as JsonValue};

impl YamlNode {
    /// Builds a node from a JSON value via its text form.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlkit::YamlNode;
    ///
    /// let json = serde_json::json!({"name": "John", "hobbies": ["reading"]});
    /// let node = YamlNode::from_json(&json).unwrap();
    /// assert_eq!(node.path("hobbies.0").as_string(), "reading");
    /// ```
    pub fn from_json(value: &JsonValue) -> Result<YamlNode> {
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| Error::Conversion(format!("failed to serialize JSON: {}", e)))?;
        let decoded = codec::decode(&bytes)
            .map_err(|e| Error::Conversion(format!("failed to read JSON as YAML: {}", e)))?;
        Ok(YamlNode::from(decoded))
    }

    /// Converts the node into a JSON value.
    ///
    /// Non-string mapping keys become their textual form (`1`, `true`,
    /// `null`). A mapping where two keys share a textual form, such as `1`
    /// and `"1"`, fails rather than dropping one entry. Non-finite floats
    /// have no JSON representation and fail.
    pub fn to_json(&self) -> Result<JsonValue> {
        value_to_json(self.raw())
    }
}

fn value_to_json(value: &YamlValue) -> Result<JsonValue> {
    Ok(match value {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Boolean(b) => JsonValue::Bool(*b),
        YamlValue::Number(YamlNumber::Integer(i)) => JsonValue::Number(Number::from(*i)),
        YamlValue::Number(YamlNumber::Float(f)) => {
            JsonValue::Number(Number::from_f64(*f).ok_or_else(|| {
                Error::Conversion(format!("{} has no JSON representation", f))
            })?)
        }
        YamlValue::String(s) => JsonValue::String(s.clone()),
        YamlValue::Array(items) => JsonValue::Array(
            items
                .borrow()
                .iter()
                .map(value_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        YamlValue::Object(entries) => {
            let mut object = Map::new();
            for (key, value) in entries.borrow().iter() {
                let name = json_key(key);
                if object.contains_key(&name) {
                    return Err(Error::Conversion(format!(
                        "{} key {:?} collides with another mapping key of the same text",
                        key.kind_name(),
                        name
                    )));
                }
                object.insert(name, value_to_json(value)?);
            }
            JsonValue::Object(object)
        }
    })
}

fn json_key(key: &Key) -> String {
    match key {
        Key::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_json_scalars() {
        assert_eq!(YamlNode::new(1).to_json().unwrap(), json!(1));
        assert_eq!(YamlNode::new(1.5).to_json().unwrap(), json!(1.5));
        assert_eq!(YamlNode::new("x").to_json().unwrap(), json!("x"));
        assert_eq!(YamlNode::null().to_json().unwrap(), JsonValue::Null);
    }

    #[test]
    fn test_to_json_stringifies_keys() {
        let node = YamlNode::parse("1: a\ntrue: b\n~: c\nname: d\n").unwrap();
        assert_eq!(
            node.to_json().unwrap(),
            json!({"1": "a", "true": "b", "null": "c", "name": "d"})
        );
    }

    #[test]
    fn test_to_json_rejects_colliding_keys() {
        let node = YamlNode::parse("1: int\n'1': text\n").unwrap();
        assert!(matches!(node.to_json(), Err(Error::Conversion(_))));
    }

    #[test]
    fn test_to_json_rejects_non_finite_floats() {
        let node = YamlNode::array_from([f64::INFINITY]);
        assert!(matches!(node.to_json(), Err(Error::Conversion(_))));
    }

    #[test]
    fn test_from_json_nested() {
        let value = json!({"user": {"name": "Alice", "tags": ["a", "b"], "age": 30, "score": 9.5}});
        let node = YamlNode::from_json(&value).unwrap();
        assert_eq!(node.path("user.name").as_string(), "Alice");
        assert_eq!(node.path("user.tags.1").as_string(), "b");
        assert!(node.path("user.age").is_integer());
        assert!(node.path("user.score").is_float());
    }

    #[test]
    fn test_from_json_escaped_strings() {
        let value = json!({"text": "line1\nline2 \"quoted\" \u{0001}"});
        let node = YamlNode::from_json(&value).unwrap();
        assert_eq!(
            node.get("text").as_string(),
            "line1\nline2 \"quoted\" \u{0001}"
        );
    }

    #[test]
    fn test_json_round_trip() {
        let value = json!({"a": [1, 2, {"b": null}], "c": true, "d": "text"});
        let node = YamlNode::from_json(&value).unwrap();
        assert_eq!(node.to_json().unwrap(), value);
    }
}
