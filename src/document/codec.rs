//! The YAML codec boundary.
//!
//! Text is decoded with `serde_yaml` into a `serde_yaml::Value`, which is then
//! converted into the crate's own [`YamlValue`]. Encoding goes the other way.
//! This is the only place where the decoder's key encodings are seen; every
//! mapping key is normalized into a [`Key`] here.
//!
//! # Example
//!
//! ```
//! use yamlkit::document::codec::{decode_str, encode};
//!
//! let value = decode_str("a: 1\nb: [x, y]\n").unwrap();
//! let text = encode(&value).unwrap();
//! assert_eq!(decode_str(&text).unwrap(), value);
//! ```

use super::key::Key;
use super::node::{Mapping, YamlNumber, YamlValue};
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_yaml::Value as SerdeValue;

/// Decodes a single YAML document from bytes.
///
/// Empty input decodes to `Null`. A stream with more than one document is an
/// error; use [`decode_all`] for those.
pub fn decode(bytes: &[u8]) -> Result<YamlValue> {
    let value: SerdeValue = serde_yaml::from_slice(bytes).map_err(Error::Decode)?;
    from_serde(value)
}

/// Decodes a single YAML document from a string.
pub fn decode_str(text: &str) -> Result<YamlValue> {
    let value: SerdeValue = serde_yaml::from_str(text).map_err(Error::Decode)?;
    from_serde(value)
}

/// Decodes every document of a `---`-separated YAML stream.
pub fn decode_all(text: &str) -> Result<Vec<YamlValue>> {
    serde_yaml::Deserializer::from_str(text)
        .map(|document| {
            let value = SerdeValue::deserialize(document).map_err(Error::Decode)?;
            from_serde(value)
        })
        .collect()
}

/// Encodes a value as YAML text.
pub fn encode(value: &YamlValue) -> Result<String> {
    serde_yaml::to_string(&to_serde(value)).map_err(Error::Encode)
}

/// Converts a decoded `serde_yaml::Value` into a [`YamlValue`].
///
/// Tags are dropped in favour of the tagged value. Unsigned integers that do
/// not fit in `i64` become floats.
pub fn from_serde(value: SerdeValue) -> Result<YamlValue> {
    Ok(match value {
        SerdeValue::Null => YamlValue::Null,
        SerdeValue::Bool(b) => YamlValue::Boolean(b),
        SerdeValue::Number(n) => YamlValue::Number(number_from_serde(&n)),
        SerdeValue::String(s) => YamlValue::String(s),
        SerdeValue::Sequence(items) => YamlValue::array(
            items
                .into_iter()
                .map(from_serde)
                .collect::<Result<Vec<_>>>()?,
        ),
        SerdeValue::Mapping(map) => {
            let mut entries = Mapping::with_capacity(map.len());
            for (key, value) in map {
                entries.insert(key_from_serde(key)?, from_serde(value)?);
            }
            YamlValue::object(entries)
        }
        SerdeValue::Tagged(tagged) => from_serde(tagged.value)?,
    })
}

/// Converts a [`YamlValue`] into a `serde_yaml::Value` for encoding.
pub fn to_serde(value: &YamlValue) -> SerdeValue {
    match value {
        YamlValue::Null => SerdeValue::Null,
        YamlValue::Boolean(b) => SerdeValue::Bool(*b),
        YamlValue::Number(YamlNumber::Integer(i)) => SerdeValue::Number((*i).into()),
        YamlValue::Number(YamlNumber::Float(f)) => SerdeValue::Number((*f).into()),
        YamlValue::String(s) => SerdeValue::String(s.clone()),
        YamlValue::Array(items) => {
            SerdeValue::Sequence(items.borrow().iter().map(to_serde).collect())
        }
        YamlValue::Object(entries) => SerdeValue::Mapping(
            entries
                .borrow()
                .iter()
                .map(|(key, value)| (key_to_serde(key), to_serde(value)))
                .collect(),
        ),
    }
}

fn number_from_serde(n: &serde_yaml::Number) -> YamlNumber {
    if let Some(i) = n.as_i64() {
        YamlNumber::Integer(i)
    } else if let Some(u) = n.as_u64() {
        YamlNumber::Float(u as f64)
    } else {
        YamlNumber::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn key_from_serde(key: SerdeValue) -> Result<Key> {
    match key {
        SerdeValue::Null => Ok(Key::Null),
        SerdeValue::Bool(b) => Ok(Key::Boolean(b)),
        SerdeValue::Number(n) => Ok(match number_from_serde(&n) {
            YamlNumber::Integer(i) => Key::Integer(i),
            YamlNumber::Float(f) => Key::Float(f),
        }),
        SerdeValue::String(s) => Ok(Key::String(s)),
        SerdeValue::Tagged(tagged) => key_from_serde(tagged.value),
        SerdeValue::Sequence(_) | SerdeValue::Mapping(_) => {
            let rendered = serde_yaml::to_string(&key).unwrap_or_default();
            Err(Error::UnsupportedKey(rendered.trim_end().to_string()))
        }
    }
}

fn key_to_serde(key: &Key) -> SerdeValue {
    match key {
        Key::Null => SerdeValue::Null,
        Key::Boolean(b) => SerdeValue::Bool(*b),
        Key::Integer(i) => SerdeValue::Number((*i).into()),
        Key::Float(f) => SerdeValue::Number((*f).into()),
        Key::String(s) => SerdeValue::String(s.clone()),
    }
}
