//! Dictionary-style access to YAML documents.
//!
//! This module provides [`YamlNode`], a handle over a [`YamlValue`] with
//! keyed, chained and dot-path navigation, in-place mutation, type coercion
//! and serialization. Navigation into a sequence or mapping returns a node
//! that aliases the parent's storage, so mutating the child is visible
//! through the parent.
//!
//! Reads never fail: missing keys, type mismatches and out-of-range indices
//! produce a null node, which makes chaining over absent data safe. Writes
//! report an [`Error`] describing the operation, the expected shape and the
//! receiver or index that did not fit.
//!
//! # Example
//!
//! ```
//! use yamlkit::{query, YamlNode};
//!
//! let doc = YamlNode::parse("a:\n  b: 5\nc:\n  - x\n  - y\n").unwrap();
//! assert_eq!(query!(doc, "a", "b").as_int(), 5);
//! assert_eq!(query!(doc, "c", 1).as_string(), "y");
//! assert!(query!(doc, "missing", "deeper").is_null());
//!
//! doc.get("c").append("z").unwrap();
//! assert_eq!(doc.path("c.2").as_string(), "z");
//! ```
//!
//! `YamlNode` is neither `Send` nor `Sync`; a tree belongs to one thread.

use super::codec;
use super::key::Key;
use super::node::{Mapping, YamlNumber, YamlValue};
use super::path::{self, Segment};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Chained lookup over keys of mixed types.
///
/// `query!(node, "hobbies", 1)` is `node.query([Key::from("hobbies"), Key::from(1)])`.
#[macro_export]
macro_rules! query {
    ($node:expr, $($key:expr),+ $(,)?) => {
        $node.query([$($crate::Key::from($key)),+])
    };
}

/// The most nulls [`YamlNode::set_path`] inserts to reach an index past the
/// end of a sequence.
pub const MAX_SEQUENCE_PADDING: usize = 1024;

/// A handle to a YAML value.
///
/// `Clone` is cheap and aliases container storage; use
/// [`deep_clone`](YamlNode::deep_clone) for an independent copy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct YamlNode {
    value: YamlValue,
}

impl YamlNode {
    /// Wraps any value convertible into a [`YamlValue`].
    pub fn new(value: impl Into<YamlValue>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// A null node, the result of every failed lookup.
    pub fn null() -> Self {
        Self::default()
    }

    /// An empty mapping.
    pub fn object() -> Self {
        Self::new(YamlValue::object(Mapping::new()))
    }

    /// An empty sequence.
    pub fn array() -> Self {
        Self::new(YamlValue::array(Vec::new()))
    }

    /// A sequence holding `items` in order.
    pub fn array_from<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<YamlValue>,
    {
        Self::new(YamlValue::array(items.into_iter().map(Into::into).collect()))
    }

    /// A mapping holding `pairs`; later duplicates overwrite earlier ones.
    pub fn object_from<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<YamlValue>,
    {
        Self::new(YamlValue::object(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Parses a single YAML document.
    pub fn parse(text: &str) -> Result<Self> {
        codec::decode_str(text).map(Self::from)
    }

    /// Parses every document of a `---`-separated stream.
    pub fn parse_all(text: &str) -> Result<Vec<Self>> {
        Ok(codec::decode_all(text)?
            .into_iter()
            .map(Self::from)
            .collect())
    }

    /// Parses a single YAML document from bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        codec::decode(bytes).map(Self::from)
    }

    /// Loads a YAML file; `*.gz` files are decompressed first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        crate::file::loader::load_yaml_file(path)
    }

    /// Serializes the node as YAML text.
    pub fn to_yaml_string(&self) -> Result<String> {
        codec::encode(&self.value)
    }

    /// Serializes the node as UTF-8 YAML bytes.
    pub fn to_yaml_bytes(&self) -> Result<Vec<u8>> {
        self.to_yaml_string().map(String::into_bytes)
    }

    /// Writes the node to `path` with the default [`Config`](crate::config::Config).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        crate::file::saver::save_yaml_file(path, self, &crate::config::Config::default())
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Single-step lookup by mapping key or sequence index.
    ///
    /// Returns a null node when the key is absent, the index is out of range
    /// or not an integer, or the receiver is a scalar.
    pub fn get(&self, key: impl Into<Key>) -> YamlNode {
        self.lookup(&key.into()).map(Self::from).unwrap_or_default()
    }

    /// Applies [`get`](Self::get) for each key in turn, stopping at the
    /// first null result.
    pub fn query<I>(&self, keys: I) -> YamlNode
    where
        I: IntoIterator,
        I::Item: Into<Key>,
    {
        let mut current = self.clone();
        for key in keys {
            current = current.get(key);
            if current.is_null() {
                break;
            }
        }
        current
    }

    /// Looks up a dot path such as `servers.0.host`.
    ///
    /// Integer segments index sequences; on a mapping they match an integer
    /// key first and the string key otherwise.
    pub fn path(&self, path: &str) -> YamlNode {
        let mut current = self.clone();
        for segment in path::segments(path) {
            current = current.get(current.resolve(&segment));
            if current.is_null() {
                break;
            }
        }
        current
    }

    /// Returns true if `key` addresses an existing entry or element.
    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.lookup(&key.into()).is_some()
    }

    fn lookup(&self, key: &Key) -> Option<YamlValue> {
        match &self.value {
            YamlValue::Object(entries) => entries.borrow().get(key).cloned(),
            YamlValue::Array(items) => {
                let index = usize::try_from(key.as_integer()?).ok()?;
                items.borrow().get(index).cloned()
            }
            _ => None,
        }
    }

    /// Picks the key a path segment stands for in this node.
    fn resolve(&self, segment: &Segment<'_>) -> Key {
        match (&self.value, segment.index) {
            (YamlValue::Array(_), Some(index)) => Key::Integer(index),
            (YamlValue::Object(entries), Some(index))
                if entries.borrow().contains_key(&Key::Integer(index)) =>
            {
                Key::Integer(index)
            }
            _ => Key::from(segment.text),
        }
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Sets a mapping entry or replaces an existing sequence element.
    ///
    /// Mapping entries are created or overwritten in place. Sequence writes
    /// require `0 <= index < len`; use [`append`](Self::append) to grow.
    pub fn set(&self, key: impl Into<Key>, value: impl Into<YamlValue>) -> Result<()> {
        self.store("set", key.into(), value.into(), false)
    }

    /// Sets the value at a dot path, creating missing intermediate
    /// containers.
    ///
    /// A missing intermediate becomes a sequence when the following segment
    /// is an integer and a mapping otherwise. Sequences along the path are
    /// padded with nulls up to the addressed index, at most
    /// [`MAX_SEQUENCE_PADDING`] elements past their end.
    ///
    /// Missing containers are built detached and attached only once the
    /// final write has succeeded, so a failed call leaves the tree unchanged.
    pub fn set_path(&self, path: &str, value: impl Into<YamlValue>) -> Result<()> {
        const OP: &str = "set path";

        let segments: Vec<Segment<'_>> = path::segments(path).collect();
        let Some((last, parents)) = segments.split_last() else {
            return Err(Error::EmptyPath { op: OP });
        };

        // First existing node missing a child, the child's key, and the
        // detached container standing in for it.
        let mut detached: Option<(YamlNode, Key, YamlNode)> = None;
        let mut current = self.clone();
        for (i, segment) in parents.iter().enumerate() {
            let key = current.resolve(segment);
            let mut next = current.get(key.clone());
            if next.is_null() {
                next = if segments[i + 1].index.is_some() {
                    YamlNode::array()
                } else {
                    YamlNode::object()
                };
                tracing::debug!(
                    segment = segment.text,
                    kind = next.kind_name(),
                    "creating missing container"
                );
                if detached.is_none() {
                    detached = Some((current.clone(), key, next.clone()));
                } else {
                    current.store(OP, key, next.value.clone(), true)?;
                }
            }
            current = next;
        }

        let key = current.resolve(last);
        current.store(OP, key, value.into(), true)?;

        if let Some((anchor, key, root)) = detached {
            anchor.store(OP, key, root.value, true)?;
        }
        Ok(())
    }

    fn store(&self, op: &'static str, key: Key, value: YamlValue, grow: bool) -> Result<()> {
        self.guard_cycle(op, &value)?;
        match &self.value {
            YamlValue::Object(entries) => {
                entries.borrow_mut().insert(key, value);
                Ok(())
            }
            YamlValue::Array(items) => {
                let mut items = items.borrow_mut();
                let len = items.len();
                match sequence_index(op, &key, len) {
                    Ok(index) => {
                        items[index] = value;
                        Ok(())
                    }
                    Err(Error::IndexOutOfRange { index, .. }) if grow && index >= 0 => {
                        let index = usize::try_from(index)
                            .ok()
                            .filter(|&i| i - len <= MAX_SEQUENCE_PADDING)
                            .ok_or(Error::IndexOutOfRange { op, index, len })?;
                        items.resize(index, YamlValue::Null);
                        items.push(value);
                        Ok(())
                    }
                    Err(err) => Err(err),
                }
            }
            other => Err(Error::NotContainer {
                op,
                expected: "mapping or sequence",
                found: other.kind_name(),
            }),
        }
    }

    /// Removes a mapping entry or a sequence element.
    ///
    /// Sequence elements after the removed index shift down by one. Deleting
    /// an absent mapping key is a no-op.
    pub fn delete(&self, key: impl Into<Key>) -> Result<()> {
        const OP: &str = "delete";

        let key = key.into();
        match &self.value {
            YamlValue::Object(entries) => {
                entries.borrow_mut().shift_remove(&key);
                Ok(())
            }
            YamlValue::Array(items) => {
                let mut items = items.borrow_mut();
                let index = sequence_index(OP, &key, items.len())?;
                items.remove(index);
                Ok(())
            }
            other => Err(Error::NotContainer {
                op: OP,
                expected: "mapping or sequence",
                found: other.kind_name(),
            }),
        }
    }

    /// Removes the entry at a dot path.
    pub fn delete_path(&self, path: &str) -> Result<()> {
        let segments: Vec<Segment<'_>> = path::segments(path).collect();
        let Some((last, parents)) = segments.split_last() else {
            return Err(Error::EmptyPath { op: "delete path" });
        };

        let mut current = self.clone();
        for segment in parents {
            current = current.get(current.resolve(segment));
        }
        let key = current.resolve(last);
        current.delete(key)
    }

    /// Appends a value to a sequence.
    pub fn append(&self, value: impl Into<YamlValue>) -> Result<()> {
        const OP: &str = "append";

        let value = value.into();
        let YamlValue::Array(items) = &self.value else {
            return Err(self.not_a_sequence(OP));
        };
        self.guard_cycle(OP, &value)?;
        items.borrow_mut().push(value);
        Ok(())
    }

    /// Appends each value to a sequence, in order.
    pub fn extend<I, T>(&self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<YamlValue>,
    {
        const OP: &str = "extend";

        let YamlValue::Array(items) = &self.value else {
            return Err(self.not_a_sequence(OP));
        };
        let values: Vec<YamlValue> = values.into_iter().map(Into::into).collect();
        for value in &values {
            self.guard_cycle(OP, value)?;
        }
        items.borrow_mut().extend(values);
        Ok(())
    }

    /// Shallow merge: every entry of `other` overwrites the receiver's entry
    /// with the same key. Nested containers are replaced, not merged, and end
    /// up shared between both mappings.
    pub fn update(&self, other: &YamlNode) -> Result<()> {
        const OP: &str = "update";

        let YamlValue::Object(target) = &self.value else {
            return Err(Error::NotContainer {
                op: OP,
                expected: "mapping",
                found: self.kind_name(),
            });
        };
        let YamlValue::Object(source) = &other.value else {
            return Err(Error::ArgumentType {
                op: OP,
                expected: "mapping",
                found: other.kind_name(),
            });
        };
        if self.value.shares_storage_with(&other.value) {
            return Ok(());
        }

        let entries: Vec<(Key, YamlValue)> = source
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (_, value) in &entries {
            self.guard_cycle(OP, value)?;
        }
        target.borrow_mut().extend(entries);
        Ok(())
    }

    /// An independent copy made by encoding and re-decoding the value.
    ///
    /// Returns a null node if the round trip fails; see
    /// [`try_deep_clone`](Self::try_deep_clone) to observe the error.
    pub fn deep_clone(&self) -> YamlNode {
        self.try_deep_clone().unwrap_or_default()
    }

    /// Like [`deep_clone`](Self::deep_clone), but reports codec failures.
    pub fn try_deep_clone(&self) -> Result<YamlNode> {
        let text = self.to_yaml_string()?;
        Self::parse(&text)
    }

    fn guard_cycle(&self, op: &'static str, value: &YamlValue) -> Result<()> {
        if value.reaches(&self.value) {
            Err(Error::Cycle { op })
        } else {
            Ok(())
        }
    }

    fn not_a_sequence(&self, op: &'static str) -> Error {
        Error::NotContainer {
            op,
            expected: "sequence",
            found: self.kind_name(),
        }
    }

    // ------------------------------------------------------------------
    // Type predicates
    // ------------------------------------------------------------------

    pub fn is_null(&self) -> bool {
        matches!(self.value, YamlValue::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self.value, YamlValue::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.value, YamlValue::Array(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.value, YamlValue::String(_))
    }

    /// True for both integer and float numbers.
    pub fn is_number(&self) -> bool {
        matches!(self.value, YamlValue::Number(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.value, YamlValue::Number(YamlNumber::Integer(_)))
    }

    pub fn is_float(&self) -> bool {
        matches!(self.value, YamlValue::Number(YamlNumber::Float(_)))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.value, YamlValue::Boolean(_))
    }

    /// Short name of the wrapped value's shape.
    pub fn kind_name(&self) -> &'static str {
        self.value.kind_name()
    }

    // ------------------------------------------------------------------
    // Coercion
    // ------------------------------------------------------------------

    /// The string itself, or a flow-style rendering of any other value.
    pub fn as_string(&self) -> String {
        match &self.value {
            YamlValue::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Numbers truncate toward zero; numeric strings are parsed; anything
    /// else is `0`.
    pub fn as_int(&self) -> i64 {
        match &self.value {
            YamlValue::Number(n) => n.as_i64(),
            YamlValue::String(s) => s
                .parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| YamlNumber::Float(f).as_i64()))
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// Numbers widen; numeric strings are parsed; anything else is `0.0`.
    pub fn as_float(&self) -> f64 {
        match &self.value {
            YamlValue::Number(n) => n.as_f64(),
            YamlValue::String(s) => s.parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Booleans pass through, `"true"` in any case is true, non-zero numbers
    /// are true; anything else is false.
    pub fn as_bool(&self) -> bool {
        match &self.value {
            YamlValue::Boolean(b) => *b,
            YamlValue::String(s) => s.eq_ignore_ascii_case("true"),
            YamlValue::Number(n) => !n.is_zero(),
            _ => false,
        }
    }

    /// The sequence's elements, or an empty vector for any other shape.
    pub fn as_array(&self) -> Vec<YamlNode> {
        match &self.value {
            YamlValue::Array(items) => items.borrow().iter().cloned().map(Self::from).collect(),
            _ => Vec::new(),
        }
    }

    /// The mapping's entries, or an empty map for any other shape.
    pub fn as_object(&self) -> IndexMap<Key, YamlNode> {
        match &self.value {
            YamlValue::Object(entries) => entries
                .borrow()
                .iter()
                .map(|(k, v)| (k.clone(), Self::new(v.clone())))
                .collect(),
            _ => IndexMap::new(),
        }
    }

    /// The wrapped value, without copying.
    pub fn raw(&self) -> &YamlValue {
        &self.value
    }

    pub fn into_raw(self) -> YamlValue {
        self.value
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Mapping keys in insertion order; empty for other shapes.
    pub fn keys(&self) -> Vec<Key> {
        match &self.value {
            YamlValue::Object(entries) => entries.borrow().keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Mapping values or sequence elements; empty for scalars.
    pub fn values(&self) -> Vec<YamlNode> {
        match &self.value {
            YamlValue::Object(entries) => {
                entries.borrow().values().cloned().map(Self::from).collect()
            }
            YamlValue::Array(_) => self.as_array(),
            _ => Vec::new(),
        }
    }

    /// Mapping entries in insertion order; empty for other shapes.
    pub fn items(&self) -> Vec<(Key, YamlNode)> {
        self.as_object().into_iter().collect()
    }

    /// Entry or element count; byte length for strings; `0` otherwise.
    pub fn len(&self) -> usize {
        match &self.value {
            YamlValue::Object(entries) => entries.borrow().len(),
            YamlValue::Array(items) => items.borrow().len(),
            YamlValue::String(s) => s.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Checks a sequence index against `len`.
fn sequence_index(op: &'static str, key: &Key, len: usize) -> Result<usize> {
    let Key::Integer(index) = *key else {
        return Err(Error::KeyType {
            op,
            expected: "integer",
            found: key.kind_name(),
        });
    };
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or(Error::IndexOutOfRange { op, index, len })
}

impl From<YamlValue> for YamlNode {
    fn from(value: YamlValue) -> Self {
        Self { value }
    }
}

impl From<YamlNode> for YamlValue {
    fn from(node: YamlNode) -> Self {
        node.value
    }
}

impl From<&YamlNode> for YamlValue {
    fn from(node: &YamlNode) -> Self {
        node.value.clone()
    }
}

impl FromStr for YamlNode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// YAML text, or the flow rendering if encoding fails.
impl fmt::Display for YamlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_yaml_string() {
            Ok(text) => write!(f, "{}", text),
            Err(_) => write!(f, "{}", self.value),
        }
    }
}
