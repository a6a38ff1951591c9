//! YAML value representation.
//!
//! This module provides the closed set of shapes a decoded YAML value can
//! take. Scalars are stored inline; sequences and mappings live behind shared
//! handles ([`Shared`]) so that a value obtained by navigating into a tree
//! still points at the tree's own storage. Cloning a `YamlValue` therefore
//! copies scalars but aliases containers.
//!
//! # Example
//!
//! ```
//! use yamlkit::document::node::{YamlValue, YamlNumber};
//! use yamlkit::Key;
//!
//! let list = YamlValue::array(vec![YamlValue::from("a")]);
//! let alias = list.clone();
//! if let YamlValue::Array(items) = &alias {
//!     items.borrow_mut().push(YamlValue::from("b"));
//! }
//! // Both handles see the push.
//! assert_eq!(list, YamlValue::array(vec!["a".into(), "b".into()]));
//!
//! let mut map = indexmap::IndexMap::new();
//! map.insert(Key::from("version"), YamlValue::Number(YamlNumber::Integer(1)));
//! let object = YamlValue::object(map);
//! assert!(object.is_container());
//! ```

use super::key::Key;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared, interior-mutable storage for container values.
pub type Shared<T> = Rc<RefCell<T>>;

/// The element storage of a YAML sequence.
pub type Sequence = Vec<YamlValue>;

/// The entry storage of a YAML mapping, in insertion order.
pub type Mapping = IndexMap<Key, YamlValue>;

/// Represents YAML numbers (integer or float)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YamlNumber {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for YamlNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YamlNumber::Integer(i) => write!(f, "{}", i),
            YamlNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl YamlNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            YamlNumber::Integer(i) => *i as f64,
            YamlNumber::Float(f) => *f,
        }
    }

    /// Truncates toward zero; out-of-range floats saturate and NaN becomes 0.
    pub fn as_i64(&self) -> i64 {
        match self {
            YamlNumber::Integer(i) => *i,
            YamlNumber::Float(f) => f.trunc() as i64,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, YamlNumber::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, YamlNumber::Float(_))
    }

    pub fn is_zero(&self) -> bool {
        match self {
            YamlNumber::Integer(i) => *i == 0,
            YamlNumber::Float(f) => *f == 0.0,
        }
    }
}

/// A decoded YAML value.
///
/// Equality is structural and deep: two containers are equal when their
/// contents are, whether or not they share storage. Mapping equality ignores
/// entry order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum YamlValue {
    /// A YAML null value
    #[default]
    Null,
    /// A YAML boolean
    Boolean(bool),
    /// A YAML number (integer or float)
    Number(YamlNumber),
    /// A YAML string
    String(String),
    /// A YAML sequence
    Array(Shared<Sequence>),
    /// A YAML mapping
    Object(Shared<Mapping>),
}

impl YamlValue {
    /// Wraps `items` in fresh sequence storage.
    pub fn array(items: Sequence) -> Self {
        YamlValue::Array(Rc::new(RefCell::new(items)))
    }

    /// Wraps `entries` in fresh mapping storage.
    pub fn object(entries: Mapping) -> Self {
        YamlValue::Object(Rc::new(RefCell::new(entries)))
    }

    /// Short name of the value's shape, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            YamlValue::Null => "null",
            YamlValue::Boolean(_) => "boolean",
            YamlValue::Number(YamlNumber::Integer(_)) => "integer",
            YamlValue::Number(YamlNumber::Float(_)) => "float",
            YamlValue::String(_) => "string",
            YamlValue::Array(_) => "sequence",
            YamlValue::Object(_) => "mapping",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, YamlValue::Array(_) | YamlValue::Object(_))
    }

    /// Returns true if `self` and `other` are handles to the same container.
    pub fn shares_storage_with(&self, other: &YamlValue) -> bool {
        match (self.container_ptr(), other.container_ptr()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Returns true if `target` is a container reachable from `self`,
    /// including `self` itself.
    pub(crate) fn reaches(&self, target: &YamlValue) -> bool {
        let Some(ptr) = target.container_ptr() else {
            return false;
        };

        fn walk(value: &YamlValue, ptr: *const ()) -> bool {
            if value.container_ptr() == Some(ptr) {
                return true;
            }
            match value {
                YamlValue::Array(items) => items.borrow().iter().any(|item| walk(item, ptr)),
                YamlValue::Object(entries) => {
                    entries.borrow().values().any(|item| walk(item, ptr))
                }
                _ => false,
            }
        }

        walk(self, ptr)
    }

    fn container_ptr(&self) -> Option<*const ()> {
        match self {
            YamlValue::Array(items) => Some(Rc::as_ptr(items) as *const ()),
            YamlValue::Object(entries) => Some(Rc::as_ptr(entries) as *const ()),
            _ => None,
        }
    }
}

/// Flow-style rendering: `null`, `true`, `42`, `text`, `[a, b]`, `{k: v}`.
impl fmt::Display for YamlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YamlValue::Null => write!(f, "null"),
            YamlValue::Boolean(b) => write!(f, "{}", b),
            YamlValue::Number(n) => write!(f, "{}", n),
            YamlValue::String(s) => write!(f, "{}", s),
            YamlValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            YamlValue::Object(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for YamlValue {
    fn from(b: bool) -> Self {
        YamlValue::Boolean(b)
    }
}

impl From<i64> for YamlValue {
    fn from(i: i64) -> Self {
        YamlValue::Number(YamlNumber::Integer(i))
    }
}

impl From<i32> for YamlValue {
    fn from(i: i32) -> Self {
        YamlValue::Number(YamlNumber::Integer(i64::from(i)))
    }
}

impl From<u32> for YamlValue {
    fn from(i: u32) -> Self {
        YamlValue::Number(YamlNumber::Integer(i64::from(i)))
    }
}

impl From<u64> for YamlValue {
    fn from(i: u64) -> Self {
        match i64::try_from(i) {
            Ok(i) => YamlValue::Number(YamlNumber::Integer(i)),
            Err(_) => YamlValue::Number(YamlNumber::Float(i as f64)),
        }
    }
}

impl From<usize> for YamlValue {
    fn from(i: usize) -> Self {
        YamlValue::from(i as u64)
    }
}

impl From<f64> for YamlValue {
    fn from(f: f64) -> Self {
        YamlValue::Number(YamlNumber::Float(f))
    }
}

impl From<f32> for YamlValue {
    fn from(f: f32) -> Self {
        YamlValue::Number(YamlNumber::Float(f64::from(f)))
    }
}

impl From<YamlNumber> for YamlValue {
    fn from(n: YamlNumber) -> Self {
        YamlValue::Number(n)
    }
}

impl From<&str> for YamlValue {
    fn from(s: &str) -> Self {
        YamlValue::String(s.to_string())
    }
}

impl From<String> for YamlValue {
    fn from(s: String) -> Self {
        YamlValue::String(s)
    }
}

impl From<&String> for YamlValue {
    fn from(s: &String) -> Self {
        YamlValue::String(s.clone())
    }
}

impl From<Key> for YamlValue {
    fn from(key: Key) -> Self {
        match key {
            Key::Null => YamlValue::Null,
            Key::Boolean(b) => YamlValue::Boolean(b),
            Key::Integer(i) => YamlValue::Number(YamlNumber::Integer(i)),
            Key::Float(f) => YamlValue::Number(YamlNumber::Float(f)),
            Key::String(s) => YamlValue::String(s),
        }
    }
}

impl<T: Into<YamlValue>> From<Option<T>> for YamlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(YamlValue::Null, Into::into)
    }
}

impl<T: Into<YamlValue>> From<Vec<T>> for YamlValue {
    fn from(items: Vec<T>) -> Self {
        YamlValue::array(items.into_iter().map(Into::into).collect())
    }
}

impl From<Mapping> for YamlValue {
    fn from(entries: Mapping) -> Self {
        YamlValue::object(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_number_display() {
        let int = YamlNumber::Integer(42);
        assert_eq!(format!("{}", int), "42");

        let float = YamlNumber::Float(42.5);
        assert_eq!(format!("{}", float), "42.5");
    }

    #[test]
    fn test_yaml_number_type_checks() {
        let int = YamlNumber::Integer(42);
        assert!(int.is_integer());
        assert!(!int.is_float());

        let float = YamlNumber::Float(42.0);
        assert!(float.is_float());
        assert!(!float.is_integer());
    }

    #[test]
    fn test_yaml_number_truncation() {
        assert_eq!(YamlNumber::Float(3.9).as_i64(), 3);
        assert_eq!(YamlNumber::Float(-3.9).as_i64(), -3);
        assert_eq!(YamlNumber::Float(f64::NAN).as_i64(), 0);
        assert_eq!(YamlNumber::Float(1e300).as_i64(), i64::MAX);
    }

    #[test]
    fn test_clone_aliases_containers() {
        let original = YamlValue::array(vec![]);
        let alias = original.clone();
        assert!(original.shares_storage_with(&alias));

        if let YamlValue::Array(items) = &alias {
            items.borrow_mut().push(YamlValue::from(1));
        }
        match &original {
            YamlValue::Array(items) => assert_eq!(items.borrow().len(), 1),
            _ => panic!("Expected sequence"),
        }
    }

    #[test]
    fn test_equality_is_structural() {
        let a = YamlValue::from(vec![1, 2]);
        let b = YamlValue::from(vec![1, 2]);
        assert_eq!(a, b);
        assert!(!a.shares_storage_with(&b));
    }

    #[test]
    fn test_mapping_equality_ignores_order() {
        let mut first = Mapping::new();
        first.insert(Key::from("a"), YamlValue::from(1));
        first.insert(Key::from("b"), YamlValue::from(2));
        let mut second = Mapping::new();
        second.insert(Key::from("b"), YamlValue::from(2));
        second.insert(Key::from("a"), YamlValue::from(1));
        assert_eq!(YamlValue::object(first), YamlValue::object(second));
    }

    #[test]
    fn test_reaches_finds_nested_container() {
        let inner = YamlValue::array(vec![]);
        let mut entries = Mapping::new();
        entries.insert(Key::from("list"), inner.clone());
        let outer = YamlValue::object(entries);

        assert!(outer.reaches(&inner));
        assert!(outer.reaches(&outer));
        assert!(!inner.reaches(&outer));
        assert!(!outer.reaches(&YamlValue::from(1)));
    }

    #[test]
    fn test_flow_display() {
        let mut entries = Mapping::new();
        entries.insert(Key::from("name"), YamlValue::from("Alice"));
        entries.insert(Key::from("tags"), YamlValue::from(vec!["a", "b"]));
        entries.insert(Key::from("score"), YamlValue::from(2.5));
        entries.insert(Key::from("extra"), YamlValue::Null);
        let value = YamlValue::object(entries);
        assert_eq!(
            value.to_string(),
            "{name: Alice, tags: [a, b], score: 2.5, extra: null}"
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(YamlValue::Null.kind_name(), "null");
        assert_eq!(YamlValue::from(1).kind_name(), "integer");
        assert_eq!(YamlValue::from(1.0).kind_name(), "float");
        assert_eq!(YamlValue::from(vec![1]).kind_name(), "sequence");
        assert_eq!(YamlValue::object(Mapping::new()).kind_name(), "mapping");
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        assert_eq!(YamlValue::from(7u64), YamlValue::from(7i64));
        assert!(matches!(
            YamlValue::from(u64::MAX),
            YamlValue::Number(YamlNumber::Float(_))
        ));
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(YamlValue::from(None::<i64>), YamlValue::Null);
        assert_eq!(YamlValue::from(Some("x")), YamlValue::from("x"));
    }
}
