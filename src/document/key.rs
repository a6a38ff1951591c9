//! Mapping keys.
//!
//! A YAML decoder can hand back mappings keyed by strings or by arbitrary
//! scalars. yamlkit normalizes both into [`Key`] at decode time, so every
//! mapping in a tree is an `IndexMap<Key, YamlValue>` and lookups compare keys
//! by dynamic type and value: `Key::Integer(1)` never matches `Key::String("1")`.
//!
//! # Example
//!
//! ```
//! use yamlkit::Key;
//!
//! assert_eq!(Key::from("name"), Key::String("name".to_string()));
//! assert_eq!(Key::from(3), Key::Integer(3));
//! assert_ne!(Key::from(1), Key::from("1"));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

/// A scalar mapping key, also used as the index type for sequence access.
#[derive(Debug, Clone)]
pub enum Key {
    Null,
    Boolean(bool),
    Integer(i64),
    /// Compared and hashed by bit pattern.
    Float(f64),
    String(String),
}

impl Key {
    /// Short name of the key's type, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Key::Null => "null",
            Key::Boolean(_) => "boolean",
            Key::Integer(_) => "integer",
            Key::Float(_) => "float",
            Key::String(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Key::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Key::String(_))
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Null, Key::Null) => true,
            (Key::Boolean(a), Key::Boolean(b)) => a == b,
            (Key::Integer(a), Key::Integer(b)) => a == b,
            (Key::Float(a), Key::Float(b)) => a.to_bits() == b.to_bits(),
            (Key::String(a), Key::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Key::Null => {}
            Key::Boolean(b) => b.hash(state),
            Key::Integer(i) => i.hash(state),
            Key::Float(f) => f.to_bits().hash(state),
            Key::String(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Null => write!(f, "null"),
            Key::Boolean(b) => write!(f, "{}", b),
            Key::Integer(i) => write!(f, "{}", i),
            Key::Float(fl) => write!(f, "{}", fl),
            Key::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::String(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::String(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::String(s.clone())
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Boolean(b)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Integer(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Integer(i64::from(i))
    }
}

impl From<u32> for Key {
    fn from(i: u32) -> Self {
        Key::Integer(i64::from(i))
    }
}

// Saturates at i64::MAX.
impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Integer(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Key {
    fn from(f: f64) -> Self {
        Key::Float(f)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}
