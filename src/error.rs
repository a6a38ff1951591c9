//! Error types for yamlkit.
//!
//! Read-path operations (`get`, `query`, `path`, the `as_*` coercions) never
//! return errors; they degrade to a null node instead. Everything that writes,
//! either into the tree or to storage, reports one of these variants.

use std::path::PathBuf;

/// Errors produced by write-path operations, the codec and file I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The receiver does not have the shape the operation needs.
    #[error("cannot {op} on {found}: expected {expected}")]
    NotContainer {
        op: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// The key's type does not fit the receiving container.
    #[error("cannot {op}: expected {expected} key, found {found} key")]
    KeyType {
        op: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// The argument does not have the shape the operation needs.
    #[error("cannot {op}: argument is {found}, expected {expected}")]
    ArgumentType {
        op: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A sequence index outside `0..len`.
    #[error("cannot {op}: index {index} out of range for sequence of length {len}")]
    IndexOutOfRange {
        op: &'static str,
        index: i64,
        len: usize,
    },

    /// A dot path made only of separators.
    #[error("cannot {op}: empty path")]
    EmptyPath { op: &'static str },

    /// Installing the value would make a container contain itself.
    #[error("cannot {op}: value contains the receiving container")]
    Cycle { op: &'static str },

    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid YAML.
    #[error("failed to parse YAML: {0}")]
    Decode(#[source] serde_yaml::Error),

    /// The tree could not be serialized.
    #[error("failed to serialize YAML: {0}")]
    Encode(#[source] serde_yaml::Error),

    /// A mapping key that is itself a sequence or mapping.
    #[error("unsupported mapping key: {0}")]
    UnsupportedKey(String),

    /// Conversion to or from a JSON value failed.
    #[error("JSON conversion failed: {0}")]
    Conversion(String),
}

/// Convenience alias used throughout yamlkit.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_message() {
        let err = Error::IndexOutOfRange {
            op: "set",
            index: 5,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "cannot set: index 5 out of range for sequence of length 2"
        );
    }

    #[test]
    fn test_not_container_message() {
        let err = Error::NotContainer {
            op: "append",
            expected: "sequence",
            found: "string",
        };
        assert_eq!(err.to_string(), "cannot append on string: expected sequence");
    }

    #[test]
    fn test_read_error_names_path() {
        let err = Error::Read {
            path: PathBuf::from("missing.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("missing.yaml"));
    }
}
