//! YAML file loading functionality.
//!
//! This module provides functions to load YAML documents from files or stdin
//! into [`YamlNode`]s. Gzip-compressed input is detected by a `.gz`
//! extension for files and by the gzip magic bytes for stdin.
//!
//! Storage failures (missing file, permissions, corrupt gzip stream) are
//! reported as [`Error::Read`]; content that is not YAML as
//! [`Error::Decode`].

use crate::document::tree::YamlNode;
use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads and parses a YAML file from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use yamlkit::file::loader::load_yaml_file;
///
/// let doc = load_yaml_file("config.yaml").unwrap();
/// println!("{}", doc.path("server.port").as_int());
/// ```
///
/// # Errors
///
/// Returns [`Error::Read`] if the file cannot be read or decompressed and
/// [`Error::Decode`] if its contents are not valid YAML.
pub fn load_yaml_file<P: AsRef<Path>>(path: P) -> Result<YamlNode> {
    let bytes = read_file(path.as_ref())?;
    YamlNode::from_slice(&bytes)
}

/// Loads every document of a multi-document YAML file.
pub fn load_yaml_documents<P: AsRef<Path>>(path: P) -> Result<Vec<YamlNode>> {
    let path = path.as_ref();
    let bytes = read_file(path)?;
    let text = String::from_utf8(bytes).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })?;
    YamlNode::parse_all(&text)
}

/// Loads and parses YAML from standard input.
///
/// Gzip input is recognised by its magic bytes and decompressed.
///
/// # Examples
///
/// ```no_run
/// use yamlkit::file::loader::load_yaml_from_stdin;
///
/// // Usage: echo 'key: value' | yamlkit get -
/// let doc = load_yaml_from_stdin().unwrap();
/// ```
pub fn load_yaml_from_stdin() -> Result<YamlNode> {
    let stdin_error = |source| Error::Read {
        path: PathBuf::from("<stdin>"),
        source,
    };

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer).map_err(stdin_error)?;

    let bytes = if buffer.starts_with(&GZIP_MAGIC) {
        decompress_gzip_bytes(&buffer).map_err(stdin_error)?
    } else {
        buffer
    };

    tracing::debug!(bytes = bytes.len(), "loaded YAML from stdin");
    YamlNode::from_slice(&bytes)
}

/// Reads a file, decompressing it when the name ends in `.gz`.
fn read_file(path: &Path) -> Result<Vec<u8>> {
    let compressed = is_gzipped(path);
    let bytes = if compressed {
        read_gzipped_file(path)
    } else {
        fs::read(path)
    }
    .map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        compressed,
        "loaded YAML file"
    );
    Ok(bytes)
}

/// Returns true if the file name ends in `.gz`.
fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false)
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file(path: &Path) -> io::Result<Vec<u8>> {
    let file = fs::File::open(path)?;
    let mut decoder = GzDecoder::new(file);
    let mut content = Vec::new();
    decoder.read_to_end(&mut content)?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes.
fn decompress_gzip_bytes(bytes: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut content = Vec::new();
    decoder.read_to_end(&mut content)?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::TempDir;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("data.yaml.gz")));
        assert!(!is_gzipped(Path::new("data.yaml")));
        assert!(!is_gzipped(Path::new("gz")));
    }

    #[test]
    fn test_decompress_gzip_bytes() {
        let compressed = gzip(b"a: 1\n");
        assert_eq!(decompress_gzip_bytes(&compressed).unwrap(), b"a: 1\n");
        assert!(compressed.starts_with(&GZIP_MAGIC));
    }

    #[test]
    fn test_load_gzipped_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml.gz");
        fs::write(&path, gzip(b"name: Alice\nage: 30\n")).unwrap();

        let doc = load_yaml_file(&path).unwrap();
        assert_eq!(doc.get("name").as_string(), "Alice");
        assert_eq!(doc.get("age").as_int(), 30);
    }

    #[test]
    fn test_load_corrupted_gzip_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml.gz");
        fs::write(&path, b"not gzip data").unwrap();

        let result = load_yaml_file(&path);
        assert!(matches!(result, Err(Error::Read { .. })));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let result = load_yaml_file(dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(Error::Read { .. })));
    }

    #[test]
    fn test_load_invalid_yaml_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "key: [unclosed").unwrap();

        let result = load_yaml_file(&path);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_load_documents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("multi.yaml");
        fs::write(&path, "a: 1\n---\na: 2\n").unwrap();

        let docs = load_yaml_documents(&path).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].get("a").as_int(), 2);
    }
}
