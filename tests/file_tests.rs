//! Integration tests for file I/O operations.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};
use yamlkit::config::Config;
use yamlkit::file::loader::{load_yaml_documents, load_yaml_file};
use yamlkit::file::saver::save_yaml_file;
use yamlkit::{query, Error, YamlNode};

/// Helper function to create a temporary file path with the given name
fn temp_file_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

#[test]
fn test_load_simple_yaml_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "name: test\n").unwrap();

    let doc = load_yaml_file(temp_file.path()).unwrap();
    assert!(doc.is_object());
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.get("name").as_string(), "test");
}

#[test]
fn test_load_complex_yaml_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(
        temp_file,
        "user:
  name: Alice
  age: 30
  active: true
items: [1, 2, 3]
metadata: null
"
    )
    .unwrap();

    let doc = YamlNode::from_file(temp_file.path()).unwrap();
    assert_eq!(query!(doc, "user", "name").as_string(), "Alice");
    assert!(query!(doc, "user", "active").as_bool());
    assert_eq!(doc.get("items").len(), 3);
    assert!(doc.get("metadata").is_null());
    assert!(doc.has("metadata"));
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_yaml_file(temp_file_path(&dir, "missing.yaml")).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
}

#[test]
fn test_load_invalid_yaml_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "key: [unclosed").unwrap();

    let err = load_yaml_file(temp_file.path()).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn test_load_multiple_documents() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "multi.yaml");
    fs::write(&path, "---\nname: first\n---\nname: second\n---\nname: third\n").unwrap();

    let docs = load_yaml_documents(&path).unwrap();
    assert_eq!(docs.len(), 3);
    assert_eq!(docs[2].get("name").as_string(), "third");
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "out.yaml");

    let doc = YamlNode::object();
    doc.set("name", "Bob").unwrap();
    doc.set_path("server.port", 8080).unwrap();
    doc.set_path("server.hosts.0", "localhost").unwrap();
    save_yaml_file(&path, &doc, &Config::default()).unwrap();

    let reloaded = load_yaml_file(&path).unwrap();
    assert_eq!(reloaded, doc);
    assert_eq!(reloaded.path("server.hosts.0").as_string(), "localhost");
}

#[test]
fn test_save_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "config.yaml");
    fs::write(&path, "old: value\nother: 1\n").unwrap();

    let doc = load_yaml_file(&path).unwrap();
    doc.delete("old").unwrap();
    doc.set("new", "value").unwrap();
    doc.save(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "other: 1\nnew: value\n");
}

#[test]
fn test_save_with_backup() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "config.yaml");
    fs::write(&path, "version: 1\n").unwrap();

    let config = Config {
        create_backup: true,
        ..Config::default()
    };
    let doc = YamlNode::object_from([("version", 2)]);
    save_yaml_file(&path, &doc, &config).unwrap();

    let backup = temp_file_path(&dir, "config.yaml.bak");
    assert_eq!(fs::read_to_string(backup).unwrap(), "version: 1\n");
    assert_eq!(load_yaml_file(&path).unwrap().get("version").as_int(), 2);
}

#[test]
fn test_save_without_atomic_write() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "plain.yaml");

    let config = Config {
        atomic_write: false,
        ..Config::default()
    };
    save_yaml_file(&path, &YamlNode::array_from([1, 2]), &config).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "- 1\n- 2\n");
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("out.yaml");

    let err = save_yaml_file(&path, &YamlNode::object(), &Config::default()).unwrap_err();
    assert!(matches!(err, Error::Write { .. }));
}

// ============================================================================
// Gzip Tests
// ============================================================================

#[test]
fn test_gzip_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "data.yaml.gz");

    let doc = YamlNode::parse("name: compressed\nitems: [a, b, c]\n").unwrap();
    save_yaml_file(&path, &doc, &Config::default()).unwrap();

    // Gzip magic bytes
    let raw = fs::read(&path).unwrap();
    assert_eq!(&raw[..2], &[0x1f, 0x8b]);

    let reloaded = load_yaml_file(&path).unwrap();
    assert_eq!(reloaded, doc);
    assert_eq!(reloaded.path("items.2").as_string(), "c");
}

#[test]
fn test_gzip_multiple_documents() {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "multi.yaml.gz");
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b"a: 1\n---\na: 2\n").unwrap();
    fs::write(&path, encoder.finish().unwrap()).unwrap();

    let docs = load_yaml_documents(&path).unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[1].get("a").as_int(), 2);
}

#[test]
fn test_corrupt_gzip_file() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "broken.yaml.gz");
    fs::write(&path, b"not gzip at all").unwrap();

    assert!(matches!(load_yaml_file(&path), Err(Error::Read { .. })));
}
