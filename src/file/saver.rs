//! YAML file saving functionality.
//!
//! This module writes [`YamlNode`]s to disk. Depending on the [`Config`],
//! the write is atomic (temp file then rename), preceded by a `.bak` copy of
//! the previous file, and given explicit permission bits. Targets ending in
//! `.gz` are gzip-compressed.

use crate::config::Config;
use crate::document::tree::YamlNode;
use crate::error::{Error, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Saves a YAML node to a file.
///
/// # Examples
///
/// ```no_run
/// use yamlkit::config::Config;
/// use yamlkit::file::saver::save_yaml_file;
/// use yamlkit::YamlNode;
///
/// let doc = YamlNode::object();
/// doc.set("name", "Alice").unwrap();
/// save_yaml_file("output.yaml", &doc, &Config::default()).unwrap();
/// ```
///
/// # Errors
///
/// Returns [`Error::Encode`] if the node cannot be serialized and
/// [`Error::Write`] if the backup, the temp file, compression or the final
/// rename fails. The target is left untouched when serialization fails.
pub fn save_yaml_file<P: AsRef<Path>>(path: P, node: &YamlNode, config: &Config) -> Result<()> {
    let path = path.as_ref();
    let text = node.to_yaml_string()?;

    let write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    if config.create_backup && path.exists() {
        create_backup(path).map_err(write_error)?;
    }

    let compress = path.to_string_lossy().ends_with(".gz");
    let data = if compress {
        gzip(text.as_bytes()).map_err(write_error)?
    } else {
        text.into_bytes()
    };

    if config.atomic_write {
        write_file_atomic(path, &data, config.file_mode)
    } else {
        write_file(path, &data, config.file_mode)
    }
    .map_err(write_error)?;

    tracing::debug!(
        path = %path.display(),
        bytes = data.len(),
        compressed = compress,
        "saved YAML file"
    );
    Ok(())
}

/// Creates a backup of a file by copying it with a .bak extension.
fn create_backup(path: &Path) -> io::Result<()> {
    fs::copy(path, sibling_with_suffix(path, "bak")?)?;
    Ok(())
}

/// `dir/name.ext` becomes `dir/name.ext.<suffix>`.
fn sibling_with_suffix(path: &Path, suffix: &str) -> io::Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid file name"))?;
    Ok(path.with_file_name(format!("{}.{}", name, suffix)))
}

fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Writes to a temporary sibling first, then renames it over the target so
/// the target is never left partially written.
fn write_file_atomic(path: &Path, data: &[u8], mode: u32) -> io::Result<()> {
    let temp_path = sibling_with_suffix(path, "tmp")?;
    write_file(&temp_path, data, mode)?;
    fs::rename(&temp_path, path).map_err(|err| {
        let _ = fs::remove_file(&temp_path);
        err
    })
}

fn write_file(path: &Path, data: &[u8], mode: u32) -> io::Result<()> {
    fs::write(path, data)?;
    set_mode(path, mode)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}
