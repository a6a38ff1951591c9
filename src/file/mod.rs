//! File I/O operations for YAML documents.
//!
//! This module provides functionality to load YAML files from disk or stdin,
//! and save YAML nodes back to files with atomic write operations and optional backups.

pub mod loader;
pub mod saver;
