//! yamlkit - dictionary-style navigation, mutation and conversion for YAML
//! documents.
//!
//! ```
//! use yamlkit::YamlNode;
//!
//! let config = YamlNode::object();
//! config.set_path("server.port", 8080).unwrap();
//! config.set_path("server.hosts.0", "localhost").unwrap();
//! assert_eq!(config.path("server.port").as_int(), 8080);
//! assert_eq!(config.path("server.hosts.0").as_string(), "localhost");
//!
//! let json = config.to_json().unwrap();
//! assert_eq!(json["server"]["port"], 8080);
//! ```

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod file;

pub use document::key::Key;
pub use document::node::{YamlNumber, YamlValue};
pub use document::tree::YamlNode;
pub use error::{Error, Result};
