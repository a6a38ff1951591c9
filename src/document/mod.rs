//! YAML document model.
//!
//! - [`node`] holds the value types ([`YamlValue`](node::YamlValue), [`YamlNumber`](node::YamlNumber)).
//! - [`key`] holds the canonical mapping key type.
//! - [`codec`] converts between YAML text and values.
//! - [`path`] splits dot paths into segments.
//! - [`tree`] provides [`YamlNode`](tree::YamlNode), the accessor handle.

pub mod codec;
pub mod key;
pub mod node;
pub mod path;
pub mod tree;
