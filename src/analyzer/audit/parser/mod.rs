//! Manifest parsing for offline audits.

pub mod yaml;

pub use yaml::{YamlParseError, parse_path, parse_yaml, parse_yaml_dir, parse_yaml_file};
