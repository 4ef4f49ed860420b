//! Settings, read from an optional file and the environment.
//!
//! ```toml
//! # breadcrumb.toml
//! query = "causality"
//! max_depth = 16
//! log_filter = "breadcrumb=debug"
//! ```
//!
//! Environment variables prefixed with `BREADCRUMB_` (e.g.
//! `BREADCRUMB_MAX_DEPTH=4`) override the file.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::witness::Query;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub query: Query,
    pub max_depth: Option<usize>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            query: Query::Provenance,
            max_depth: None,
            log_filter: String::from("info"),
        }
    }
}

impl Settings {
    /// Loads `<name>.{toml,json,yaml,...}` if present, then the environment.
    pub fn load(name: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("BREADCRUMB"))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
