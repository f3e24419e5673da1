use std::{io, path::PathBuf};

use thiserror::Error;

/// Error type for gaztoc-config operations
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Failed to read config file {}: {source}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Unknown environment '{name}'. Available environments: {available}")]
  UnknownEnvironment { name: String, available: String },

  #[error("Project root not found (no {0}/ directory above the current one)")]
  ProjectRootNotFound(&'static str),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("TOML error: {0}")]
  Toml(#[from] toml::de::Error),
}
