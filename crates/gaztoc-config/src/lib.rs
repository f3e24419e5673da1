//! Configuration for gaztoc.
//!
//! Reads the project's `config/pipeline.toml`, which names the build
//! environments (`dev`, `staging`, `prod`, ...) and where their output lives,
//! and resolves an environment name to the directory gaztoc should scan.
pub mod config;
pub mod error;

pub use crate::{
  config::{CONFIG_DIR, Config, EnvironmentConfig, PIPELINE_FILE, TocConfig},
  error::ConfigError,
};
