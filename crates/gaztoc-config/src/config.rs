use std::{
  collections::BTreeMap,
  fs,
  path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Directory that marks the project root and holds the pipeline config.
pub const CONFIG_DIR: &str = "config";

/// Pipeline configuration file inside [`CONFIG_DIR`].
pub const PIPELINE_FILE: &str = "pipeline.toml";

/// Directory under the project root where environments are built.
pub const PUBLISH_DIR: &str = "publish";

fn default_section_title() -> String {
  "Contents".to_string()
}

/// One build environment, e.g. `[environments.dev]`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct EnvironmentConfig {
  /// Directory name under `publish/`; defaults to the environment name
  #[serde(default)]
  pub dir: Option<String>,

  /// Human-readable description
  #[serde(default)]
  pub description: String,
}

impl EnvironmentConfig {
  /// Directory name for the environment called `name`.
  #[must_use]
  pub fn dir_name<'a>(&'a self, name: &'a str) -> &'a str {
    self.dir.as_deref().unwrap_or(name)
  }
}

/// Settings of the TOC tool itself, from the `[toc]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TocConfig {
  /// Number of worker threads
  #[serde(default)]
  pub jobs: Option<usize>,

  /// Label shown above the heading list
  #[serde(default = "default_section_title")]
  pub section_title: String,
}

impl Default for TocConfig {
  fn default() -> Self {
    Self {
      jobs:          None,
      section_title: default_section_title(),
    }
  }
}

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
  /// Known environments by name
  #[serde(default)]
  pub environments: BTreeMap<String, EnvironmentConfig>,

  /// TOC tool settings
  #[serde(default)]
  pub toc: TocConfig,

  /// Root the environment directories are resolved against
  #[serde(skip)]
  pub project_root: Option<PathBuf>,
}

impl Config {
  /// Create a new configuration from a file.
  /// Only TOML and JSON are supported for the time being.
  ///
  /// # Errors
  ///
  /// Fails if the file cannot be read, has no or an unknown extension, or
  /// does not parse.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| {
      ConfigError::Read {
        path: path.to_path_buf(),
        source,
      }
    })?;

    let mut config: Self = match path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase)
      .as_deref()
    {
      Some("toml") => toml::from_str(&content)?,
      Some("json") => serde_json::from_str(&content)?,
      _ => {
        return Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )));
      },
    };

    config.project_root = Some(project_root_for(path));
    Ok(config)
  }

  /// Walk up from `start` to the first directory containing [`CONFIG_DIR`].
  #[must_use]
  pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
      .ancestors()
      .find(|dir| dir.join(CONFIG_DIR).is_dir())
      .map(Path::to_path_buf)
  }

  /// Load `config/pipeline.toml` from the project root above `start`.
  ///
  /// Returns `Ok(None)` when there is no project root or it has no pipeline
  /// file.
  ///
  /// # Errors
  ///
  /// Fails if a pipeline file exists but cannot be read or parsed.
  pub fn discover(start: &Path) -> Result<Option<Self>, ConfigError> {
    let Some(root) = Self::find_project_root(start) else {
      return Ok(None);
    };
    let path = root.join(CONFIG_DIR).join(PIPELINE_FILE);
    if !path.is_file() {
      return Ok(None);
    }
    debug!("Using discovered config file: {}", path.display());
    Self::from_file(path).map(Some)
  }

  /// Load the explicit config file if given, else discover one from `start`,
  /// else fall back to defaults.
  ///
  /// # Errors
  ///
  /// Propagates read and parse errors of whichever file is used.
  pub fn load(explicit: Option<&Path>, start: &Path) -> Result<Self, ConfigError> {
    if let Some(path) = explicit {
      return Self::from_file(path);
    }
    Ok(Self::discover(start)?.unwrap_or_else(|| {
      Self {
        project_root: Self::find_project_root(start),
        ..Self::default()
      }
    }))
  }

  /// Look up an environment by name.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::UnknownEnvironment`] listing the known names.
  pub fn environment(
    &self,
    name: &str,
  ) -> Result<&EnvironmentConfig, ConfigError> {
    self.environments.get(name).ok_or_else(|| {
      ConfigError::UnknownEnvironment {
        name:      name.to_string(),
        available: self
          .environments
          .keys()
          .cloned()
          .collect::<Vec<_>>()
          .join(", "),
      }
    })
  }

  /// Output directory of environment `name`: `<project root>/publish/<dir>`.
  ///
  /// # Errors
  ///
  /// Fails for unknown environments or when no project root is known.
  pub fn environment_dir(&self, name: &str) -> Result<PathBuf, ConfigError> {
    let environment = self.environment(name)?;
    let root = self
      .project_root
      .as_ref()
      .ok_or(ConfigError::ProjectRootNotFound(CONFIG_DIR))?;
    Ok(root.join(PUBLISH_DIR).join(environment.dir_name(name)))
  }
}

/// The project root for a config file: the parent of its `config/`
/// directory, or the directory holding the file.
fn project_root_for(path: &Path) -> PathBuf {
  let parent = path.parent().unwrap_or_else(|| Path::new("."));
  match parent.file_name() {
    Some(name) if name == CONFIG_DIR => {
      parent.parent().unwrap_or(parent).to_path_buf()
    },
    _ => parent.to_path_buf(),
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can unwrap")]

  use tempfile::tempdir;

  use super::*;

  const PIPELINE: &str = r#"
[environments.dev]
description = "Local development"
httpd_port = 7190

[environments.prod]
dir = "production"

[toc]
jobs = 2
"#;

  fn project() -> tempfile::TempDir {
    let dir = tempdir().expect("Failed to create temp dir in test");
    let config_dir = dir.path().join(CONFIG_DIR);
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join(PIPELINE_FILE), PIPELINE).unwrap();
    fs::create_dir_all(dir.path().join("publish/dev/content")).unwrap();
    dir
  }

  #[test]
  fn test_parse_environments() {
    let dir = project();
    let config =
      Config::from_file(dir.path().join(CONFIG_DIR).join(PIPELINE_FILE))
        .unwrap();

    assert_eq!(config.environments.len(), 2);
    assert_eq!(config.environment("dev").unwrap().description, "Local development");
    assert_eq!(config.toc.jobs, Some(2));
    assert_eq!(config.toc.section_title, "Contents");
    assert_eq!(config.project_root.as_deref(), Some(dir.path()));
  }

  #[test]
  fn test_environment_dir() {
    let dir = project();
    let config = Config::discover(&dir.path().join("publish/dev/content"))
      .unwrap()
      .expect("Config should be discovered");

    assert_eq!(
      config.environment_dir("dev").unwrap(),
      dir.path().join("publish").join("dev")
    );
    assert_eq!(
      config.environment_dir("prod").unwrap(),
      dir.path().join("publish").join("production")
    );
  }

  #[test]
  fn test_unknown_environment_lists_available() {
    let dir = project();
    let config = Config::load(None, dir.path()).unwrap();
    let err = config.environment("staging").unwrap_err();
    assert_eq!(
      err.to_string(),
      "Unknown environment 'staging'. Available environments: dev, prod"
    );
  }

  #[test]
  fn test_load_without_pipeline_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir in test");
    let config = Config::load(None, dir.path()).unwrap();
    assert!(config.environments.is_empty());
    assert_eq!(config.toc, TocConfig::default());
  }

  #[test]
  fn test_json_config_and_root_outside_config_dir() {
    let dir = tempdir().expect("Failed to create temp dir in test");
    let path = dir.path().join("pipeline.json");
    fs::write(
      &path,
      r#"{"environments": {"dev": {}}, "toc": {"section_title": "On this page"}}"#,
    )
    .unwrap();

    let config = Config::load(Some(&path), Path::new("/")).unwrap();
    assert_eq!(config.toc.section_title, "On this page");
    assert_eq!(
      config.environment_dir("dev").unwrap(),
      dir.path().join("publish").join("dev")
    );
  }

  #[test]
  fn test_unsupported_extension() {
    let dir = tempdir().expect("Failed to create temp dir in test");
    let path = dir.path().join("pipeline.yaml");
    fs::write(&path, "environments: {}").unwrap();
    assert!(matches!(
      Config::from_file(&path),
      Err(ConfigError::Config(_))
    ));
  }

  #[test]
  fn test_invalid_toml() {
    let dir = tempdir().expect("Failed to create temp dir in test");
    let path = dir.path().join("pipeline.toml");
    fs::write(&path, "[environments.dev\n").unwrap();
    assert!(matches!(Config::from_file(&path), Err(ConfigError::Toml(_))));
  }
}
