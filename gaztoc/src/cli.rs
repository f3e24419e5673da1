use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use gaztoc_config::{Config, ConfigError};
use gaztoc_html::RunOptions;

/// Command line interface for gaztoc
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Add heading anchors and a table of contents to HTML content files"
)]
pub struct Cli {
  /// Environment whose publish directory should be processed (dev, staging,
  /// prod, ...)
  #[arg(
    short,
    long,
    conflicts_with = "root",
    required_unless_present = "root"
  )]
  pub environment: Option<String>,

  /// Process this directory directly instead of an environment's output
  #[arg(short, long)]
  pub root: Option<PathBuf>,

  /// Remove the table of contents and heading ids instead of adding them
  #[arg(long)]
  pub strip: bool,

  /// Regenerate files that already carry a table of contents
  #[arg(long)]
  pub force: bool,

  /// Report what would change without writing any file
  #[arg(long = "dry-run")]
  pub dry_run: bool,

  /// Number of threads to use for parallel processing
  #[arg(short, long)]
  pub jobs: Option<usize>,

  /// Path to the pipeline configuration file (TOML or JSON). Discovered from
  /// the project's `config/` directory when omitted
  #[arg(short = 'c', long = "config-file")]
  pub config_file: Option<PathBuf>,

  /// Output format of the run report
  #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
  pub format: ReportFormat,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,
}

/// How the run report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
  /// Human readable lines with a summary block
  Text,

  /// A single JSON document
  Json,
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Operation name used in the banner and the final status line.
  #[must_use]
  pub const fn mode(&self) -> &'static str {
    if self.strip { "Strip" } else { "Generate" }
  }

  /// Directory to process: `--root` as given, or the publish directory of
  /// the selected environment.
  ///
  /// # Errors
  ///
  /// Fails when the environment is unknown or no project root is known.
  pub fn target_dir(&self, config: &Config) -> Result<PathBuf, ConfigError> {
    if let Some(root) = &self.root {
      return Ok(root.clone());
    }
    let name = self.environment.as_deref().ok_or_else(|| {
      ConfigError::Config(
        "either --environment or --root is required".to_string(),
      )
    })?;
    config.environment_dir(name)
  }

  /// Run switches, with command line values taking precedence over the
  /// `[toc]` table of the configuration.
  #[must_use]
  pub fn run_options(&self, config: &Config) -> RunOptions {
    RunOptions {
      strip:         self.strip,
      force:         self.force,
      dry_run:       self.dry_run,
      jobs:          self.jobs.or(config.toc.jobs),
      section_title: config.toc.section_title.clone(),
    }
  }
}
