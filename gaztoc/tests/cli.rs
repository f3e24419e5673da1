#![allow(clippy::expect_used, reason = "Fine in tests")]
use std::{fs, path::Path};

use clap::Parser;
use gaztoc::{
  cli::{Cli, ReportFormat},
  report::write_report,
};
use gaztoc_config::Config;
use tempfile::tempdir;

const PIPELINE: &str = r#"
[environments.dev]
description = "Local development"

[environments.prod]
dir = "production"

[toc]
section_title = "On this page"
"#;

const PAGE: &str = "<h1>Guide</h1>\n<h2>Install</h2>\n<h3>From source</h3>\n";

fn project(root: &Path) {
  fs::create_dir_all(root.join("config")).expect("Failed to create dir in test");
  fs::write(root.join("config/pipeline.toml"), PIPELINE)
    .expect("Failed to write file in test");
  for dir in ["publish/dev/content", "publish/production"] {
    fs::create_dir_all(root.join(dir)).expect("Failed to create dir in test");
  }
  fs::write(root.join("publish/dev/content/guide.html"), PAGE)
    .expect("Failed to write file in test");
  fs::write(root.join("publish/dev/index.html"), PAGE)
    .expect("Failed to write file in test");
}

/// Drive the same steps as the binary and return the text report.
fn invoke(args: &[&str], cwd: &Path) -> (String, bool) {
  let cli = Cli::try_parse_from(args).expect("Arguments should parse");
  let config = Config::load(cli.config_file.as_deref(), cwd)
    .expect("Config should load");
  let target = cli.target_dir(&config).expect("Target should resolve");
  let report =
    gaztoc_html::run(&target, &cli.run_options(&config)).expect("Run failed");

  let mut out = Vec::new();
  write_report(&mut out, &report, cli.format, cli.mode())
    .expect("Write failed");
  (
    String::from_utf8(out).expect("Report should be UTF-8"),
    report.summary.has_errors(),
  )
}

#[test]
fn test_environment_run_from_nested_directory() {
  let dir = tempdir().expect("Failed to create temp dir in test");
  project(dir.path());
  let cwd = dir.path().join("publish/dev/content");

  let (text, failed) = invoke(&["gaztoc", "-e", "dev"], &cwd);

  assert!(!failed);
  assert!(text.contains("Found 1 HTML file(s)"));
  assert!(text.contains("content/guide.html: TOC added (1 h2, 1 h3)"));

  let html = fs::read_to_string(cwd.join("guide.html"))
    .expect("Failed to read file in test");
  assert!(html.contains("On this page"));
  assert!(html.contains(r#"<h2 id="install">"#));

  let index = fs::read_to_string(dir.path().join("publish/dev/index.html"))
    .expect("Failed to read file in test");
  assert_eq!(index, PAGE);
}

#[test]
fn test_environment_with_custom_dir() {
  let dir = tempdir().expect("Failed to create temp dir in test");
  project(dir.path());

  let cli = Cli::try_parse_from(["gaztoc", "-e", "prod"])
    .expect("Arguments should parse");
  let config = Config::load(None, dir.path()).expect("Config should load");
  assert_eq!(
    cli.target_dir(&config).expect("Target should resolve"),
    dir.path().join("publish/production")
  );
}

#[test]
fn test_explicit_config_file() {
  let dir = tempdir().expect("Failed to create temp dir in test");
  project(dir.path());
  let config_file = dir.path().join("config/pipeline.toml");

  let (text, _) = invoke(
    &[
      "gaztoc",
      "-e",
      "dev",
      "-c",
      config_file.to_str().expect("Temp path should be UTF-8"),
      "--dry-run",
    ],
    Path::new("/"),
  );
  assert!(text.contains("Would add TOC (1 h2, 1 h3)"));
  assert_eq!(
    fs::read_to_string(dir.path().join("publish/dev/content/guide.html"))
      .expect("Failed to read file in test"),
    PAGE
  );
}

#[test]
fn test_root_json_report_then_strip() {
  let dir = tempdir().expect("Failed to create temp dir in test");
  project(dir.path());
  let root = dir.path().join("publish/dev");
  let root_arg = root.to_str().expect("Temp path should be UTF-8");

  let (json, _) =
    invoke(&["gaztoc", "-r", root_arg, "--format", "json"], dir.path());
  let value: serde_json::Value =
    serde_json::from_str(&json).expect("Report should be valid JSON");
  assert_eq!(value["summary"]["processed"], 1);
  assert_eq!(value["files"][0]["outcome"], "processed");

  let (text, failed) = invoke(&["gaztoc", "-r", root_arg, "--strip"], dir.path());
  assert!(!failed);
  assert!(text.contains("Removed TOC, 2 IDs"));
  assert!(text.ends_with("✅ TOC strip completed successfully\n"));
}

#[test]
fn test_unknown_environment_lists_names() {
  let dir = tempdir().expect("Failed to create temp dir in test");
  project(dir.path());

  let cli = Cli::try_parse_from(["gaztoc", "-e", "staging"])
    .expect("Arguments should parse");
  assert_eq!(cli.format, ReportFormat::Text);
  let config = Config::load(None, dir.path()).expect("Config should load");
  let err = cli.target_dir(&config).expect_err("Should fail");
  assert!(err.to_string().contains("Available environments: dev, prod"));
}
