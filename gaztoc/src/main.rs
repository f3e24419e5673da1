use std::{env, io, process::ExitCode};

use color_eyre::eyre::{Context, Result, bail};
use gaztoc::{
  cli::{Cli, ReportFormat},
  report::{write_banner, write_report},
};
use gaztoc_config::Config;
use log::{LevelFilter, debug, info};

fn main() -> Result<ExitCode> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  let mut stdout = io::stdout().lock();
  let mode = cli.mode();
  if cli.format == ReportFormat::Text {
    write_banner(&mut stdout, mode, cli.dry_run, cli.force)?;
  }

  let cwd = env::current_dir().wrap_err("Failed to determine current directory")?;
  let config = Config::load(cli.config_file.as_deref(), &cwd)
    .wrap_err("Failed to load pipeline configuration")?;
  if let Some(root) = &config.project_root {
    debug!("Project root: {}", root.display());
  }

  let target = cli.target_dir(&config).wrap_err("Configuration error")?;
  if !target.exists() {
    match &cli.environment {
      Some(name) => {
        bail!(
          "Environment directory not found: {}. Create the directory or run \
           a build for environment '{name}'",
          target.display()
        );
      },
      None => bail!("Directory not found: {}", target.display()),
    }
  }
  info!("Target directory: {}", target.display());

  let options = cli.run_options(&config);
  let report = gaztoc_html::run(&target, &options).wrap_err_with(|| {
    format!("TOC {} failed for {}", mode.to_lowercase(), target.display())
  })?;

  write_report(&mut stdout, &report, cli.format, mode)
    .wrap_err("Failed to write report")?;

  Ok(if report.summary.has_errors() {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  })
}
