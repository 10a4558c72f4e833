//! # CLI Module
//!
//! Argument parsing and dispatch for the `lichen` binary. This is a thin
//! shell: it resolves the root directory, picks one of the four operation
//! modes, calls into the [`Processor`](lichen::processor::Processor), and
//! turns the returned counts into a summary line and an exit code.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use lichen::config::LicenseConfig;
use lichen::processor::Processor;
use owo_colors::{OwoColorize, Stream};
use tracing::{error, info};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
  version,
  about = "Manage license headers in your project files.",
  after_help = "Examples:
  # Add MIT headers to every eligible file under the current directory
  lichen -a \"Ada Lovelace\"

  # Apply a specific template and year to a project
  lichen -d path/to/project -t apache2 -a \"Ada Lovelace\" -y 2023

  # Rewrite the copyright year in existing headers
  lichen -d path/to/project --update-year -y 2025

  # Check which files carry the expected license without modifying anything
  lichen -d path/to/project -t mit --verify

  # Create a LICENSE file in the project root
  lichen -d path/to/project -t gpl3 -a \"Ada Lovelace\" --create-license-file

  # Supply a custom placeholder used by a custom template body
  lichen -t \"{project} - (c) {year} {author}\" --var project=lichen -a Ada
"
)]
pub struct Cli {
  /// Project root directory (default: current directory)
  #[arg(short = 'd', long, default_value = ".")]
  pub directory: PathBuf,

  /// License template name (mit, gpl3, apache2) or literal template text
  #[arg(short = 't', long, default_value = "mit")]
  pub template: String,

  /// Author name for the license
  #[arg(short = 'a', long, default_value = "Author")]
  pub author: String,

  /// Year to use in the license (default: current year)
  #[arg(short = 'y', long)]
  pub year: Option<i32>,

  /// Additional template variable (repeatable)
  #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_key_value)]
  pub vars: Vec<(String, String)>,

  /// Update the year in existing license headers
  #[arg(long, group = "mode")]
  pub update_year: bool,

  /// Verify license headers without making changes
  #[arg(long, group = "mode")]
  pub verify: bool,

  /// Create a LICENSE file in the project root
  #[arg(long, group = "mode")]
  pub create_license_file: bool,

  /// Force overwrite existing license headers
  #[arg(long)]
  pub force: bool,

  /// Increase verbosity (-v debug, -vv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
  raw
    .split_once('=')
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

/// Parses arguments, runs the selected operation, and maps the outcome to an
/// exit code.
pub fn run() -> ExitCode {
  let cli = Cli::parse();
  lichen::logging::init_tracing(cli.quiet, cli.verbose);

  match dispatch(&cli) {
    Ok(code) => code,
    Err(e) => {
      error!("An error occurred: {e:#}");
      ExitCode::FAILURE
    }
  }
}

fn dispatch(cli: &Cli) -> Result<ExitCode> {
  if !cli.directory.is_dir() {
    error!("Directory not found: {}", cli.directory.display());
    return Ok(ExitCode::FAILURE);
  }

  let processor = Processor::new(LicenseConfig::default());

  let custom_vars: HashMap<String, String> = cli.vars.iter().cloned().collect();
  let custom_vars = (!custom_vars.is_empty()).then_some(&custom_vars);

  if cli.verify {
    info!("Verifying license headers in: {}", cli.directory.display());
    let (files_with_license, total_files) = processor.verify(&cli.directory, &cli.template);

    if total_files == 0 {
      print_summary(cli.quiet, "No eligible files found.");
    } else {
      let percentage = (files_with_license as f64 / total_files as f64) * 100.0;
      print_summary(
        cli.quiet,
        &format!(
          "License verification complete: {files_with_license}/{total_files} files ({percentage:.1}%) have the expected license"
        ),
      );
    }
    // Verification is informational; it never fails the invocation
    return Ok(ExitCode::SUCCESS);
  }

  if cli.update_year {
    info!("Updating license year in: {}", cli.directory.display());
    let updated = processor.update_year(&cli.directory, cli.year);
    print_summary(cli.quiet, &format!("License year update complete: {updated} files updated"));
    return Ok(ExitCode::SUCCESS);
  }

  if cli.create_license_file {
    info!("Creating LICENSE file in: {}", cli.directory.display());
    let created = processor.create_license_file(&cli.directory, &cli.template, &cli.author, cli.year, custom_vars)?;

    if !created {
      error!("Failed to create LICENSE file");
      return Ok(ExitCode::FAILURE);
    }
    print_summary(cli.quiet, "LICENSE file created successfully");
    return Ok(ExitCode::SUCCESS);
  }

  info!("Applying license headers in: {}", cli.directory.display());
  let processed = processor.apply(&cli.directory, &cli.template, &cli.author, cli.year, custom_vars, cli.force)?;
  print_summary(
    cli.quiet,
    &format!("License application complete: {processed} files processed"),
  );

  Ok(ExitCode::SUCCESS)
}

fn print_summary(quiet: bool, message: &str) {
  if !quiet {
    println!("{}", message.if_supports_color(Stream::Stdout, |text| text.green()));
  }
}
