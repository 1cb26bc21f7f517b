mod commands;
mod core;
mod release;
mod tools;
mod ui;
mod upload;

use crate::core::error::{ForgeError, print_error};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Assemble, package and publish versioned releases from a declarative layout
#[derive(Parser)]
#[command(name = "relforge")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build the release tree from the declarative layout
  Build {
    /// Produce a distributable archive after assembly
    #[arg(short = 'p', long)]
    package: bool,
    /// Allow overwriting an existing archive
    #[arg(short = 'o', long)]
    overwrite: bool,
  },

  /// Upload a packaged release to the hosting API
  Upload {
    /// Archive to upload (default: the current version's package)
    file: Option<PathBuf>,
    /// Changelog file attached to the upload
    #[arg(long)]
    changelog: PathBuf,
    /// Regex selecting target game versions (matched at the start of the name)
    #[arg(long)]
    versions: String,
    /// User-friendly title of the file (default: the file name)
    #[arg(long)]
    title: Option<String>,
    /// Release channel: release, alpha or beta
    #[arg(long, default_value = "release")]
    channel: String,
    /// Changelog format understood by the hosting side
    #[arg(long, default_value = "markdown")]
    changelog_type: String,
  },

  /// List game versions known to the hosting API
  Versions {
    /// Regex filter applied to version names
    #[arg(long)]
    pattern: Option<String>,
    /// Output versions in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
}

fn main() {
  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Build { package, overwrite } => commands::run_build(package, overwrite),
    Commands::Upload {
      file,
      changelog,
      versions,
      title,
      channel,
      changelog_type,
    } => commands::run_upload(file, changelog, versions, title, channel, changelog_type),
    Commands::Versions { pattern, json } => commands::run_versions(pattern, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ForgeError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
