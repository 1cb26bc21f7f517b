//! relforge configuration (relforge.toml)
//!
//! Every process-wide constant of the release pipeline lives here: source
//! and destination roots, the versions file, external commands, release
//! name formats, the structure specification and the optional upload
//! endpoint. Components receive the pieces they need at construction; there
//! is no ambient mutable state.

use crate::core::error::{ConfigError, ForgeError, ForgeResult, ResultExt};
use crate::core::rule::{RawStructureEntry, StructureEntry};
use crate::release::version::ReleaseVersion;
use crate::tools::{Archiver, Compiler};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for relforge
/// Searched in order: relforge.toml, .relforge.toml, .config/relforge.toml
#[derive(Debug, Clone, Deserialize)]
pub struct ForgeConfig {
  pub project: ProjectConfig,
  #[serde(default)]
  pub build: BuildConfig,
  #[serde(default)]
  structure: Vec<RawStructureEntry>,
  #[serde(default)]
  pub post_copy: Vec<CopyPair>,
  #[serde(default)]
  pub upload: Option<UploadConfig>,
}

/// What is being released and where its sources live
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
  /// Human-readable product title, used in status output
  pub title: String,

  /// Root of the source tree; structure-specification source paths are
  /// rooted here (default: the working directory)
  #[serde(default = "default_source_root")]
  pub source_root: PathBuf,

  /// File scanned for the version annotation, relative to source_root
  pub versions_file: String,

  /// Optional JSON version-metadata store updated on every build,
  /// relative to source_root
  #[serde(default)]
  pub repository_version_file: Option<String>,
}

fn default_source_root() -> PathBuf {
  PathBuf::from(".")
}

/// Build, assembly and packaging settings
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
  /// Command invoked (with no arguments) to compile the sources
  #[serde(default)]
  pub compile_command: Option<String>,

  /// Binary the compile command must produce, relative to source_root
  #[serde(default)]
  pub compiled_binary: Option<String>,

  /// Directory the release tree is assembled under; purged on every run
  #[serde(default = "default_dest_root")]
  pub dest_root: PathBuf,

  /// Directory finished archives are placed in
  #[serde(default = "default_releases_dir")]
  pub releases_dir: PathBuf,

  /// External archiver command, invoked as `<cmd> a <output> <tree>/*`
  #[serde(default = "default_archive_command")]
  pub archive_command: String,

  /// Release name format for builds with build number 0
  #[serde(default = "default_name_format")]
  pub name_format: String,

  /// Release name format when the build number is set
  #[serde(default = "default_name_format_with_build")]
  pub name_format_with_build: String,
}

fn default_dest_root() -> PathBuf {
  PathBuf::from("Release")
}

fn default_releases_dir() -> PathBuf {
  PathBuf::from(".")
}

fn default_archive_command() -> String {
  "7z".to_string()
}

fn default_name_format() -> String {
  "KIS_v{major}.{minor}.{patch}".to_string()
}

fn default_name_format_with_build() -> String {
  "KIS_v{major}.{minor}.{patch}_build{build}".to_string()
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self {
      compile_command: None,
      compiled_binary: None,
      dest_root: default_dest_root(),
      releases_dir: default_releases_dir(),
      archive_command: default_archive_command(),
      name_format: default_name_format(),
      name_format_with_build: default_name_format_with_build(),
    }
  }
}

/// One post-build copy, applied after assembly
#[derive(Debug, Clone, Deserialize)]
pub struct CopyPair {
  pub from: PathBuf,
  pub to: PathBuf,
}

/// Hosting API endpoint for `relforge upload` / `relforge versions`
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
  /// Base URL of the hosting API, e.g. <https://kerbal.curseforge.com>
  pub base_url: String,

  /// Project identifier on the hosting side
  pub project_id: String,
}

impl ForgeConfig {
  /// Find config file in search order: relforge.toml, .relforge.toml, .config/relforge.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("relforge.toml"),
      path.join(".relforge.toml"),
      path.join(".config").join("relforge.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from relforge.toml (searches multiple locations)
  pub fn load(path: &Path) -> ForgeResult<Self> {
    let config_path = Self::find_config_path(path).ok_or_else(|| {
      ForgeError::Config(ConfigError::NotFound {
        search_root: path.to_path_buf(),
      })
    })?;

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    Self::parse(&content).with_context(|| format!("Invalid config in {}", config_path.display()))
  }

  /// Parse and validate a config document
  pub fn parse(content: &str) -> ForgeResult<Self> {
    let config: ForgeConfig = toml_edit::de::from_str(content)?;

    if config.project.versions_file.is_empty() {
      return Err(ForgeError::Config(ConfigError::MissingField {
        field: "project.versions_file".to_string(),
      }));
    }

    // Surface malformed [[structure]] entries at load time
    config.structure_entries()?;

    Ok(config)
  }

  /// The validated structure specification, in declaration order
  pub fn structure_entries(&self) -> ForgeResult<Vec<StructureEntry>> {
    self.structure.iter().map(|raw| raw.clone().into_entry()).collect()
  }

  pub fn source_root(&self) -> &Path {
    &self.project.source_root
  }

  /// Absolute-or-relative path of the versions file
  pub fn versions_file(&self) -> PathBuf {
    self.project.source_root.join(&self.project.versions_file)
  }

  /// Path of the JSON version-metadata store, if configured
  pub fn repository_version_file(&self) -> Option<PathBuf> {
    self
      .project
      .repository_version_file
      .as_ref()
      .map(|p| self.project.source_root.join(p))
  }

  pub fn dest_root(&self) -> &Path {
    &self.build.dest_root
  }

  /// The canonical release name for a version, per the configured formats
  pub fn release_name(&self, version: &ReleaseVersion) -> String {
    version.release_name(&self.build.name_format, &self.build.name_format_with_build)
  }

  /// Where the finished archive for a version lands
  pub fn package_path(&self, version: &ReleaseVersion) -> PathBuf {
    self
      .build
      .releases_dir
      .join(format!("{}.zip", self.release_name(version)))
  }

  /// The external compiler, if one is configured
  pub fn compiler(&self) -> Option<Compiler> {
    self.build.compile_command.as_ref().map(|command| {
      Compiler::new(
        command.clone(),
        self
          .build
          .compiled_binary
          .as_ref()
          .map(|p| self.project.source_root.join(p)),
      )
    })
  }

  pub fn archiver(&self) -> Archiver {
    Archiver::new(self.build.archive_command.clone())
  }
}
