//! Error types for relforge with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and provides
//! contextual help messages to users. Every error that has an obvious next step
//! includes a suggestion to guide users toward resolution.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for relforge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, unversioned sources)
  User = 1,
  /// System error (I/O, child process, network)
  System = 2,
  /// Guard refusal (existing package, overwrite not authorized)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for relforge
#[derive(Debug)]
pub enum ForgeError {
  /// Configuration errors (relforge.toml)
  Config(ConfigError),

  /// Release assembly errors
  Assembly(AssemblyError),

  /// Version extraction and metadata errors
  Version(VersionError),

  /// External compiler errors
  Build(BuildError),

  /// Packaging errors
  Package(PackageError),

  /// Hosting API errors
  Upload(UploadError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ForgeError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ForgeError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ForgeError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ForgeError::Message { message, context, help } => ForgeError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ForgeError::Config(_) => ExitCode::User,
      ForgeError::Version(_) => ExitCode::User,
      ForgeError::Assembly(_) => ExitCode::System,
      ForgeError::Build(_) => ExitCode::System,
      ForgeError::Package(PackageError::AlreadyExists { .. }) => ExitCode::Validation,
      ForgeError::Package(_) => ExitCode::System,
      ForgeError::Upload(_) => ExitCode::System,
      ForgeError::Io(_) => ExitCode::System,
      ForgeError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ForgeError::Config(e) => e.help_message(),
      ForgeError::Version(e) => e.help_message(),
      ForgeError::Package(e) => e.help_message(),
      ForgeError::Upload(e) => e.help_message(),
      ForgeError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ForgeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ForgeError::Config(e) => write!(f, "{}", e),
      ForgeError::Assembly(e) => write!(f, "{}", e),
      ForgeError::Version(e) => write!(f, "{}", e),
      ForgeError::Build(e) => write!(f, "{}", e),
      ForgeError::Package(e) => write!(f, "{}", e),
      ForgeError::Upload(e) => write!(f, "{}", e),
      ForgeError::Io(e) => write!(f, "I/O error: {}", e),
      ForgeError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ForgeError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ForgeError::Io(e) => Some(e),
      ForgeError::Assembly(AssemblyError::EntryFailed { source, .. }) => Some(source.as_ref()),
      ForgeError::Upload(UploadError::Http(e)) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ForgeError {
  fn from(err: io::Error) -> Self {
    ForgeError::Io(err)
  }
}

impl From<String> for ForgeError {
  fn from(msg: String) -> Self {
    ForgeError::message(msg)
  }
}

impl From<&str> for ForgeError {
  fn from(msg: &str) -> Self {
    ForgeError::message(msg)
  }
}

impl From<toml_edit::TomlError> for ForgeError {
  fn from(err: toml_edit::TomlError) -> Self {
    ForgeError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for ForgeError {
  fn from(err: toml_edit::de::Error) -> Self {
    ForgeError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for ForgeError {
  fn from(err: serde_json::Error) -> Self {
    ForgeError::message(format!("JSON error: {}", err))
  }
}

impl From<globset::Error> for ForgeError {
  fn from(err: globset::Error) -> Self {
    ForgeError::message(format!("Invalid glob pattern: {}", err))
  }
}

impl From<regex::Error> for ForgeError {
  fn from(err: regex::Error) -> Self {
    ForgeError::message(format!("Invalid pattern: {}", err))
  }
}

impl From<url::ParseError> for ForgeError {
  fn from(err: url::ParseError) -> Self {
    ForgeError::message(format!("Invalid URL: {}", err))
  }
}

impl From<reqwest::Error> for ForgeError {
  fn from(err: reqwest::Error) -> Self {
    ForgeError::Upload(UploadError::Http(err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// relforge.toml not found
  NotFound { search_root: PathBuf },

  /// Missing required field
  MissingField { field: String },

  /// A [[structure]] entry is malformed
  InvalidStructure { dest: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Create relforge.toml next to the project you are releasing.".to_string())
      }
      ConfigError::InvalidStructure { .. } => Some(
        "Each [[structure]] entry needs a dest starting with '/' and exactly one of tree, files or drop.".to_string(),
      ),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { search_root } => {
        write!(f, "No relforge configuration found under {}", search_root.display())
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field in config: {}", field)
      }
      ConfigError::InvalidStructure { dest, reason } => {
        write!(f, "Invalid [[structure]] entry '{}': {}", dest, reason)
      }
    }
  }
}

/// Release assembly errors
#[derive(Debug)]
pub enum AssemblyError {
  /// A source directory named by a rule does not exist
  DirNotFound { path: PathBuf },

  /// An explicit file rule target is absent
  SourceMissing { path: PathBuf },

  /// An entry failed; carries the destination path of the failing entry
  EntryFailed { dest: String, source: Box<ForgeError> },
}

impl fmt::Display for AssemblyError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AssemblyError::DirNotFound { path } => {
        write!(f, "Source directory not found: {}", path.display())
      }
      AssemblyError::SourceMissing { path } => {
        write!(f, "Source file not found: {}", path.display())
      }
      AssemblyError::EntryFailed { dest, source } => {
        write!(f, "Assembly of '{}' failed: {}", dest, source)
      }
    }
  }
}

/// Version extraction and metadata errors
#[derive(Debug)]
pub enum VersionError {
  /// No version-annotation line matched
  NotFound { file: PathBuf },

  /// The metadata store has no VERSION record
  MetadataKeyMissing { file: PathBuf },
}

impl VersionError {
  fn help_message(&self) -> Option<String> {
    match self {
      VersionError::NotFound { .. } => Some(
        "Expected an uncommented line like [assembly: AssemblyVersion(\"1.2.3\")] in the versions file.".to_string(),
      ),
      VersionError::MetadataKeyMissing { .. } => {
        Some("The repository version file must contain a top-level VERSION object.".to_string())
      }
    }
  }
}

impl fmt::Display for VersionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionError::NotFound { file } => {
        write!(f, "Cannot extract version from: {}", file.display())
      }
      VersionError::MetadataKeyMissing { file } => {
        write!(f, "Cannot find VERSION in: {}", file.display())
      }
    }
  }
}

/// External compiler errors
#[derive(Debug)]
pub enum BuildError {
  /// Compile command returned non-zero
  CompileFailed { command: String, code: Option<i32> },

  /// The expected compiled binary is absent after a successful exit
  BinaryMissing { path: PathBuf },
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BuildError::CompileFailed { command, code } => match code {
        Some(code) => write!(f, "Compile command '{}' failed with exit code {}", command, code),
        None => write!(f, "Compile command '{}' was terminated by a signal", command),
      },
      BuildError::BinaryMissing { path } => {
        write!(f, "Compiled binary missing after build: {}", path.display())
      }
    }
  }
}

/// Packaging errors
#[derive(Debug)]
pub enum PackageError {
  /// The target archive already exists and overwrite was not authorized
  AlreadyExists { path: PathBuf },

  /// The external archiver returned non-zero
  ArchiverFailed { command: String, stderr: String },
}

impl PackageError {
  fn help_message(&self) -> Option<String> {
    match self {
      PackageError::AlreadyExists { .. } => {
        Some("Pass --overwrite to replace the existing archive.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for PackageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PackageError::AlreadyExists { path } => {
        write!(f, "Package for this version already exists: {}", path.display())
      }
      PackageError::ArchiverFailed { command, stderr } => {
        write!(f, "Archiver command failed: {}\n{}", command, stderr)
      }
    }
  }
}

/// Hosting API errors
#[derive(Debug)]
pub enum UploadError {
  /// Transport-level failure
  Http(reqwest::Error),

  /// The server rejected the request
  Api { status: u16, body: String },
}

impl UploadError {
  fn help_message(&self) -> Option<String> {
    match self {
      UploadError::Api { status, .. } if *status == 401 || *status == 403 => {
        Some("Set the RELFORGE_API_TOKEN environment variable to an API token with upload rights.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for UploadError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      UploadError::Http(e) => write!(f, "API call failed: {}", e),
      UploadError::Api { status, body } => {
        write!(f, "API call failed with status {}: {}", status, body)
      }
    }
  }
}

/// Result type alias for relforge
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ForgeResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ForgeResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ForgeError>,
{
  fn context(self, ctx: impl Into<String>) -> ForgeResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ForgeResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ForgeError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
