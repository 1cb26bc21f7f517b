//! External compiler invocation

use crate::core::error::{BuildError, ForgeError, ForgeResult, ResultExt};
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Wraps the configured compile command.
///
/// The command is invoked with no arguments and inherits the console, so
/// the toolchain's own output stays visible. When an expected binary path
/// is configured, any stale copy is deleted up front and its presence is
/// verified afterwards; a zero exit with no binary is still a failure.
pub struct Compiler {
  command: String,
  expected_binary: Option<PathBuf>,
}

impl Compiler {
  pub fn new(command: String, expected_binary: Option<PathBuf>) -> Self {
    Self {
      command,
      expected_binary,
    }
  }

  /// Run the compile command and verify the expected binary exists.
  pub fn compile(&self) -> ForgeResult<()> {
    if let Some(binary) = &self.expected_binary {
      if binary.exists() {
        fs::remove_file(binary).with_context(|| format!("Failed to remove stale binary {}", binary.display()))?;
      }
    }

    let status = Command::new(&self.command)
      .status()
      .context(format!("Failed to run compile command '{}'", self.command))?;

    if !status.success() {
      return Err(ForgeError::Build(BuildError::CompileFailed {
        command: self.command.clone(),
        code: status.code(),
      }));
    }

    if let Some(binary) = &self.expected_binary {
      if !binary.exists() {
        return Err(ForgeError::Build(BuildError::BinaryMissing {
          path: binary.clone(),
        }));
      }
    }

    Ok(())
  }
}
