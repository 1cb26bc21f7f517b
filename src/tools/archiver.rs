//! External archiver invocation

use crate::core::error::{ForgeError, ForgeResult, PackageError, ResultExt};
use std::path::Path;
use std::process::Command;

/// Wraps the configured archiver command (7-Zip style interface).
///
/// Invoked as `<command> a <output> <tree>/*`; the trailing wildcard is
/// expanded by the archiver itself, so the archive contains the tree's
/// children rather than the tree directory.
pub struct Archiver {
  command: String,
}

impl Archiver {
  pub fn new(command: String) -> Self {
    Self { command }
  }

  /// Archive the contents of `tree` into `output`.
  pub fn archive(&self, tree: &Path, output: &Path) -> ForgeResult<()> {
    let contents = format!("{}/*", tree.display());
    let rendered = format!("{} a {} {}", self.command, output.display(), contents);

    let result = Command::new(&self.command)
      .arg("a")
      .arg(output)
      .arg(&contents)
      .output()
      .with_context(|| format!("Failed to run archiver command '{}'", self.command))?;

    if !result.status.success() {
      return Err(ForgeError::Package(PackageError::ArchiverFailed {
        command: rendered,
        stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
      }));
    }

    Ok(())
  }
}
