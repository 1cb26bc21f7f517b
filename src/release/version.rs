//! Release identity: the version tuple extracted from the sources
//!
//! The version is parsed once per run from an assembly-info style file and
//! is immutable afterwards. A build number of 0 means "unset" and is left
//! out of the canonical release name.

use crate::core::error::{ForgeError, ForgeResult, ResultExt, VersionError};
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::Path;

/// Matches `[assembly: AssemblyVersion("MAJOR.MINOR.PATCH")]` with an
/// optional `.BUILD` component.
const VERSION_LINE: &str = r#"^\[assembly:\s*AssemblyVersion[^(]*\("(\d+)\.(\d+)\.(\d+)(?:\.(\d+))?"\)\]"#;

/// The parsed release version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseVersion {
  pub major: u32,
  pub minor: u32,
  pub patch: u32,
  pub build: u32,
}

impl ReleaseVersion {
  pub fn new(major: u32, minor: u32, patch: u32, build: u32) -> Self {
    Self {
      major,
      minor,
      patch,
      build,
    }
  }

  /// Scan a versions file for the first version-annotation line.
  ///
  /// Comment lines are skipped. A file with no matching line is fatal;
  /// every downstream naming and metadata step depends on the version.
  pub fn extract(path: &Path) -> ForgeResult<Self> {
    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read versions file {}", path.display()))?;
    let pattern = Regex::new(VERSION_LINE)?;

    for line in content.lines() {
      let line = line.trim_start();
      if line.starts_with("//") {
        continue;
      }
      if let Some(captures) = pattern.captures(line) {
        let group = |i: usize| -> ForgeResult<u32> {
          match captures.get(i) {
            Some(m) => m.as_str().parse().map_err(|_| {
              ForgeError::message(format!("Version component out of range in {}", path.display()))
            }),
            None => Ok(0),
          }
        };
        return Ok(Self {
          major: group(1)?,
          minor: group(2)?,
          patch: group(3)?,
          build: group(4)?,
        });
      }
    }

    Err(ForgeError::Version(VersionError::NotFound {
      file: path.to_path_buf(),
    }))
  }

  /// Format the canonical release name. `plain_format` is used when the
  /// build number is 0, `build_format` otherwise; both accept the
  /// placeholders `{major}`, `{minor}`, `{patch}` and `{build}`.
  pub fn release_name(&self, plain_format: &str, build_format: &str) -> String {
    let format = if self.build == 0 { plain_format } else { build_format };
    format
      .replace("{major}", &self.major.to_string())
      .replace("{minor}", &self.minor.to_string())
      .replace("{patch}", &self.patch.to_string())
      .replace("{build}", &self.build.to_string())
  }
}

impl fmt::Display for ReleaseVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)?;
    if self.build != 0 {
      write!(f, " build {}", self.build)?;
    }
    Ok(())
  }
}
