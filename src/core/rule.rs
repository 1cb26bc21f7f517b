//! Structure-specification rule types
//!
//! One `[[structure]]` entry maps a destination path inside the release tree
//! to a source rule. The rule kind is an explicit tagged variant: a drop is
//! a `drop = "<pattern>"` field on an entry with a plain `dest`, never a
//! marker spliced into the destination string.

use crate::core::error::{ConfigError, ForgeError, ForgeResult};
use serde::Deserialize;

/// One entry of the structure specification: a destination path plus the
/// rule that populates (or prunes) it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureEntry {
  /// Destination path rooted at the release root, always starting with '/'
  pub dest: String,
  pub rule: SourceRule,
}

/// What to do at a destination path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRule {
  /// Copy an entire source subtree into the destination
  Tree(String),

  /// Copy an ordered list of files into the destination directory
  Files(Vec<FileSource>),

  /// Delete entries under the destination whose base name matches the glob
  Drop(String),
}

impl SourceRule {
  /// Drops are scheduled strictly after all copies
  pub fn is_drop(&self) -> bool {
    matches!(self, SourceRule::Drop(_))
  }
}

/// One item of a `files = [...]` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
  /// A single source file, copied under its base name
  Single(String),

  /// A source directory whose direct-child files are all copied
  /// (spelled `"<dir>/*"` in the config)
  Pattern(String),
}

impl FileSource {
  fn parse(item: &str) -> Self {
    match item.strip_suffix("/*") {
      Some(dir) => FileSource::Pattern(dir.to_string()),
      None => FileSource::Single(item.to_string()),
    }
  }
}

/// Raw shape of a `[[structure]]` table before validation
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawStructureEntry {
  pub dest: String,
  #[serde(default)]
  pub tree: Option<String>,
  #[serde(default)]
  pub files: Option<Vec<String>>,
  #[serde(default)]
  pub drop: Option<String>,
}

impl RawStructureEntry {
  /// Validate and convert into the typed rule
  pub fn into_entry(self) -> ForgeResult<StructureEntry> {
    let invalid = |reason: &str| {
      ForgeError::Config(ConfigError::InvalidStructure {
        dest: self.dest.clone(),
        reason: reason.to_string(),
      })
    };

    if !self.dest.starts_with('/') {
      return Err(invalid("destination must start with '/'"));
    }

    let rule = match (self.tree.as_ref(), self.files.as_ref(), self.drop.as_ref()) {
      (Some(tree), None, None) => SourceRule::Tree(tree.clone()),
      (None, Some(files), None) => {
        if files.is_empty() {
          return Err(invalid("files list must not be empty"));
        }
        SourceRule::Files(files.iter().map(|item| FileSource::parse(item)).collect())
      }
      (None, None, Some(pattern)) => {
        if pattern.is_empty() {
          return Err(invalid("drop pattern must not be empty"));
        }
        SourceRule::Drop(pattern.clone())
      }
      (None, None, None) => return Err(invalid("one of tree, files or drop is required")),
      _ => return Err(invalid("tree, files and drop are mutually exclusive")),
    };

    Ok(StructureEntry { dest: self.dest, rule })
  }
}
