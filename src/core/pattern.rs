//! Glob matching against a single directory listing
//!
//! Matching is non-recursive and case-sensitive, against base names only.
//! Results are sorted so downstream filesystem mutations are deterministic.

use crate::core::error::{AssemblyError, ForgeError, ForgeResult};
use globset::Glob;
use std::fs;
use std::path::Path;

/// Return the base names of entries in `dir` matching the glob `pattern`.
///
/// An empty match set is not an error. A missing directory is.
pub fn matching_entries(dir: &Path, pattern: &str) -> ForgeResult<Vec<String>> {
  if !dir.is_dir() {
    return Err(ForgeError::Assembly(AssemblyError::DirNotFound {
      path: dir.to_path_buf(),
    }));
  }

  let matcher = Glob::new(pattern)?.compile_matcher();

  let mut names = Vec::new();
  for entry in fs::read_dir(dir)? {
    let entry = entry?;
    let name = entry.file_name();
    let Some(name) = name.to_str() else {
      // Non-UTF-8 names cannot match a textual pattern
      continue;
    };
    if matcher.is_match(name) {
      names.push(name.to_string());
    }
  }

  names.sort();
  Ok(names)
}
