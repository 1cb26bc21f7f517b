//! Assembly driver: applies the structure specification to the filesystem
//!
//! The driver owns the destination root. A run purges it, then applies every
//! entry in scheduler order, fail-fast. Source trees are never mutated.
//! A failed run leaves a partial destination tree behind; rerunning is safe
//! because the purge makes every run start from a clean state.

use crate::core::error::{AssemblyError, ForgeError, ForgeResult};
use crate::core::pattern::matching_entries;
use crate::core::rule::{FileSource, SourceRule, StructureEntry};
use crate::core::schedule::schedule;
use crate::ui::progress::AssemblyProgress;
use std::fs;
use std::path::{Path, PathBuf};

/// Counters accumulated over one assembly run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyReport {
  /// Files copied into the destination tree
  pub files_copied: usize,
  /// Entries removed by drop rules
  pub entries_dropped: usize,
}

/// Owns the source and destination roots for one release run
pub struct Assembler {
  source_root: PathBuf,
  dest_root: PathBuf,
}

impl Assembler {
  pub fn new(source_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
    Self {
      source_root: source_root.into(),
      dest_root: dest_root.into(),
    }
  }

  pub fn dest_root(&self) -> &Path {
    &self.dest_root
  }

  /// Purge the destination root and apply all entries in scheduler order.
  ///
  /// The first failing entry aborts the run with its destination path
  /// attached; no rollback is attempted.
  pub fn assemble(&self, entries: &[StructureEntry]) -> ForgeResult<AssemblyReport> {
    if self.dest_root.exists() {
      fs::remove_dir_all(&self.dest_root)?;
    }

    let ordered = schedule(entries);
    let mut progress = AssemblyProgress::new(ordered.len(), "Assembling release");
    let mut report = AssemblyReport::default();

    for entry in ordered {
      self.apply(entry, &mut report).map_err(|source| {
        ForgeError::Assembly(AssemblyError::EntryFailed {
          dest: entry.dest.clone(),
          source: Box::new(source),
        })
      })?;
      progress.inc();
    }

    Ok(report)
  }

  fn apply(&self, entry: &StructureEntry, report: &mut AssemblyReport) -> ForgeResult<()> {
    let dest_dir = join_rooted(&self.dest_root, &entry.dest);
    match &entry.rule {
      SourceRule::Tree(source) => {
        self.copy_tree(&join_rooted(&self.source_root, source), &dest_dir, report)
      }
      SourceRule::Files(items) => {
        fs::create_dir_all(&dest_dir)?;
        for item in items {
          match item {
            FileSource::Single(path) => {
              self.copy_file(&join_rooted(&self.source_root, path), &dest_dir, report)?;
            }
            FileSource::Pattern(dir) => {
              self.copy_dir_files(&join_rooted(&self.source_root, dir), &dest_dir, report)?;
            }
          }
        }
        Ok(())
      }
      SourceRule::Drop(pattern) => self.drop_matching(&dest_dir, pattern, report),
    }
  }

  /// Recursively copy a source subtree, overwriting existing destination
  /// files but never deleting destination files absent from the source.
  fn copy_tree(&self, source: &Path, dest: &Path, report: &mut AssemblyReport) -> ForgeResult<()> {
    if !source.is_dir() {
      return Err(ForgeError::Assembly(AssemblyError::DirNotFound {
        path: source.to_path_buf(),
      }));
    }

    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(source)? {
      let entry = entry?;
      let target = dest.join(entry.file_name());
      if entry.file_type()?.is_dir() {
        self.copy_tree(&entry.path(), &target, report)?;
      } else {
        fs::copy(entry.path(), &target)?;
        report.files_copied += 1;
      }
    }
    Ok(())
  }

  /// Copy one file into the destination directory, preserving its base name
  fn copy_file(&self, source: &Path, dest_dir: &Path, report: &mut AssemblyReport) -> ForgeResult<()> {
    if !source.is_file() {
      return Err(ForgeError::Assembly(AssemblyError::SourceMissing {
        path: source.to_path_buf(),
      }));
    }
    let name = source
      .file_name()
      .ok_or_else(|| ForgeError::message(format!("Source path has no file name: {}", source.display())))?;
    fs::copy(source, dest_dir.join(name))?;
    report.files_copied += 1;
    Ok(())
  }

  /// Copy every direct-child file of the source directory (non-recursive)
  fn copy_dir_files(&self, source_dir: &Path, dest_dir: &Path, report: &mut AssemblyReport) -> ForgeResult<()> {
    for name in matching_entries(source_dir, "*")? {
      let source = source_dir.join(&name);
      if source.is_file() {
        fs::copy(&source, dest_dir.join(&name))?;
        report.files_copied += 1;
      }
    }
    Ok(())
  }

  /// Remove entries under the destination directory matching the pattern.
  /// A missing directory or an empty match set is a no-op.
  fn drop_matching(&self, dest_dir: &Path, pattern: &str, report: &mut AssemblyReport) -> ForgeResult<()> {
    if !dest_dir.is_dir() {
      return Ok(());
    }
    for name in matching_entries(dest_dir, pattern)? {
      let target = dest_dir.join(&name);
      if target.is_dir() {
        fs::remove_dir_all(&target)?;
      } else {
        fs::remove_file(&target)?;
      }
      report.entries_dropped += 1;
    }
    Ok(())
  }
}

/// Join a rule path (always starting with '/', rooted at the given root)
/// onto a real filesystem root.
fn join_rooted(root: &Path, rule_path: &str) -> PathBuf {
  root.join(rule_path.trim_start_matches('/'))
}
