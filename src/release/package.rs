//! Packaging the assembled release tree
//!
//! The packager refuses to clobber a published artifact: an existing
//! archive fails the run unless overwriting was explicitly authorized, in
//! which case the old file is deleted before the archiver runs.

use crate::core::error::{ForgeError, ForgeResult, PackageError, ResultExt};
use crate::tools::Archiver;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct Packager {
  archiver: Archiver,
  releases_dir: PathBuf,
}

impl Packager {
  pub fn new(archiver: Archiver, releases_dir: impl Into<PathBuf>) -> Self {
    Self {
      archiver,
      releases_dir: releases_dir.into(),
    }
  }

  /// Archive `dest_root` into `<releases_dir>/<release_name>.zip`.
  ///
  /// Returns the path of the produced archive.
  pub fn package(&self, dest_root: &Path, release_name: &str, overwrite: bool) -> ForgeResult<PathBuf> {
    let output = self.releases_dir.join(format!("{}.zip", release_name));

    if output.exists() {
      if !overwrite {
        return Err(ForgeError::Package(PackageError::AlreadyExists { path: output }));
      }
      println!("⚠️  Package already exists, deleting: {}", output.display());
      fs::remove_file(&output).with_context(|| format!("Failed to delete {}", output.display()))?;
    }

    self.archiver.archive(dest_root, &output)?;
    Ok(output)
  }
}

/// SHA-256 digest of a file, hex-encoded
pub fn sha256_sum(path: &Path) -> io::Result<String> {
  let mut file = fs::File::open(path)?;
  let mut hasher = Sha256::new();
  io::copy(&mut file, &mut hasher)?;
  Ok(format!("{:x}", hasher.finalize()))
}
