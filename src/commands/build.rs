//! Build command implementation
//!
//! Pipeline order matters: the version is extracted first because every
//! later step depends on it, the destination tree is purged and assembled
//! next, and packaging runs last, only when requested.

use crate::core::assemble::Assembler;
use crate::core::config::ForgeConfig;
use crate::core::error::{ForgeResult, ResultExt};
use crate::release::ReleaseVersion;
use crate::release::metadata::update_version_metadata;
use crate::release::package::{Packager, sha256_sum};
use std::env;
use std::fs;

/// Run the build command
pub fn run_build(package: bool, overwrite: bool) -> ForgeResult<()> {
  let root = env::current_dir()?;
  let config = ForgeConfig::load(&root)?;
  let entries = config.structure_entries()?;

  let version = ReleaseVersion::extract(&config.versions_file())?;
  println!("📦 Releasing {} {}", config.project.title, version);

  if let Some(compiler) = config.compiler() {
    println!("🔨 Compiling the sources in release mode...");
    compiler.compile()?;
  }

  if let Some(path) = config.repository_version_file() {
    update_version_metadata(&path, &version)?;
    println!("   Updated repository version file: {}", path.display());
  }

  let assembler = Assembler::new(config.source_root(), config.dest_root());
  let report = assembler.assemble(&entries)?;
  println!(
    "   Assembled {} files into {} ({} entries dropped)",
    report.files_copied,
    config.dest_root().display(),
    report.entries_dropped
  );

  for pair in &config.post_copy {
    fs::copy(&pair.from, &pair.to)
      .with_context(|| format!("Failed to copy {} into {}", pair.from.display(), pair.to.display()))?;
    println!("   Copied {} into {}", pair.from.display(), pair.to.display());
  }

  if !package {
    println!("   No package requested, skipping.");
    return Ok(());
  }

  let release_name = config.release_name(&version);
  let packager = Packager::new(config.archiver(), config.build.releases_dir.clone());
  let output = packager.package(assembler.dest_root(), &release_name, overwrite)?;
  let digest = sha256_sum(&output)?;

  println!("✅ Packaged {}", output.display());
  println!("   sha256: {}", digest);
  Ok(())
}
