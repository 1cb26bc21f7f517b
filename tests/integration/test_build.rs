//! Integration tests for `relforge build`

use crate::helpers::{TestProject, assert_success, run_relforge};
use anyhow::Result;

fn base_config(archiver: &str) -> String {
  format!(
    r#"
[project]
title = "Kerbal Inventory System"
versions_file = "Source/Properties/AssemblyInfo.cs"
repository_version_file = "KIS.version"

[build]
dest_root = "Release"
releases_dir = "."
archive_command = "{archiver}"

[[structure]]
dest = "/GameData/KIS"
files = ["/LICENSE.md", "/settings.cfg"]

[[structure]]
dest = "/GameData/KIS/Parts"
tree = "/Parts"

[[structure]]
dest = "/GameData/KIS/Parts"
drop = "fun_*"

[[structure]]
dest = "/GameData/KIS/Plugins"
files = ["/Binaries/*"]
"#
  )
}

#[test]
fn test_build_assembles_declared_structure() -> Result<()> {
  let project = TestProject::new()?;
  let archiver = project.fake_archiver()?;
  project.write_config(&base_config(&archiver))?;

  let output = run_relforge(&project.path, &["build"])?;
  assert_success(&output);

  assert!(project.file_exists("Release/GameData/KIS/LICENSE.md"));
  assert!(project.file_exists("Release/GameData/KIS/settings.cfg"));
  assert!(project.file_exists("Release/GameData/KIS/Parts/container.cfg"));
  assert!(project.file_exists("Release/GameData/KIS/Plugins/ModuleManager.dll"));
  assert!(project.file_exists("Release/GameData/KIS/Plugins/MiniAVC.dll"));

  // The drop rule pruned the fun part after the tree copy
  assert!(!project.file_exists("Release/GameData/KIS/Parts/fun_balloon.cfg"));

  // No -p flag: no archive
  assert!(!project.file_exists("KIS_v1.4.2.zip"));
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Releasing Kerbal Inventory System v1.4.2"));
  assert!(stdout.contains("No package requested"));

  Ok(())
}

#[test]
fn test_build_updates_repository_version_file() -> Result<()> {
  let project = TestProject::new()?;
  let archiver = project.fake_archiver()?;
  project.write_config(&base_config(&archiver))?;

  assert_success(&run_relforge(&project.path, &["build"])?);

  let metadata = project.read_file("KIS.version")?;
  let parsed: serde_json::Value = serde_json::from_str(&metadata)?;
  assert_eq!(parsed["VERSION"]["MAJOR"], 1);
  assert_eq!(parsed["VERSION"]["MINOR"], 4);
  assert_eq!(parsed["VERSION"]["PATCH"], 2);
  assert_eq!(parsed["VERSION"]["BUILD"], 0);
  assert_eq!(parsed["NAME"], "KIS");

  Ok(())
}

#[test]
fn test_build_purges_stale_destination_state() -> Result<()> {
  let project = TestProject::new()?;
  let archiver = project.fake_archiver()?;
  project.write_config(&base_config(&archiver))?;

  project.write_file("Release/GameData/stale.txt", "stale")?;

  assert_success(&run_relforge(&project.path, &["build"])?);
  assert!(!project.file_exists("Release/GameData/stale.txt"));

  // A second run against the produced tree is byte-identical
  let first = project.read_file("Release/GameData/KIS/Parts/container.cfg")?;
  assert_success(&run_relforge(&project.path, &["build"])?);
  assert_eq!(project.read_file("Release/GameData/KIS/Parts/container.cfg")?, first);
  assert!(!project.file_exists("Release/GameData/KIS/Parts/fun_balloon.cfg"));

  Ok(())
}

#[test]
fn test_package_flag_produces_archive_with_digest() -> Result<()> {
  let project = TestProject::new()?;
  let archiver = project.fake_archiver()?;
  project.write_config(&base_config(&archiver))?;

  let output = run_relforge(&project.path, &["build", "-p"])?;
  assert_success(&output);

  assert!(project.file_exists("KIS_v1.4.2.zip"));
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Packaged"));
  assert!(stdout.contains("sha256:"));

  Ok(())
}

#[test]
fn test_package_overwrite_guard() -> Result<()> {
  let project = TestProject::new()?;
  let archiver = project.fake_archiver()?;
  project.write_config(&base_config(&archiver))?;

  assert_success(&run_relforge(&project.path, &["build", "-p"])?);

  // Simulate a previously published artifact
  project.write_file("KIS_v1.4.2.zip", "published")?;

  let output = run_relforge(&project.path, &["build", "-p"])?;
  assert_eq!(output.status.code(), Some(3));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("already exists"));
  assert!(stderr.contains("--overwrite"));
  assert_eq!(project.read_file("KIS_v1.4.2.zip")?, "published");

  let output = run_relforge(&project.path, &["build", "-p", "-o"])?;
  assert_success(&output);
  assert_eq!(project.read_file("KIS_v1.4.2.zip")?, "archive");

  Ok(())
}

#[test]
fn test_build_number_appears_in_release_name() -> Result<()> {
  let project = TestProject::new()?;
  let archiver = project.fake_archiver()?;
  project.write_config(&base_config(&archiver))?;
  project.write_file(
    "Source/Properties/AssemblyInfo.cs",
    "[assembly: AssemblyVersion(\"1.4.2.7\")]\n",
  )?;

  assert_success(&run_relforge(&project.path, &["build", "-p"])?);
  assert!(project.file_exists("KIS_v1.4.2_build7.zip"));

  Ok(())
}

#[test]
fn test_missing_version_line_is_fatal() -> Result<()> {
  let project = TestProject::new()?;
  let archiver = project.fake_archiver()?;
  project.write_config(&base_config(&archiver))?;
  project.write_file("Source/Properties/AssemblyInfo.cs", "using System.Reflection;\n")?;

  let output = run_relforge(&project.path, &["build"])?;
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Cannot extract version"));

  Ok(())
}

#[test]
fn test_compile_step_runs_before_assembly() -> Result<()> {
  let project = TestProject::new()?;
  let archiver = project.fake_archiver()?;
  let compiler = project.fake_compiler("Source/bin/Release/KIS.dll")?;
  project.write_config(&base_config(&archiver).replace(
    "[build]",
    &format!(
      "[build]\ncompile_command = \"{}\"\ncompiled_binary = \"Source/bin/Release/KIS.dll\"",
      compiler
    ),
  ))?;

  assert_success(&run_relforge(&project.path, &["build"])?);
  assert_eq!(project.read_file("Source/bin/Release/KIS.dll")?, "compiled");

  Ok(())
}

#[test]
fn test_failing_compiler_aborts_the_run() -> Result<()> {
  let project = TestProject::new()?;
  let archiver = project.fake_archiver()?;
  let compiler = project.failing_compiler()?;
  project.write_config(&base_config(&archiver).replace(
    "[build]",
    &format!("[build]\ncompile_command = \"{}\"", compiler),
  ))?;

  let output = run_relforge(&project.path, &["build"])?;
  assert_eq!(output.status.code(), Some(2));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("failed with exit code 5"));

  // Nothing was assembled: the compile step precedes the purge
  assert!(!project.file_exists("Release/GameData"));

  Ok(())
}

#[test]
fn test_missing_listed_file_reports_destination() -> Result<()> {
  let project = TestProject::new()?;
  let archiver = project.fake_archiver()?;
  project.write_config(&format!(
    "{}\n{}",
    base_config(&archiver),
    r#"
[[structure]]
dest = "/GameData/KIS/Docs"
files = ["/MISSING_GUIDE.pdf"]
"#
  ))?;

  let output = run_relforge(&project.path, &["build"])?;
  assert_eq!(output.status.code(), Some(2));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("/GameData/KIS/Docs"));
  assert!(stderr.contains("MISSING_GUIDE.pdf"));

  Ok(())
}

#[test]
fn test_post_copy_runs_after_assembly() -> Result<()> {
  let project = TestProject::new()?;
  let archiver = project.fake_archiver()?;
  project.write_config(&format!(
    "{}\n{}",
    base_config(&archiver),
    r#"
[[post_copy]]
from = "KIS.version"
to = "Release/GameData/KIS/KIS.version"
"#
  ))?;

  assert_success(&run_relforge(&project.path, &["build"])?);
  assert!(project.file_exists("Release/GameData/KIS/KIS.version"));

  Ok(())
}
