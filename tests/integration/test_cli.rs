//! Integration tests for the upload-facing CLI surface
//!
//! These cover argument and configuration validation only; nothing here
//! talks to a real hosting API.

use crate::helpers::{TestProject, run_relforge};
use anyhow::Result;

const CONFIG_WITHOUT_UPLOAD: &str = r#"
[project]
title = "Kerbal Inventory System"
versions_file = "Source/Properties/AssemblyInfo.cs"
"#;

const CONFIG_WITH_UPLOAD: &str = r#"
[project]
title = "Kerbal Inventory System"
versions_file = "Source/Properties/AssemblyInfo.cs"

[upload]
base_url = "https://kerbal.curseforge.example"
project_id = "123456"
"#;

#[test]
fn test_upload_requires_upload_config() -> Result<()> {
  let project = TestProject::new()?;
  project.write_config(CONFIG_WITHOUT_UPLOAD)?;
  project.write_file("CHANGELOG.md", "# Changes\n")?;

  let output = run_relforge(
    &project.path,
    &["upload", "--changelog", "CHANGELOG.md", "--versions", "1.4"],
  )?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("No [upload] section configured"));
  assert!(stderr.contains("relforge.toml"));

  Ok(())
}

#[test]
fn test_upload_defaults_to_current_version_package() -> Result<()> {
  let project = TestProject::new()?;
  project.write_config(CONFIG_WITH_UPLOAD)?;
  project.write_file("CHANGELOG.md", "# Changes\n")?;

  // No KIS_v1.4.2.zip around: the command must point at the build step
  let output = run_relforge(
    &project.path,
    &["upload", "--changelog", "CHANGELOG.md", "--versions", "1.4"],
  )?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("KIS_v1.4.2.zip"));
  assert!(stderr.contains("relforge build -p"));

  Ok(())
}

#[test]
fn test_upload_rejects_unknown_channel() -> Result<()> {
  let project = TestProject::new()?;
  project.write_config(CONFIG_WITH_UPLOAD)?;
  project.write_file("CHANGELOG.md", "# Changes\n")?;
  project.write_file("KIS_v1.4.2.zip", "archive")?;

  let output = run_relforge(
    &project.path,
    &[
      "upload",
      "--changelog",
      "CHANGELOG.md",
      "--versions",
      "1.4",
      "--channel",
      "stable",
    ],
  )?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Unknown release channel 'stable'"));

  Ok(())
}

#[test]
fn test_versions_requires_upload_config() -> Result<()> {
  let project = TestProject::new()?;
  project.write_config(CONFIG_WITHOUT_UPLOAD)?;

  let output = run_relforge(&project.path, &["versions"])?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("No [upload] section configured"));

  Ok(())
}

#[test]
fn test_build_without_config_mentions_relforge_toml() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_relforge(&project.path, &["build"])?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("No relforge configuration found"));
  assert!(stderr.contains("relforge.toml"));

  Ok(())
}
