//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A test project laid out like a small KSP mod source tree
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Create a new test project with sources, binaries and a version file
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    let project = Self { _root: root, path };

    project.write_file(
      "Source/Properties/AssemblyInfo.cs",
      "// Auto-generated.\nusing System.Reflection;\n[assembly: AssemblyVersion(\"1.4.2\")]\n",
    )?;
    project.write_file("LICENSE.md", "license text\n")?;
    project.write_file("settings.cfg", "SETTINGS {}\n")?;
    project.write_file("Parts/container.cfg", "PART { name = container }\n")?;
    project.write_file("Parts/fun_balloon.cfg", "PART { name = balloon }\n")?;
    project.write_file("Binaries/ModuleManager.dll", "mm\n")?;
    project.write_file("Binaries/MiniAVC.dll", "avc\n")?;
    project.write_file(
      "KIS.version",
      r#"{
  "NAME": "KIS",
  "VERSION": { "MAJOR": 0, "MINOR": 0, "PATCH": 0, "BUILD": 0 }
}
"#,
    )?;

    Ok(project)
  }

  /// Write relforge.toml at the project root
  pub fn write_config(&self, content: &str) -> Result<()> {
    self.write_file("relforge.toml", content)
  }

  /// Write a file (creating parent directories) relative to the project root
  pub fn write_file(&self, rel: &str, content: &str) -> Result<()> {
    let file_path = self.path.join(rel);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
  }

  /// Check if a file exists relative to the project root
  pub fn file_exists(&self, rel: &str) -> bool {
    self.path.join(rel).exists()
  }

  /// Read a file relative to the project root
  pub fn read_file(&self, rel: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(rel))?)
  }

  /// Install a fake archiver script that writes a marker file to the
  /// requested output path. Returns the command to put in the config.
  pub fn fake_archiver(&self) -> Result<String> {
    self.script("bin/fake-zip.sh", "printf archive > \"$2\"")
  }

  /// Install a fake compiler script creating the given file on success
  pub fn fake_compiler(&self, produces: &str) -> Result<String> {
    let out = self.path.join(produces);
    if let Some(parent) = out.parent() {
      std::fs::create_dir_all(parent)?;
    }
    self.script("bin/fake-cc.sh", &format!("printf compiled > \"{}\"", out.display()))
  }

  /// Install a fake compiler script that always fails
  pub fn failing_compiler(&self) -> Result<String> {
    self.script("bin/fake-cc.sh", "exit 5")
  }

  fn script(&self, rel: &str, body: &str) -> Result<String> {
    use std::os::unix::fs::PermissionsExt;
    let file_path = self.path.join(rel);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file_path, format!("#!/bin/sh\n{}\n", body))?;
    std::fs::set_permissions(&file_path, std::fs::Permissions::from_mode(0o755))?;
    Ok(file_path.to_string_lossy().into_owned())
  }
}

/// Run the relforge binary in a directory
pub fn run_relforge(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_relforge");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run relforge")
}

/// Assert the process succeeded, with stderr in the failure message
pub fn assert_success(output: &Output) {
  assert!(
    output.status.success(),
    "relforge failed with {:?}\nstdout: {}\nstderr: {}",
    output.status.code(),
    String::from_utf8_lossy(&output.stdout),
    String::from_utf8_lossy(&output.stderr)
  );
}
