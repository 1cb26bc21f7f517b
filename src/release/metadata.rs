//! Version metadata store updates
//!
//! The repository carries a JSON file with a `VERSION` record whose
//! `MAJOR`/`MINOR`/`PATCH`/`BUILD` fields mirror the released version. The
//! only write this tool performs is a full overwrite of those four fields;
//! everything else in the file, including key order, is preserved.

use crate::core::error::{ForgeError, ForgeResult, ResultExt, VersionError};
use crate::release::version::ReleaseVersion;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

/// Rewrite the `VERSION` record of the metadata store at `path`.
pub fn update_version_metadata(path: &Path, version: &ReleaseVersion) -> ForgeResult<()> {
  let content =
    fs::read_to_string(path).with_context(|| format!("Failed to read version file {}", path.display()))?;
  let mut document: Value = serde_json::from_str(&content)
    .with_context(|| format!("Failed to parse version file {}", path.display()))?;

  let record = document
    .get_mut("VERSION")
    .and_then(Value::as_object_mut)
    .ok_or_else(|| {
      ForgeError::Version(VersionError::MetadataKeyMissing {
        file: path.to_path_buf(),
      })
    })?;

  record.insert("MAJOR".to_string(), json!(version.major));
  record.insert("MINOR".to_string(), json!(version.minor));
  record.insert("PATCH".to_string(), json!(version.patch));
  record.insert("BUILD".to_string(), json!(version.build));

  let mut output = serde_json::to_string_pretty(&document)?;
  output.push('\n');
  fs::write(path, output).with_context(|| format!("Failed to write version file {}", path.display()))?;
  Ok(())
}
