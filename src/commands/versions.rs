//! Versions command implementation

use crate::core::config::ForgeConfig;
use crate::core::error::{ForgeError, ForgeResult};
use crate::upload::UploadClient;
use std::env;

/// Run the versions command
pub fn run_versions(pattern: Option<String>, json: bool) -> ForgeResult<()> {
  let root = env::current_dir()?;
  let config = ForgeConfig::load(&root)?;
  let upload_config = config.upload.as_ref().ok_or_else(|| {
    ForgeError::with_help(
      "No [upload] section configured",
      "Add base_url and project_id under [upload] in relforge.toml",
    )
  })?;

  let mut client = UploadClient::new(upload_config)?;
  if !json {
    println!("Requesting versions for: {}", upload_config.base_url);
  }
  let versions = client.game_versions(pattern.as_deref())?;

  if json {
    println!("{}", serde_json::to_string_pretty(&versions)?);
  } else if versions.is_empty() {
    println!("⚠️  No matching game versions");
  } else {
    for version in &versions {
      println!("  {:>8}  {}", version.id, version.name);
    }
  }

  Ok(())
}
