//! Upload command implementation

use crate::core::config::ForgeConfig;
use crate::core::error::{ForgeError, ForgeResult, ResultExt};
use crate::release::ReleaseVersion;
use crate::upload::{ReleaseChannel, UploadClient, UploadOptions};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Run the upload command
pub fn run_upload(
  file: Option<PathBuf>,
  changelog: PathBuf,
  versions: String,
  title: Option<String>,
  channel: String,
  changelog_type: String,
) -> ForgeResult<()> {
  let root = env::current_dir()?;
  let config = ForgeConfig::load(&root)?;
  let upload_config = config.upload.as_ref().ok_or_else(|| {
    ForgeError::with_help(
      "No [upload] section configured",
      "Add base_url and project_id under [upload] in relforge.toml",
    )
  })?;

  // Default to the canonical package of the current source version
  let file = match file {
    Some(file) => file,
    None => {
      let version = ReleaseVersion::extract(&config.versions_file())?;
      config.package_path(&version)
    }
  };
  if !file.is_file() {
    return Err(ForgeError::with_help(
      format!("Package not found: {}", file.display()),
      "Run `relforge build -p` first, or pass the archive path explicitly.",
    ));
  }

  let changelog = fs::read_to_string(&changelog)
    .with_context(|| format!("Failed to read changelog {}", changelog.display()))?;
  let channel: ReleaseChannel = channel.parse()?;

  let options = UploadOptions {
    changelog,
    changelog_type,
    title,
    channel,
    versions_pattern: versions,
  };

  let mut client = UploadClient::new(upload_config)?;
  println!(
    "📤 Uploading {} to project {} ({})...",
    file.display(),
    upload_config.project_id,
    channel
  );
  let receipt = client.upload_file(&file, &options)?;

  println!("✅ Upload complete (file id {})", receipt.id);
  Ok(())
}
