//! CurseForge-style hosting API client
//!
//! One client instance owns the endpoint, the optional API token (from the
//! `RELFORGE_API_TOKEN` environment variable; tokens never live in config
//! files) and a once-fetched cache of the game-version list. Requests
//! without a token are attempted anonymously and surface the server's
//! rejection.

use crate::core::config::UploadConfig;
use crate::core::error::{ForgeError, ForgeResult, ResultExt, UploadError};
use regex::Regex;
use reqwest::Method;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use url::Url;

const API_TOKEN_ENV: &str = "RELFORGE_API_TOKEN";
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One game version known to the hosting side
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameVersion {
  pub id: u64,
  pub name: String,
}

/// Server response to a successful upload
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReceipt {
  pub id: u64,
}

/// Release channel of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseChannel {
  Release,
  Alpha,
  Beta,
}

impl FromStr for ReleaseChannel {
  type Err = ForgeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "release" => Ok(ReleaseChannel::Release),
      "alpha" => Ok(ReleaseChannel::Alpha),
      "beta" => Ok(ReleaseChannel::Beta),
      other => Err(ForgeError::message(format!(
        "Unknown release channel '{}'. Allowed values: release, alpha, beta",
        other
      ))),
    }
  }
}

impl fmt::Display for ReleaseChannel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseChannel::Release => write!(f, "release"),
      ReleaseChannel::Alpha => write!(f, "alpha"),
      ReleaseChannel::Beta => write!(f, "beta"),
    }
  }
}

/// Everything the server wants to know about an uploaded file
pub struct UploadOptions {
  pub changelog: String,
  pub changelog_type: String,
  pub title: Option<String>,
  pub channel: ReleaseChannel,
  /// Regex selecting target game versions, matched at the start of the name
  pub versions_pattern: String,
}

/// The `metadata` form field, serialized as the API expects it
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadMetadata<'a> {
  changelog: &'a str,
  changelog_type: &'a str,
  display_name: Option<&'a str>,
  game_versions: Vec<u64>,
  release_type: ReleaseChannel,
}

pub struct UploadClient {
  http: Client,
  base_url: Url,
  project_id: String,
  api_token: Option<String>,
  versions: Option<Vec<GameVersion>>,
}

impl UploadClient {
  pub fn new(config: &UploadConfig) -> ForgeResult<Self> {
    let http = Client::builder()
      .user_agent(format!("relforge/{}", VERSION))
      .build()?;

    Ok(Self {
      http,
      base_url: Url::parse(&config.base_url)?,
      project_id: config.project_id.clone(),
      api_token: std::env::var(API_TOKEN_ENV).ok(),
      versions: None,
    })
  }

  fn request(&self, method: Method, path: &str) -> ForgeResult<RequestBuilder> {
    let url = self.base_url.join(path)?;
    let mut builder = self.http.request(method, url);
    if let Some(token) = &self.api_token {
      builder = builder.header("X-Api-Token", token);
    }
    Ok(builder)
  }

  /// The game versions available on the hosting side, optionally filtered.
  ///
  /// The full list is fetched once per client and cached; repeated calls
  /// only filter the cache.
  pub fn game_versions(&mut self, pattern: Option<&str>) -> ForgeResult<Vec<GameVersion>> {
    if self.versions.is_none() {
      let response = self.request(Method::GET, "/api/game/versions")?.send()?;
      let body = check_response(response)?;
      self.versions = Some(serde_json::from_str(&body)?);
    }
    let all = self.versions.as_deref().unwrap_or_default();

    match pattern {
      Some(pattern) => filter_versions(all, pattern),
      None => Ok(all.to_vec()),
    }
  }

  /// Upload a packaged release file to the project.
  pub fn upload_file(&mut self, file: &Path, options: &UploadOptions) -> ForgeResult<UploadReceipt> {
    let game_versions: Vec<u64> = self
      .game_versions(Some(&options.versions_pattern))?
      .iter()
      .map(|v| v.id)
      .collect();

    let metadata = UploadMetadata {
      changelog: &options.changelog,
      changelog_type: &options.changelog_type,
      display_name: options.title.as_deref(),
      game_versions,
      release_type: options.channel,
    };

    let form = Form::new()
      .part(
        "metadata",
        Part::text(serde_json::to_string(&metadata)?).mime_str("application/json")?,
      )
      .part(
        "file",
        Part::file(file)
          .with_context(|| format!("Failed to read upload file {}", file.display()))?
          .mime_str("application/octet-stream")?,
      );

    let path = format!("/api/projects/{}/upload-file", self.project_id);
    let response = self.request(Method::POST, &path)?.multipart(form).send()?;
    let body = check_response(response)?;
    Ok(serde_json::from_str(&body)?)
  }
}

/// Surface non-2xx responses as API errors with the server's body attached
fn check_response(response: Response) -> ForgeResult<String> {
  let status = response.status();
  let body = response.text()?;
  if !status.is_success() {
    return Err(ForgeError::Upload(UploadError::Api {
      status: status.as_u16(),
      body,
    }));
  }
  Ok(body)
}

/// Keep the versions whose name the pattern matches at the start
fn filter_versions(versions: &[GameVersion], pattern: &str) -> ForgeResult<Vec<GameVersion>> {
  let regex = Regex::new(pattern)?;
  Ok(
    versions
      .iter()
      .filter(|v| regex.find(&v.name).is_some_and(|m| m.start() == 0))
      .cloned()
      .collect(),
  )
}
