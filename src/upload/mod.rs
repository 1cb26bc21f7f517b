//! Hosting API collaborator (upload and version listing)

pub mod client;

pub use client::{GameVersion, ReleaseChannel, UploadClient, UploadOptions};
