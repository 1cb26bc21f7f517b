//! CLI commands for relforge
//!
//! - **build**: run the release pipeline (extract version, compile,
//!   assemble, optionally package)
//! - **upload**: push a packaged release to the hosting API
//! - **versions**: list game versions known to the hosting API

pub mod build;
pub mod upload;
pub mod versions;

pub use build::run_build;
pub use upload::run_upload;
pub use versions::run_versions;
