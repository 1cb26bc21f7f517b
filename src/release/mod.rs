//! Release identity, metadata and packaging
//!
//! A release run resolves its identity first: the version tuple extracted
//! from the sources. Every later step (metadata rewrite, archive
//! naming, upload defaults) derives from it:
//!
//! - **version**: extraction from the versions file, canonical name formatting
//! - **metadata**: the repository's JSON version store, rewritten per build
//! - **package**: overwrite-guarded archiving of the assembled tree

pub mod metadata;
pub mod package;
pub mod version;

pub use package::Packager;
pub use version::ReleaseVersion;
