//! Core engine for relforge
//!
//! This module contains the building blocks of a release run:
//!
//! - **config**: relforge.toml parsing and validation
//! - **error**: error types with contextual help messages and exit codes
//! - **rule**: typed structure-specification entries
//! - **pattern**: glob matching against a directory listing
//! - **schedule**: deterministic execution ordering (copies before drops)
//! - **assemble**: the assembly driver applying entries to the filesystem

pub mod assemble;
pub mod config;
pub mod error;
pub mod pattern;
pub mod rule;
pub mod schedule;
