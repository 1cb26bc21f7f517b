//! External build-tool collaborators
//!
//! The compiler and the archiver are opaque external commands. Each wrapper
//! runs one blocking child process and maps its exit status into the error
//! taxonomy; nothing here interprets tool output beyond pass/fail.

pub mod archiver;
pub mod compiler;

pub use archiver::Archiver;
pub use compiler::Compiler;
