//! Integration test suite entry point

mod helpers;
mod test_build;
mod test_cli;
