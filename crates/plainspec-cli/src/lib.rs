//! Fixture generation and document inspection for plain-text behaviour
//! specifications.
//!
//! The `plainspec` binary turns specification files into test fixtures
//! (`generate`), lists their scenarios (`scenarios`), and checks them for
//! structural errors (`check`). Generated fixtures delegate to
//! `plainspec::fixture::run_scenario` at test time.

pub mod cli;
pub mod generate;

pub use cli::run;
