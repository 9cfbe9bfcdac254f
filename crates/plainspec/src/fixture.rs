//! Runtime support for generated test fixtures.
//!
//! `plainspec generate` emits one test per scenario; each test delegates to
//! [`run_scenario`], which loads the specification file, matches the named
//! scenario against the inventory-registered definitions, and panics with
//! the rendered report when anything is undefined or failing.

use std::path::Path;

use thiserror::Error;

use crate::localisation::KeywordSet;
use crate::parser::{self, ParseError};
use crate::registry::DefinitionRegistry;
use crate::report::{ScenarioResult, VerificationReport};
use crate::verify::Verifier;

/// Failures while loading and verifying a specification file.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The specification file could not be read.
    #[error("cannot read specification file: {0}")]
    Io(#[from] std::io::Error),
    /// The specification text failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The named scenario does not exist in the file.
    #[error("no scenario named `{name}` in {path}")]
    MissingScenario {
        /// The requested scenario name.
        name: String,
        /// The specification file path.
        path: String,
    },
}

/// Parse a specification file and verify every scenario against the
/// inventory-registered definitions.
///
/// # Errors
///
/// Returns [`FixtureError`] when the file cannot be read or parsed.
pub fn verify_file(path: impl AsRef<Path>) -> Result<VerificationReport, FixtureError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let document = parser::parse(&text)?;
    let registry = DefinitionRegistry::from_inventory();
    let mut verifier =
        Verifier::with_keywords(&registry, KeywordSet::for_language(&document.language));
    Ok(verifier.verify_document(&document))
}

/// Parse a specification file and verify one named scenario.
///
/// # Errors
///
/// Returns [`FixtureError`] when the file cannot be read or parsed, or the
/// scenario does not exist.
pub fn verify_scenario(
    path: impl AsRef<Path>,
    name: &str,
) -> Result<ScenarioResult, FixtureError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let document = parser::parse(&text)?;
    let scenario = document
        .scenario(name)
        .ok_or_else(|| FixtureError::MissingScenario {
            name: name.to_string(),
            path: path.display().to_string(),
        })?;
    let registry = DefinitionRegistry::from_inventory();
    let mut verifier =
        Verifier::with_keywords(&registry, KeywordSet::for_language(&document.language));
    Ok(verifier.verify_scenario(scenario))
}

/// Verify one named scenario and panic on any problem.
///
/// This is the entry point generated fixtures call from their `#[test]`
/// functions, so failures surface as ordinary test panics.
///
/// # Panics
///
/// Panics when the file cannot be loaded, the scenario is missing, or any
/// step is undefined, failed, or skipped.
pub fn run_scenario(path: &str, name: &str) {
    let result = verify_scenario(path, name)
        .unwrap_or_else(|error| panic!("cannot verify scenario `{name}`: {error}"));
    if !result.passed() {
        let mut report = VerificationReport::new();
        report.push(result);
        panic!("scenario `{name}` did not pass:\n{report}");
    }
}
