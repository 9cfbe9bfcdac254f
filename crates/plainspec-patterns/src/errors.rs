//! Errors surfaced while building a definition's matching pattern.

use thiserror::Error;

/// Reasons a step definition's matching pattern could not be built.
///
/// These are configuration defects scoped to one definition: the definition
/// can never match a step, but matching for every other definition is
/// unaffected.
#[derive(Debug, Error)]
pub enum PatternBuildError {
    /// No inline pattern generator handles the parameter's declared type.
    #[error("no inline pattern handles parameter `{name}` of type {ty}")]
    UnsupportedType {
        /// Name of the offending parameter.
        name: String,
        /// Rendered parameter type.
        ty: String,
    },
    /// An inline parameter's name never appears as a word of the phrase, so
    /// the definition could never bind a value to it.
    #[error("parameter `{name}` does not appear in phrase `{phrase}`")]
    UnplacedParameter {
        /// Name of the offending parameter.
        name: String,
        /// Phrase derived from the definition identifier.
        phrase: String,
    },
    /// The assembled pattern failed to compile as a regular expression.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}
