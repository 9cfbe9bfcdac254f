//! The resolved kind of a specification step.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Semantic kind of a resolved step.
///
/// Conjunction lines ("And") never reach this type: the document parser
/// resolves them to the kind of the most recent concrete step before a step
/// is stored, and rejects conjunctions that appear first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// Establishes the preconditions of a scenario.
    Given,
    /// Performs the action under test.
    When,
    /// Asserts the expected outcome.
    Then,
}

impl StepKind {
    /// Return the canonical English keyword for this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use plainspec_patterns::StepKind;
    ///
    /// assert_eq!(StepKind::Given.as_str(), "Given");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`StepKind`] from text fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid step kind: {0}")]
pub struct StepKindParseError(pub String);

impl FromStr for StepKind {
    type Err = StepKindParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("given") {
            Ok(Self::Given)
        } else if trimmed.eq_ignore_ascii_case("when") {
            Ok(Self::When)
        } else if trimmed.eq_ignore_ascii_case("then") {
            Ok(Self::Then)
        } else {
            Err(StepKindParseError(trimmed.to_string()))
        }
    }
}
