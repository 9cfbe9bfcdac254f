//! Shared phrase and pattern utilities for plainspec.
//!
//! The crate converts step-definition identifiers into human-readable
//! phrases, synthesises regular-expression fragments for inline parameter
//! types, and assembles the full matching pattern for a registered step
//! definition. Both the runtime and the fixture-generation tooling depend on
//! it so they agree on how identifiers and step text relate.

mod builder;
mod errors;
mod inline;
mod kind;
mod phrase;

pub use builder::{build_definition_regex, compile_definition_regex, validate_definition};
pub use errors::PatternBuildError;
pub use inline::{EnumType, InlineCatalogue, InlinePattern, Param, ParamType};
pub use kind::{StepKind, StepKindParseError};
pub use phrase::{Prefix, looks_like_step_definition, phrase, suggest_identifier};
