//! Core library for plainspec.
//!
//! Behaviour specifications written as plain, optionally localised text
//! ("Feature: … / Scenario: … / Given/When/Then …", including tabular data)
//! are parsed into a document model and bound to executable step
//! definitions through matching patterns generated from each definition's
//! identifier and parameter types.
//!
//! The pipeline has two stages. [`parser`] turns raw text into a
//! [`model::SpecificationDocument`], attaching key/value forms and tabular
//! grids to the steps they follow. [`verify`] then matches every step
//! against a [`registry::DefinitionRegistry`], extracts typed arguments,
//! invokes the bound handlers, and accumulates a
//! [`report::VerificationReport`] naming every undefined step alongside a
//! suggested definition identifier.

pub mod block;
pub mod config;
pub mod fixture;
pub mod localisation;
pub mod model;
pub mod parser;
pub mod registry;
pub mod report;
pub mod step_args;
pub mod text;
pub mod verify;

pub use block::{Block, Form, Grid};
pub use inventory::{iter, submit};
pub use localisation::KeywordSet;
pub use model::{Feature, Scenario, SpecificationDocument, Step};
pub use parser::{DocumentParser, ParseError, parse};
pub use plainspec_patterns::{
    EnumType, InlineCatalogue, InlinePattern, Param, ParamType, PatternBuildError, Prefix,
    StepKind, looks_like_step_definition, phrase, suggest_identifier,
};
pub use registry::{DefinitionRegistry, RegisteredDefinition, StepDefinition};
pub use report::{
    FailedStep, ScenarioResult, StepOutcome, StepRecord, UndefinedStep, VerificationReport,
};
pub use step_args::{ArgValue, StepArgs, StepFailure};
pub use verify::Verifier;
