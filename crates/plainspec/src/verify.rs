//! The matching and dispatch engine for one verification session.
//!
//! A [`Verifier`] walks a parsed document scenario by scenario, matching
//! each step's text against the registered definitions of the step's kind.
//! Definition patterns are built lazily on first use and cached for the
//! session, keyed by registry position.

use hashbrown::HashMap;
use plainspec_patterns::{
    Param, ParamType, PatternBuildError, Prefix, compile_definition_regex, phrase,
    suggest_identifier,
};
use regex::Regex;

use crate::block::Block;
use crate::localisation::KeywordSet;
use crate::model::{Scenario, SpecificationDocument, Step};
use crate::registry::{DefinitionRegistry, StepDefinition};
use crate::report::{ScenarioResult, StepOutcome, StepRecord, VerificationReport};
use crate::step_args::{ArgValue, StepArgs, StepFailure};

/// Matches scenario steps against a registry for one verification session.
pub struct Verifier<'r> {
    registry: &'r DefinitionRegistry,
    keywords: KeywordSet,
    cache: HashMap<usize, Result<Regex, PatternBuildError>>,
}

impl<'r> Verifier<'r> {
    /// A verifier matching documents written with English keywords.
    #[must_use]
    pub fn new(registry: &'r DefinitionRegistry) -> Self {
        Self::with_keywords(registry, KeywordSet::english())
    }

    /// A verifier matching documents written with the given keyword set.
    ///
    /// The set must match the document's language or conjunction and
    /// keyword prefixes will not line up with step text.
    #[must_use]
    pub fn with_keywords(registry: &'r DefinitionRegistry, keywords: KeywordSet) -> Self {
        Self {
            registry,
            keywords,
            cache: HashMap::new(),
        }
    }

    /// Verify every scenario of a document.
    #[must_use]
    pub fn verify_document(&mut self, document: &SpecificationDocument) -> VerificationReport {
        let mut report = VerificationReport::new();
        for scenario in &document.scenarios {
            let result = self.verify_scenario(scenario);
            report.push(result);
        }
        report
    }

    /// Verify one scenario, step by step.
    ///
    /// A handler failure aborts the scenario: remaining steps are recorded
    /// as skipped. An undefined step is recorded and matching continues.
    #[must_use]
    pub fn verify_scenario(&mut self, scenario: &Scenario) -> ScenarioResult {
        let mut steps = Vec::with_capacity(scenario.steps.len());
        let mut aborted = false;
        for step in &scenario.steps {
            if aborted {
                steps.push(StepRecord {
                    text: step.text.clone(),
                    outcome: StepOutcome::Skipped,
                });
                continue;
            }
            let outcome = match self.match_step(step) {
                MatchOutcome::Bound(definition, args) => match definition.invoke(&args) {
                    Ok(()) => StepOutcome::Passed,
                    Err(failure) => {
                        aborted = true;
                        StepOutcome::Failed {
                            message: failure.to_string(),
                        }
                    }
                },
                MatchOutcome::BindFailed(failure) => {
                    aborted = true;
                    StepOutcome::Failed {
                        message: failure.to_string(),
                    }
                }
                MatchOutcome::Undefined => StepOutcome::Undefined {
                    suggestion: suggest_identifier(step.kind, &step.text),
                },
            };
            steps.push(StepRecord {
                text: step.text.clone(),
                outcome,
            });
        }
        ScenarioResult {
            name: scenario.name.clone(),
            steps,
        }
    }

    /// Try each candidate definition of the step's kind, in registration
    /// order, and bind arguments from the first whose pattern matches.
    fn match_step(&mut self, step: &Step) -> MatchOutcome<'r> {
        let registry = self.registry;
        for (index, definition) in registry
            .definitions()
            .iter()
            .enumerate()
            .filter(|(_, definition)| definition.kind() == step.kind)
        {
            let pattern = match self.pattern_for(index, definition) {
                Ok(pattern) => pattern,
                Err(_) => continue,
            };
            let Some(captures) = pattern.captures(&step.text) else {
                continue;
            };
            log::debug!(
                "step {:?} matched definition `{}`",
                step.text,
                definition.identifier(),
            );
            // Binding failures (a missing or wrongly shaped block) are
            // invocation failures, not match failures: the pattern matched,
            // so the step is defined, it just cannot run.
            return match bind_arguments(definition, &captures, step.block.as_ref()) {
                Ok(args) => MatchOutcome::Bound(definition, args),
                Err(failure) => MatchOutcome::BindFailed(failure),
            };
        }
        MatchOutcome::Undefined
    }

    fn pattern_for(
        &mut self,
        index: usize,
        definition: &StepDefinition,
    ) -> &Result<Regex, PatternBuildError> {
        let keywords = self.keywords.step_keywords();
        let catalogue = self.registry.catalogue();
        self.cache.entry(index).or_insert_with(|| {
            compile_definition_regex(
                definition.identifier(),
                definition.params(),
                catalogue,
                &keywords,
            )
        })
    }
}

/// Result of matching one step against the registry.
enum MatchOutcome<'r> {
    /// A definition matched and its arguments were bound.
    Bound(&'r StepDefinition, StepArgs),
    /// A definition matched but argument binding failed.
    BindFailed(StepFailure),
    /// No definition's pattern matched the step text.
    Undefined,
}

fn bind_arguments(
    definition: &StepDefinition,
    captures: &regex::Captures<'_>,
    block: Option<&Block>,
) -> Result<StepArgs, StepFailure> {
    let mut values = Vec::with_capacity(definition.params().len());
    for param in definition.params() {
        let value = match &param.ty {
            ParamType::Form => match block {
                Some(Block::Form(form)) => ArgValue::Form(form.clone()),
                _ => {
                    return Err(StepFailure::new(format!(
                        "step does not provide the form required by parameter `{}`",
                        param.name,
                    )));
                }
            },
            ParamType::Grid => match block {
                Some(Block::Grid(grid)) => ArgValue::Grid(grid.clone()),
                _ => {
                    return Err(StepFailure::new(format!(
                        "step does not provide the grid required by parameter `{}`",
                        param.name,
                    )));
                }
            },
            _ => {
                let captured = captures.name(param.name).map(|m| m.as_str()).ok_or_else(
                    || {
                        StepFailure::new(format!(
                            "no capture for parameter `{}`",
                            param.name,
                        ))
                    },
                )?;
                coerce(param, captured)?
            }
        };
        values.push((param.name.to_string(), value));
    }
    Ok(StepArgs::new(values))
}

fn coerce(param: &Param, captured: &str) -> Result<ArgValue, StepFailure> {
    match &param.ty {
        ParamType::Int { nullable } => {
            if *nullable && captured.eq_ignore_ascii_case("null") {
                return Ok(ArgValue::Null);
            }
            captured
                .parse::<i64>()
                .map(ArgValue::Int)
                .map_err(|error| {
                    StepFailure::new(format!(
                        "cannot parse `{captured}` as an integer for `{}`: {error}",
                        param.name,
                    ))
                })
        }
        ParamType::Float { nullable } => {
            if *nullable && captured.eq_ignore_ascii_case("null") {
                return Ok(ArgValue::Null);
            }
            captured
                .parse::<f64>()
                .map(ArgValue::Float)
                .map_err(|error| {
                    StepFailure::new(format!(
                        "cannot parse `{captured}` as a number for `{}`: {error}",
                        param.name,
                    ))
                })
        }
        ParamType::Enum(enum_type) => enum_type
            .values
            .iter()
            .find(|value| loosely_equal(captured, value))
            .map(|value| ArgValue::Enum((*value).to_string()))
            .ok_or_else(|| {
                StepFailure::new(format!(
                    "`{captured}` is not a value of enum {}",
                    enum_type.name,
                ))
            }),
        _ => Ok(ArgValue::Text(captured.to_string())),
    }
}

/// Compare captured text against an enum value identifier, ignoring case
/// and internal whitespace in both.
fn loosely_equal(captured: &str, value: &str) -> bool {
    let normalise = |text: &str| -> String {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    };
    normalise(captured) == normalise(&phrase(value, Prefix::Keep))
}

#[cfg(test)]
mod tests {
    use super::*;
    use plainspec_patterns::{EnumType, StepKind};

    fn step(kind: StepKind, text: &str) -> Step {
        Step {
            kind,
            text: text.into(),
            block: None,
        }
    }

    #[test]
    fn coerces_ordinal_free_integers() {
        let param = Param::new("count", ParamType::int());
        assert_eq!(coerce(&param, "-12").ok(), Some(ArgValue::Int(-12)));
    }

    #[test]
    fn null_token_requires_a_nullable_parameter() {
        let nullable = Param::new("count", ParamType::nullable_int());
        assert_eq!(coerce(&nullable, "null").ok(), Some(ArgValue::Null));
        let strict = Param::new("count", ParamType::int());
        assert!(coerce(&strict, "null").is_err());
    }

    #[test]
    fn enum_values_match_loosely() {
        let colour = EnumType {
            name: "Colour",
            values: &["Red", "BlueGreen"],
        };
        let param = Param::new("colour", ParamType::Enum(colour));
        assert_eq!(
            coerce(&param, "blue green").ok(),
            Some(ArgValue::Enum("BlueGreen".into()))
        );
        assert!(coerce(&param, "purple").is_err());
    }

    #[test]
    fn kind_filter_excludes_other_kinds() {
        let mut registry = DefinitionRegistry::new();
        registry.register("Given_a_user", StepKind::Given, Vec::new(), |_| Ok(()));
        let mut verifier = Verifier::new(&registry);
        assert!(matches!(
            verifier.match_step(&step(StepKind::Given, "Given a user")),
            MatchOutcome::Bound(..)
        ));
        assert!(matches!(
            verifier.match_step(&step(StepKind::When, "When a user")),
            MatchOutcome::Undefined
        ));
    }
}
