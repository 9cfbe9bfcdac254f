//! Aggregated verification results for a document.

use std::fmt;

/// The outcome of matching and running one step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
#[cfg_attr(feature = "diagnostics", serde(rename_all = "snake_case"))]
pub enum StepOutcome {
    /// The step matched a definition whose handler succeeded.
    Passed,
    /// No registered definition's pattern matched the step text.
    Undefined {
        /// A step-definition identifier that would match this step.
        suggestion: String,
    },
    /// A matched definition's invocation failed.
    Failed {
        /// The failure message, including binding failures.
        message: String,
    },
    /// The step was not attempted because an earlier step failed.
    Skipped,
}

/// One step's text and outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
pub struct StepRecord {
    /// The raw step line, keyword included.
    pub text: String,
    /// What happened to the step.
    pub outcome: StepOutcome,
}

/// The per-step outcomes for one scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
pub struct ScenarioResult {
    /// The scenario's name.
    pub name: String,
    /// Outcomes in step order.
    pub steps: Vec<StepRecord>,
}

impl ScenarioResult {
    /// Whether every step passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.steps
            .iter()
            .all(|step| step.outcome == StepOutcome::Passed)
    }
}

/// An undefined step surfaced for author feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndefinedStep<'a> {
    /// The raw step line that matched no definition.
    pub text: &'a str,
    /// A step-definition identifier that would match it.
    pub suggestion: &'a str,
}

/// A failed step surfaced with its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailedStep<'a> {
    /// The raw step line whose invocation failed.
    pub text: &'a str,
    /// The failure message.
    pub message: &'a str,
}

/// The aggregate outcome of one verification run.
///
/// A run fails only at the end: undefined steps and handler failures are
/// collected while remaining scenarios keep running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
pub struct VerificationReport {
    scenarios: Vec<ScenarioResult>,
}

impl VerificationReport {
    /// An empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one scenario's result.
    pub fn push(&mut self, result: ScenarioResult) {
        self.scenarios.push(result);
    }

    /// The per-scenario results in document order.
    #[must_use]
    pub fn scenarios(&self) -> &[ScenarioResult] {
        &self.scenarios
    }

    /// Whether every step of every scenario passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.scenarios.iter().all(ScenarioResult::passed)
    }

    /// Every undefined step across the run, with its suggested identifier.
    ///
    /// Undefined steps are reported even when the run otherwise passes,
    /// since they mean coverage silently did not happen.
    #[must_use]
    pub fn undefined_steps(&self) -> Vec<UndefinedStep<'_>> {
        self.scenarios
            .iter()
            .flat_map(|scenario| &scenario.steps)
            .filter_map(|step| match &step.outcome {
                StepOutcome::Undefined { suggestion } => Some(UndefinedStep {
                    text: &step.text,
                    suggestion,
                }),
                _ => None,
            })
            .collect()
    }

    /// Every failed step across the run, with its message.
    #[must_use]
    pub fn failures(&self) -> Vec<FailedStep<'_>> {
        self.scenarios
            .iter()
            .flat_map(|scenario| &scenario.steps)
            .filter_map(|step| match &step.outcome {
                StepOutcome::Failed { message } => Some(FailedStep {
                    text: &step.text,
                    message,
                }),
                _ => None,
            })
            .collect()
    }

    /// Serialise the report to JSON for external tooling.
    ///
    /// # Errors
    ///
    /// Returns the underlying serialisation error.
    #[cfg(feature = "diagnostics")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut passed_count = 0usize;
        for scenario in &self.scenarios {
            if scenario.passed() {
                passed_count += 1;
                writeln!(f, "scenario `{}`: passed", scenario.name)?;
                continue;
            }
            writeln!(f, "scenario `{}`: failed", scenario.name)?;
            for step in &scenario.steps {
                match &step.outcome {
                    StepOutcome::Undefined { suggestion } => {
                        writeln!(
                            f,
                            "  undefined: \"{}\" (no matching definition; try `{suggestion}`)",
                            step.text,
                        )?;
                    }
                    StepOutcome::Failed { message } => {
                        writeln!(f, "  failed: \"{}\" ({message})", step.text)?;
                    }
                    StepOutcome::Skipped => {
                        writeln!(f, "  skipped: \"{}\"", step.text)?;
                    }
                    StepOutcome::Passed => {}
                }
            }
        }
        write!(
            f,
            "{} scenario(s), {} passed, {} failed",
            self.scenarios.len(),
            passed_count,
            self.scenarios.len() - passed_count,
        )?;
        let undefined = self.undefined_steps().len();
        if undefined > 0 {
            write!(f, "; {undefined} undefined step(s)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> VerificationReport {
        let mut report = VerificationReport::new();
        report.push(ScenarioResult {
            name: "Valid login".into(),
            steps: vec![StepRecord {
                text: "Given a registered user".into(),
                outcome: StepOutcome::Passed,
            }],
        });
        report.push(ScenarioResult {
            name: "Broken".into(),
            steps: vec![
                StepRecord {
                    text: "When the user logs in".into(),
                    outcome: StepOutcome::Undefined {
                        suggestion: "When_the_user_logs_in".into(),
                    },
                },
                StepRecord {
                    text: "Then the session exists".into(),
                    outcome: StepOutcome::Failed {
                        message: "boom".into(),
                    },
                },
            ],
        });
        report
    }

    #[test]
    fn aggregates_undefined_and_failed_steps() {
        let report = sample_report();
        assert!(!report.passed());
        let undefined = report.undefined_steps();
        assert_eq!(
            undefined.first().map(|u| u.suggestion),
            Some("When_the_user_logs_in")
        );
        assert_eq!(report.failures().len(), 1);
    }

    #[test]
    fn display_names_every_problem_step() {
        let rendered = sample_report().to_string();
        assert!(rendered.contains("scenario `Valid login`: passed"));
        assert!(rendered.contains("try `When_the_user_logs_in`"));
        assert!(rendered.contains("failed: \"Then the session exists\" (boom)"));
        assert!(rendered.contains("2 scenario(s), 1 passed, 1 failed; 1 undefined step(s)"));
    }

    #[cfg(feature = "diagnostics")]
    #[test]
    fn serialises_to_json() {
        let json = match sample_report().to_json() {
            Ok(json) => json,
            Err(err) => panic!("report should serialise: {err}"),
        };
        assert!(json.contains("\"When_the_user_logs_in\""));
    }
}
