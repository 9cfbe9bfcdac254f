//! The line-oriented document parser.
//!
//! A single pass over the significant lines drives an explicit state
//! machine: outside any scenario, collecting a feature description, or
//! inside a scenario appending steps. Keyword patterns are compiled once per
//! parser from the resolved keyword set, so localised documents parse with
//! the same machinery as English ones.

use plainspec_patterns::StepKind;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::block::{self, Block, Form, Grid};
use crate::config;
use crate::localisation::KeywordSet;
use crate::model::{Feature, Scenario, SpecificationDocument, Step};
use crate::text::{self, Line};

/// Structural errors that abort the whole document parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An "And" step appeared before any given/when/then step.
    #[error("line {line}: \"And\" steps cannot appear before given, when, or then steps")]
    ConjunctionBeforeStep {
        /// 1-based line number of the offending line.
        line: usize,
    },
    /// A step line appeared before any scenario was opened.
    #[error("line {line}: steps cannot appear before a scenario is started")]
    StepOutsideScenario {
        /// 1-based line number of the offending line.
        line: usize,
    },
    /// A line matched none of the keyword patterns.
    #[error("line {line}: unrecognised step: \"{text}\"")]
    UnrecognisedStep {
        /// 1-based line number of the offending line.
        line: usize,
        /// The offending line text.
        text: String,
    },
    /// A grid data row's cell count differs from its header row's.
    #[error("line {line}: grid row has {actual} cell(s) but the header declares {expected}")]
    UnevenGridRow {
        /// 1-based line number of the offending row.
        line: usize,
        /// Cell count declared by the header row.
        expected: usize,
        /// Cell count found on the offending row.
        actual: usize,
    },
}

/// Parse a document, discovering its language from the text.
///
/// Without a `# language:` directive the configured default language is
/// used (see [`crate::config::default_language`]).
///
/// # Errors
///
/// Returns [`ParseError`] on the first structural error.
///
/// # Examples
///
/// ```
/// use plainspec::parser::parse;
///
/// let doc = parse("Scenario: Smoke\nGiven a user\n")
///     .unwrap_or_else(|err| panic!("document should parse: {err}"));
/// assert_eq!(doc.scenarios.len(), 1);
/// ```
pub fn parse(text: &str) -> Result<SpecificationDocument, ParseError> {
    let language = text::discover_language(text).unwrap_or_else(config::default_language);
    DocumentParser::for_language(&language).parse(text)
}

/// Parser for one language's keyword set.
#[derive(Debug)]
pub struct DocumentParser {
    language: String,
    feature: Regex,
    scenario: Regex,
    given: Regex,
    when: Regex,
    then: Regex,
    and: Regex,
}

impl DocumentParser {
    /// Build a parser from a language code, resolving embedded keywords.
    #[must_use]
    pub fn for_language(code: &str) -> Self {
        Self::with_keywords(&KeywordSet::for_language(code), code)
    }

    /// Build a parser from an explicit keyword set.
    ///
    /// `language` is recorded on parsed documents; it does not affect the
    /// keywords used.
    #[must_use]
    pub fn with_keywords(keywords: &KeywordSet, language: &str) -> Self {
        Self {
            language: language.to_string(),
            feature: header_regex(&keywords.feature),
            scenario: header_regex(&keywords.scenario),
            given: step_regex(&keywords.given),
            when: step_regex(&keywords.when),
            then: step_regex(&keywords.then),
            and: step_regex(&keywords.and),
        }
    }

    /// Parse raw document text into a [`SpecificationDocument`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] on the first structural error.
    pub fn parse(&self, text: &str) -> Result<SpecificationDocument, ParseError> {
        Session::new(self, text::lines(text)).run()
    }

    fn header_name<'t>(&self, regex: &Regex, line: &'t str) -> Option<&'t str> {
        regex
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
    }

    fn classify_step(&self, line: &str) -> Option<StepLine> {
        if self.given.is_match(line) {
            Some(StepLine::Concrete(StepKind::Given))
        } else if self.when.is_match(line) {
            Some(StepLine::Concrete(StepKind::When))
        } else if self.then.is_match(line) {
            Some(StepLine::Concrete(StepKind::Then))
        } else if self.and.is_match(line) {
            Some(StepLine::Conjunction)
        } else {
            None
        }
    }
}

/// Classification of a line that matched a step keyword.
enum StepLine {
    Concrete(StepKind),
    Conjunction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NoScenario,
    InFeatureDescription,
    InScenario,
}

struct PendingFeature {
    name: String,
    description: Vec<String>,
}

struct Session<'p> {
    parser: &'p DocumentParser,
    lines: Vec<Line>,
    index: usize,
    state: State,
    feature: Option<Feature>,
    pending_feature: Option<PendingFeature>,
    scenarios: Vec<Scenario>,
    current: Option<Scenario>,
    current_kind: Option<StepKind>,
}

impl<'p> Session<'p> {
    fn new(parser: &'p DocumentParser, lines: Vec<Line>) -> Self {
        Self {
            parser,
            lines,
            index: 0,
            state: State::NoScenario,
            feature: None,
            pending_feature: None,
            scenarios: Vec::new(),
            current: None,
            current_kind: None,
        }
    }

    fn run(mut self) -> Result<SpecificationDocument, ParseError> {
        while let Some(line) = self.lines.get(self.index).cloned() {
            match self.state {
                State::NoScenario => self.handle_no_scenario(&line)?,
                State::InFeatureDescription => self.handle_description(&line)?,
                State::InScenario => self.handle_in_scenario(&line)?,
            }
            self.index += 1;
        }
        self.finish_feature();
        self.close_scenario();
        Ok(SpecificationDocument {
            feature: self.feature,
            scenarios: self.scenarios,
            language: self.parser.language.clone(),
        })
    }

    fn handle_no_scenario(&mut self, line: &Line) -> Result<(), ParseError> {
        if let Some(name) = self.parser.header_name(&self.parser.feature, &line.text) {
            self.start_feature(name);
            return Ok(());
        }
        if let Some(name) = self.parser.header_name(&self.parser.scenario, &line.text) {
            self.open_scenario(name);
            return Ok(());
        }
        match self.parser.classify_step(&line.text) {
            Some(StepLine::Conjunction) => {
                Err(ParseError::ConjunctionBeforeStep { line: line.number })
            }
            Some(StepLine::Concrete(_)) => {
                Err(ParseError::StepOutsideScenario { line: line.number })
            }
            None => Err(ParseError::UnrecognisedStep {
                line: line.number,
                text: line.text.clone(),
            }),
        }
    }

    fn handle_description(&mut self, line: &Line) -> Result<(), ParseError> {
        if let Some(name) = self.parser.header_name(&self.parser.scenario, &line.text) {
            self.finish_feature();
            self.open_scenario(name);
            return Ok(());
        }
        if let Some(pending) = self.pending_feature.as_mut() {
            pending.description.push(line.text.clone());
        }
        Ok(())
    }

    fn handle_in_scenario(&mut self, line: &Line) -> Result<(), ParseError> {
        if let Some(name) = self.parser.header_name(&self.parser.scenario, &line.text) {
            self.open_scenario(name);
            return Ok(());
        }
        if let Some(name) = self.parser.header_name(&self.parser.feature, &line.text) {
            self.close_scenario();
            self.start_feature(name);
            return Ok(());
        }
        let kind = match self.parser.classify_step(&line.text) {
            Some(StepLine::Concrete(kind)) => {
                self.current_kind = Some(kind);
                kind
            }
            Some(StepLine::Conjunction) => self
                .current_kind
                .ok_or(ParseError::ConjunctionBeforeStep { line: line.number })?,
            None => {
                return Err(ParseError::UnrecognisedStep {
                    line: line.number,
                    text: line.text.clone(),
                });
            }
        };
        let (block, consumed) = self.parse_block(self.index + 1)?;
        if let Some(scenario) = self.current.as_mut() {
            scenario.steps.push(Step {
                kind,
                text: line.text.clone(),
                block,
            });
        }
        self.index += consumed;
        Ok(())
    }

    /// Parse the form or grid beginning at `start`, if any. Forms take
    /// precedence: a run of two-cell rows is a form, any other row shape
    /// opens a grid. Returns the block and the number of lines consumed.
    fn parse_block(&self, start: usize) -> Result<(Option<Block>, usize), ParseError> {
        let Some(first) = self.lines.get(start) else {
            return Ok((None, 0));
        };
        let Some(first_cells) = block::cells(&first.text) else {
            return Ok((None, 0));
        };

        if first_cells.len() == 2 {
            let mut entries = Vec::new();
            let mut consumed = 0;
            while let Some(line) = self.lines.get(start + consumed) {
                let Some(cells) = block::cells(&line.text) else {
                    break;
                };
                if cells.len() != 2 {
                    break;
                }
                let mut cells = cells.into_iter();
                if let (Some(name), Some(value)) = (cells.next(), cells.next()) {
                    entries.push((name, value));
                }
                consumed += 1;
            }
            return Ok((Some(Block::Form(Form::new(entries))), consumed));
        }

        let columns = first_cells;
        let mut rows = Vec::new();
        let mut consumed = 1;
        while let Some(line) = self.lines.get(start + consumed) {
            let Some(cells) = block::cells(&line.text) else {
                break;
            };
            if cells.len() != columns.len() {
                return Err(ParseError::UnevenGridRow {
                    line: line.number,
                    expected: columns.len(),
                    actual: cells.len(),
                });
            }
            rows.push(cells);
            consumed += 1;
        }
        Ok((Some(Block::Grid(Grid::new(columns, rows))), consumed))
    }

    fn start_feature(&mut self, name: &str) {
        self.pending_feature = Some(PendingFeature {
            name: name.to_string(),
            description: Vec::new(),
        });
        self.state = State::InFeatureDescription;
    }

    fn finish_feature(&mut self) {
        if let Some(pending) = self.pending_feature.take() {
            self.feature = Some(Feature::new(
                pending.name,
                pending.description.join("\n"),
            ));
        }
    }

    fn open_scenario(&mut self, name: &str) {
        self.close_scenario();
        self.current = Some(Scenario {
            name: name.to_string(),
            steps: Vec::new(),
        });
        self.current_kind = None;
        self.state = State::InScenario;
    }

    fn close_scenario(&mut self) {
        if let Some(scenario) = self.current.take() {
            self.scenarios.push(scenario);
        }
    }
}

fn header_regex(keyword: &str) -> Regex {
    compile_ci(&format!(
        r"^\s*{}\s*\d*\s*:\s*(.+)",
        regex::escape(keyword)
    ))
}

fn step_regex(keyword: &str) -> Regex {
    compile_ci(&format!(r"^\s*(?:{})\s+.+", regex::escape(keyword)))
}

/// Keyword sources are escaped, so compilation only fails if the resource
/// strings are corrupt.
fn compile_ci(source: &str) -> Regex {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|error| panic!("keyword regex failed to compile: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(text: &str) -> SpecificationDocument {
        match parse(text) {
            Ok(doc) => doc,
            Err(err) => panic!("document should parse: {err}"),
        }
    }

    #[test]
    fn captures_feature_name_and_description() {
        let doc = parse_ok(
            "Feature: Login\nUsers authenticate with a password.\n\nScenario: Smoke\nGiven a user\n",
        );
        let feature = doc.feature.unwrap_or_else(|| panic!("feature expected"));
        assert_eq!(feature.name, "Login");
        assert_eq!(feature.description, "Users authenticate with a password.");
    }

    #[test]
    fn scenario_headers_tolerate_numeric_suffixes() {
        let doc = parse_ok("Scenario 2: Second attempt\nGiven a user\n");
        assert_eq!(
            doc.scenarios.first().map(|s| s.name.as_str()),
            Some("Second attempt")
        );
    }

    #[test]
    fn conjunction_before_any_step_is_rejected() {
        let err = parse("Scenario: Broken\nAnd something\n");
        assert_eq!(err, Err(ParseError::ConjunctionBeforeStep { line: 2 }));
    }

    #[test]
    fn step_before_any_scenario_is_rejected() {
        let err = parse("Given a user\n");
        assert_eq!(err, Err(ParseError::StepOutsideScenario { line: 1 }));
    }

    #[test]
    fn noise_inside_a_scenario_is_rejected() {
        let err = parse("Scenario: Broken\nGiven a user\nnot a step\n");
        assert_eq!(
            err,
            Err(ParseError::UnrecognisedStep {
                line: 3,
                text: "not a step".into()
            })
        );
    }

    #[test]
    fn form_attaches_to_the_preceding_step() {
        let doc = parse_ok(
            "Scenario: Forms\nGiven a user\n| Name | Ada |\n| Role | admin |\nThen done\n",
        );
        let steps = &doc.scenarios.first().unwrap_or_else(|| panic!("scenario")).steps;
        let Some(Block::Form(form)) = steps.first().and_then(|s| s.block.as_ref()) else {
            panic!("expected a form block");
        };
        assert_eq!(form.value("name"), Some("Ada"));
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn grid_rows_must_match_the_header_width() {
        let err = parse(
            "Scenario: Grids\nGiven users\n| name | role | age |\n| Ada | admin |\n",
        );
        assert_eq!(
            err,
            Err(ParseError::UnevenGridRow {
                line: 4,
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn block_detection_also_follows_conjunction_steps() {
        let doc = parse_ok(
            "Scenario: Blocks\nGiven a user\nAnd these users\n| name | role | age |\n| Ada | admin | 36 |\n",
        );
        let steps = &doc.scenarios.first().unwrap_or_else(|| panic!("scenario")).steps;
        let second = steps.get(1).unwrap_or_else(|| panic!("second step"));
        assert_eq!(second.kind, StepKind::Given);
        assert!(matches!(second.block, Some(Block::Grid(_))));
    }
}
