//! Assembly of a step definition's full matching pattern.
//!
//! The pattern is the definition's normalised phrase with each inline
//! parameter's word replaced by its capture fragment, anchored and prefixed
//! with an alternation of the localised step keywords so conjunction lines
//! match definitions of their inherited kind.

use regex::{Regex, RegexBuilder};

use crate::errors::PatternBuildError;
use crate::inline::{InlineCatalogue, Param};
use crate::phrase::{Prefix, phrase};

/// Keywords used when only validating a definition, where the alternation
/// never influences the outcome.
const VALIDATION_KEYWORDS: [&str; 4] = ["given", "when", "then", "and"];

/// Build the regular-expression source matching one step definition.
///
/// `step_keywords` is the localised given/when/then/and keyword set; the
/// resulting pattern accepts any of them so a conjunction line matches a
/// definition of the kind it inherits.
///
/// # Errors
///
/// Returns [`PatternBuildError`] when a parameter's type has no generator or
/// an inline parameter's name never appears in the phrase.
///
/// # Examples
///
/// ```
/// use plainspec_patterns::{InlineCatalogue, Param, ParamType, build_definition_regex};
///
/// let source = build_definition_regex(
///     "Given_the_user_has_count_items",
///     &[Param::new("count", ParamType::int())],
///     &InlineCatalogue::standard(),
///     &["given", "when", "then", "and"],
/// )
/// .unwrap_or_else(|err| panic!("pattern should build: {err}"));
/// assert!(source.contains(r"(?P<count>-?\d+)"));
/// ```
pub fn build_definition_regex(
    identifier: &str,
    params: &[Param],
    catalogue: &InlineCatalogue,
    step_keywords: &[&str],
) -> Result<String, PatternBuildError> {
    let phrase_text = phrase(identifier, Prefix::Strip);
    let inline: Vec<&Param> = params.iter().filter(|p| p.ty.is_inline()).collect();

    let mut placed: Vec<&str> = Vec::new();
    let mut body_parts: Vec<String> = Vec::new();
    for word in phrase_text.split_whitespace() {
        match inline.iter().find(|p| p.name.eq_ignore_ascii_case(word)) {
            Some(param) => {
                body_parts.push(catalogue.fragment_for(param)?);
                placed.push(param.name);
            }
            None => body_parts.push(regex::escape(word)),
        }
    }

    for param in &inline {
        if !placed.contains(&param.name) {
            // Report the more specific defect when the type itself is the
            // problem, even though the name is also absent.
            if !catalogue.supports(&param.ty) {
                return Err(PatternBuildError::UnsupportedType {
                    name: param.name.to_string(),
                    ty: param.ty.to_string(),
                });
            }
            return Err(PatternBuildError::UnplacedParameter {
                name: param.name.to_string(),
                phrase: phrase_text.clone(),
            });
        }
    }

    let alternation: Vec<String> = step_keywords.iter().map(|kw| regex::escape(kw)).collect();
    Ok(format!(
        r"^\s*(?:{})\s+{}\s*$",
        alternation.join("|"),
        body_parts.join(r"\s+"),
    ))
}

/// Build and compile the case-insensitive matching pattern for a definition.
///
/// # Errors
///
/// Returns [`PatternBuildError`] for the same reasons as
/// [`build_definition_regex`], or when the assembled source fails to compile.
pub fn compile_definition_regex(
    identifier: &str,
    params: &[Param],
    catalogue: &InlineCatalogue,
    step_keywords: &[&str],
) -> Result<Regex, PatternBuildError> {
    let source = build_definition_regex(identifier, params, catalogue, step_keywords)?;
    RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .map_err(PatternBuildError::from)
}

/// Check that a definition's pattern can be built, without compiling it for
/// any particular keyword set.
///
/// # Errors
///
/// Returns [`PatternBuildError`] when the definition can never match a step.
pub fn validate_definition(
    identifier: &str,
    params: &[Param],
    catalogue: &InlineCatalogue,
) -> Result<(), PatternBuildError> {
    build_definition_regex(identifier, params, catalogue, &VALIDATION_KEYWORDS).map(|_| ())
}
