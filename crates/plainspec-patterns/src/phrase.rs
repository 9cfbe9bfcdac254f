//! Phrase normalisation for step-definition identifiers.
//!
//! Step definitions are named like methods (`Given_a_registered_user` or
//! `GivenARegisteredUser`). The matcher needs the human-readable phrase those
//! identifiers encode, so the splitter prefers explicit underscores and falls
//! back to uppercase boundaries when an identifier carries none.

use crate::kind::StepKind;

/// Controls whether a leading given/when/then word is removed from a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// Keep the leading keyword word in the phrase.
    Keep,
    /// Remove a leading given/when/then word and lowercase the remainder.
    Strip,
}

/// Convert a step-definition identifier into a spaced phrase.
///
/// Identifiers containing underscores are split on runs of underscores after
/// trimming leading and trailing ones; all other identifiers are split before
/// each uppercase letter except the first character. With [`Prefix::Strip`]
/// a leading given/when/then word is removed (case-insensitively) and the
/// result is lowercased.
///
/// # Examples
///
/// ```
/// use plainspec_patterns::{Prefix, phrase};
///
/// assert_eq!(phrase("Given_a_user", Prefix::Keep), "Given a user");
/// assert_eq!(phrase("GivenAUser", Prefix::Keep), "Given A User");
/// assert_eq!(phrase("When_something_happens", Prefix::Strip), "something happens");
/// ```
#[must_use]
pub fn phrase(identifier: &str, prefix: Prefix) -> String {
    let words = if identifier.contains('_') {
        identifier
            .trim_matches('_')
            .split('_')
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        split_uppercase_boundaries(identifier)
    };
    let joined = words.join(" ");
    match prefix {
        Prefix::Keep => joined,
        Prefix::Strip => strip_keyword_word(&joined).to_lowercase(),
    }
}

/// Report whether an identifier names a step definition.
///
/// True when the identifier starts with given/when/then (the first letter in
/// either case, the rest lowercase) followed by an underscore or an uppercase
/// letter.
///
/// # Examples
///
/// ```
/// use plainspec_patterns::looks_like_step_definition;
///
/// assert!(looks_like_step_definition("given_a_user"));
/// assert!(looks_like_step_definition("WhenSomethingHappens"));
/// assert!(!looks_like_step_definition("helper_for_tests"));
/// assert!(!looks_like_step_definition("givenness_is_not_a_step"));
/// ```
#[must_use]
pub fn looks_like_step_definition(identifier: &str) -> bool {
    ["given", "when", "then"].iter().any(|keyword| {
        strip_keyword_prefix(identifier, keyword).is_some_and(|rest| {
            rest.starts_with('_') || rest.chars().next().is_some_and(char::is_uppercase)
        })
    })
}

/// Suggest a step-definition identifier for an unmatched step line.
///
/// The step text includes its (possibly localised) keyword word, which is
/// replaced by the canonical keyword of the resolved kind. Characters outside
/// `[A-Za-z0-9_]` are dropped from the remaining words.
///
/// # Examples
///
/// ```
/// use plainspec_patterns::{StepKind, suggest_identifier};
///
/// assert_eq!(
///     suggest_identifier(StepKind::When, "When the user logs in!"),
///     "When_the_user_logs_in",
/// );
/// ```
#[must_use]
pub fn suggest_identifier(kind: StepKind, text: &str) -> String {
    let mut parts = vec![kind.as_str().to_string()];
    for word in text.split_whitespace().skip(1) {
        let clean: String = word
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        if !clean.is_empty() {
            parts.push(clean);
        }
    }
    parts.join("_")
}

fn split_uppercase_boundaries(identifier: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for (index, ch) in identifier.chars().enumerate() {
        if ch.is_uppercase() && index != 0 {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Remove one leading given/when/then word, matching only when a space
/// follows it so bare keywords survive intact.
fn strip_keyword_word(text: &str) -> &str {
    if let Some((first, rest)) = text.split_once(' ') {
        for keyword in ["given", "when", "then"] {
            if first.eq_ignore_ascii_case(keyword) {
                return rest;
            }
        }
    }
    text
}

/// Strip a keyword whose first letter may be either case but whose remaining
/// letters must be exact lowercase, mirroring the definition tester.
fn strip_keyword_prefix<'a>(identifier: &'a str, keyword: &str) -> Option<&'a str> {
    let mut chars = identifier.chars();
    let first = chars.next()?;
    let mut keyword_chars = keyword.chars();
    let keyword_first = keyword_chars.next()?;
    if first.to_ascii_lowercase() != keyword_first {
        return None;
    }
    chars.as_str().strip_prefix(keyword_chars.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Given_a_user", "Given a user")]
    #[case("GivenAUser", "Given A User")]
    #[case("__trimmed_edges__", "trimmed edges")]
    #[case("double__underscores", "double underscores")]
    #[case("single", "single")]
    fn splits_identifiers_into_words(#[case] identifier: &str, #[case] expected: &str) {
        assert_eq!(phrase(identifier, Prefix::Keep), expected);
    }

    #[rstest]
    #[case("When_something_happens", "something happens")]
    #[case("then_The_Outcome_Holds", "the outcome holds")]
    #[case("GivenAUser", "a user")]
    #[case("no_prefix_here", "no prefix here")]
    fn strips_prefixes(#[case] identifier: &str, #[case] expected: &str) {
        assert_eq!(phrase(identifier, Prefix::Strip), expected);
    }

    #[test]
    fn bare_keyword_is_not_stripped() {
        assert_eq!(phrase("Given", Prefix::Strip), "given");
    }

    #[rstest]
    #[case("given_a_user", true)]
    #[case("Given_a_user", true)]
    #[case("WhenSomethingHappens", true)]
    #[case("thenOutcome", true)]
    #[case("then_outcome", true)]
    #[case("givenness_is_not_a_step", false)]
    #[case("setup_helper", false)]
    fn recognises_step_definitions(#[case] identifier: &str, #[case] expected: bool) {
        assert_eq!(looks_like_step_definition(identifier), expected);
    }

    #[test]
    fn suggestion_uses_canonical_keyword() {
        assert_eq!(
            suggest_identifier(StepKind::Given, "Soit un utilisateur"),
            "Given_un_utilisateur",
        );
    }
}
