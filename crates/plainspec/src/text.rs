//! Raw text preparation: comment stripping and language discovery.

use std::sync::LazyLock;

use regex::Regex;

/// One significant line of a specification document.
///
/// Carries the 1-based line number from the original text so parse errors
/// can point at the author's file, not at the filtered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number in the raw input.
    pub number: usize,
    /// The trimmed line text.
    pub text: String,
}

static LANGUAGE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)#\s*language\s*:\s*(\S+)")
        .unwrap_or_else(|error| panic!("language directive regex failed to compile: {error}"))
});

/// Extract the ordered significant lines of `text`.
///
/// Blank lines and comment lines (first non-whitespace character `#`) are
/// dropped; the survivors are trimmed and keep their original line numbers.
///
/// # Examples
///
/// ```
/// use plainspec::text::lines;
///
/// let lines = lines("# a comment\n\n  Feature: Login\n");
/// assert_eq!(lines.len(), 1);
/// assert_eq!(lines.first().map(|l| l.number), Some(3));
/// ```
#[must_use]
pub fn lines(text: &str) -> Vec<Line> {
    text.lines()
        .enumerate()
        .filter_map(|(offset, raw)| {
            let trimmed = raw.trim();
            (!trimmed.is_empty() && !trimmed.starts_with('#')).then(|| Line {
                number: offset + 1,
                text: trimmed.to_string(),
            })
        })
        .collect()
}

/// Find the language code declared by a `# language: <code>` directive.
///
/// The directive may appear anywhere in the text and is matched
/// case-insensitively. Returns `None` when no directive is present; callers
/// fall back to the configured default.
///
/// # Examples
///
/// ```
/// use plainspec::text::discover_language;
///
/// assert_eq!(discover_language("# language: fr\n"), Some("fr".to_string()));
/// assert_eq!(discover_language("Feature: Login\n"), None);
/// ```
#[must_use]
pub fn discover_language(text: &str) -> Option<String> {
    LANGUAGE_DIRECTIVE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
