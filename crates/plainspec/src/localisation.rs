//! Localised keyword resolution backed by embedded Fluent resources.
//!
//! Each shipped language contributes a `plainspec.ftl` file with the six
//! keyword messages. Unknown or unparsable language codes fall back to
//! English, mirroring the behaviour documents rely on when their directive
//! names a language the toolchain does not ship.

use i18n_embed::fluent::{FluentLanguageLoader, fluent_language_loader};
use rust_embed::RustEmbed;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "i18n"]
struct Localisations;

/// The six keyword strings a document parser is compiled from.
///
/// Normally resolved from the embedded resources via
/// [`for_language`](Self::for_language), but hosts may construct one directly
/// to supply their own keyword table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    /// Keyword opening a feature header line.
    pub feature: String,
    /// Keyword opening a scenario header line.
    pub scenario: String,
    /// Keyword opening a precondition step.
    pub given: String,
    /// Keyword opening an action step.
    pub when: String,
    /// Keyword opening an assertion step.
    pub then: String,
    /// Keyword continuing the previous step's kind.
    pub and: String,
}

impl KeywordSet {
    /// Resolve the keyword set for a language code such as `"en"` or `"fr"`.
    ///
    /// Codes that do not parse as a language identifier, or that name a
    /// language without embedded resources, resolve to English.
    ///
    /// # Examples
    ///
    /// ```
    /// use plainspec::localisation::KeywordSet;
    ///
    /// assert_eq!(KeywordSet::for_language("fr").scenario, "Scénario");
    /// assert_eq!(KeywordSet::for_language("zz-unknown"), KeywordSet::english());
    /// ```
    #[must_use]
    pub fn for_language(code: &str) -> Self {
        let requested: Vec<LanguageIdentifier> = code
            .parse::<LanguageIdentifier>()
            .map(|id| vec![id])
            .unwrap_or_default();
        let loader = fluent_language_loader!();
        if i18n_embed::select(&loader, &Localisations, &requested).is_err() {
            return Self::fallback();
        }
        Self {
            feature: loader.get("keyword-feature"),
            scenario: loader.get("keyword-scenario"),
            given: loader.get("keyword-given"),
            when: loader.get("keyword-when"),
            then: loader.get("keyword-then"),
            and: loader.get("keyword-and"),
        }
    }

    /// The English keyword set.
    #[must_use]
    pub fn english() -> Self {
        Self::for_language("en")
    }

    /// The step keywords in given/when/then/and order, as borrowed strings.
    #[must_use]
    pub fn step_keywords(&self) -> [&str; 4] {
        [&self.given, &self.when, &self.then, &self.and]
    }

    /// Hard-coded English keywords, used only if resource selection fails.
    fn fallback() -> Self {
        Self {
            feature: "Feature".into(),
            scenario: "Scenario".into(),
            given: "Given".into(),
            when: "When".into(),
            then: "Then".into(),
            and: "And".into(),
        }
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn english_is_the_canonical_set() {
        let keywords = KeywordSet::english();
        assert_eq!(keywords.feature, "Feature");
        assert_eq!(keywords.step_keywords(), ["Given", "When", "Then", "And"]);
    }

    #[rstest]
    #[case("da", "Egenskab", "Givet")]
    #[case("de", "Funktionalität", "Angenommen")]
    #[case("fr", "Fonctionnalité", "Soit")]
    #[case("pt", "Funcionalidade", "Dado")]
    #[case("sv", "Egenskap", "Givet")]
    fn resolves_shipped_languages(
        #[case] code: &str,
        #[case] feature: &str,
        #[case] given: &str,
    ) {
        let keywords = KeywordSet::for_language(code);
        assert_eq!(keywords.feature, feature);
        assert_eq!(keywords.given, given);
    }

    #[rstest]
    #[case("zz")]
    #[case("not a code")]
    #[case("")]
    fn unknown_codes_fall_back_to_english(#[case] code: &str) {
        assert_eq!(KeywordSet::for_language(code), KeywordSet::english());
    }
}
