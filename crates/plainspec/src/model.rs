//! The parsed document model: features, scenarios, and steps.

use plainspec_patterns::StepKind;

use crate::block::Block;

/// A fully parsed specification document.
///
/// Immutable once parsing completes; verification only reads it. Structural
/// equality is derived so parsing the same text twice can be checked to
/// yield equal documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificationDocument {
    /// The optional feature header.
    pub feature: Option<Feature>,
    /// The scenarios in document order.
    pub scenarios: Vec<Scenario>,
    /// The language code the document was parsed with.
    pub language: String,
}

impl SpecificationDocument {
    /// Find a scenario by exact name.
    #[must_use]
    pub fn scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }
}

/// The top-level named specification unit with its free-text description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    /// The feature's name, captured from its header line.
    pub name: String,
    /// Free text between the feature line and the first scenario.
    pub description: String,
    headers: Vec<(String, String)>,
}

impl Feature {
    /// Create a feature, deriving header metadata from the description.
    ///
    /// Every description line of the shape `word: value` contributes a
    /// header keyed by the lowercased word. The line itself stays part of
    /// the description verbatim.
    #[must_use]
    pub fn new(name: String, description: String) -> Self {
        let headers = description
            .lines()
            .filter_map(|line| {
                let (key, value) = line.split_once(':')?;
                let key = key.trim();
                key.chars()
                    .all(|c| c.is_alphanumeric() || c == '_')
                    .then(|| (key.to_lowercase(), value.trim().to_string()))
            })
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self {
            name,
            description,
            headers,
        }
    }

    /// Look up a header value by its lowercased key.
    ///
    /// # Examples
    ///
    /// ```
    /// use plainspec::model::Feature;
    ///
    /// let feature = Feature::new("Login".into(), "Ignore: flaky on CI".into());
    /// assert_eq!(feature.header("ignore"), Some("flaky on CI"));
    /// assert_eq!(feature.header("owner"), None);
    /// ```
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == &key.to_lowercase())
            .map(|(_, v)| v.as_str())
    }
}

/// An ordered sequence of steps exercising one behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// The scenario's name, captured from its header line.
    pub name: String,
    /// The steps in document order, kinds already resolved.
    pub steps: Vec<Step>,
}

/// One resolved step line plus its optional tabular block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The resolved kind; conjunctions inherit the previous concrete kind.
    pub kind: StepKind,
    /// The raw matched line, keyword prefix included.
    pub text: String,
    /// The tabular block attached to this step, if any.
    pub block: Option<Block>,
}
