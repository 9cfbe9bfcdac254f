//! Inline parameter types and the pattern generators that match them.
//!
//! Each generator declares which [`ParamType`]s it handles and produces a
//! named capture-group fragment for them. The catalogue resolves a type by
//! trying its generators in order and using the first that claims it, so
//! hosts can extend matching by pushing their own generators.

use std::fmt;

use crate::errors::PatternBuildError;
use crate::phrase::{Prefix, phrase};

/// Description of an enumeration parameter type.
///
/// Matching does not inspect host types, so the enumeration's value
/// identifiers are declared explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumType {
    /// Name of the enumeration, used in diagnostics.
    pub name: &'static str,
    /// Identifiers of the enumeration's values.
    pub values: &'static [&'static str],
}

/// Declared type of a step-definition parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// A signed integer, optionally written with an ordinal suffix.
    Int {
        /// Whether the literal token `null` is also accepted.
        nullable: bool,
    },
    /// A decimal number, optionally written with an ordinal suffix.
    Float {
        /// Whether the literal token `null` is also accepted.
        nullable: bool,
    },
    /// Free text, matched lazily.
    Text,
    /// One of a declared enumeration's values.
    Enum(EnumType),
    /// A host type the inline catalogue cannot match. Definitions declaring
    /// one can never match any step.
    Opaque(&'static str),
    /// A key/value form block attached to the step; never matched inline.
    Form,
    /// A tabular grid block attached to the step; never matched inline.
    Grid,
}

impl ParamType {
    /// Shorthand for a non-nullable integer parameter.
    #[must_use]
    pub const fn int() -> Self {
        Self::Int { nullable: false }
    }

    /// Shorthand for an integer parameter that accepts `null`.
    #[must_use]
    pub const fn nullable_int() -> Self {
        Self::Int { nullable: true }
    }

    /// Shorthand for a non-nullable decimal parameter.
    #[must_use]
    pub const fn float() -> Self {
        Self::Float { nullable: false }
    }

    /// Shorthand for a decimal parameter that accepts `null`.
    #[must_use]
    pub const fn nullable_float() -> Self {
        Self::Float { nullable: true }
    }

    /// Whether values of this type are captured from the step text rather
    /// than bound from an attached block.
    #[must_use]
    pub const fn is_inline(&self) -> bool {
        !matches!(self, Self::Form | Self::Grid)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int { nullable: false } => f.write_str("int"),
            Self::Int { nullable: true } => f.write_str("nullable int"),
            Self::Float { nullable: false } => f.write_str("float"),
            Self::Float { nullable: true } => f.write_str("nullable float"),
            Self::Text => f.write_str("text"),
            Self::Enum(e) => write!(f, "enum {}", e.name),
            Self::Opaque(name) => write!(f, "opaque {name}"),
            Self::Form => f.write_str("form"),
            Self::Grid => f.write_str("grid"),
        }
    }
}

/// A named, typed parameter of a step definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    /// Parameter name; inline parameters must appear as a phrase word.
    pub name: &'static str,
    /// Declared parameter type.
    pub ty: ParamType,
}

impl Param {
    /// Create a parameter descriptor.
    #[must_use]
    pub const fn new(name: &'static str, ty: ParamType) -> Self {
        Self { name, ty }
    }
}

/// Capability implemented by each inline pattern generator.
pub trait InlinePattern {
    /// Whether this generator produces fragments for `ty`.
    fn handles(&self, ty: &ParamType) -> bool;

    /// Produce a named capture-group fragment for `ty`.
    ///
    /// Only called for types the generator [`handles`](Self::handles).
    fn fragment(&self, ty: &ParamType, group: &str) -> String;
}

struct IntPattern;

impl InlinePattern for IntPattern {
    fn handles(&self, ty: &ParamType) -> bool {
        matches!(ty, ParamType::Int { .. })
    }

    fn fragment(&self, ty: &ParamType, group: &str) -> String {
        if matches!(ty, ParamType::Int { nullable: true }) {
            format!(r"(?P<{group}>(?:-?\d+)|(?:null))(?:st|nd|rd|th)?")
        } else {
            format!(r"(?P<{group}>-?\d+)(?:st|nd|rd|th)?")
        }
    }
}

struct FloatPattern;

impl InlinePattern for FloatPattern {
    fn handles(&self, ty: &ParamType) -> bool {
        matches!(ty, ParamType::Float { .. })
    }

    fn fragment(&self, ty: &ParamType, group: &str) -> String {
        if matches!(ty, ParamType::Float { nullable: true }) {
            format!(r"(?P<{group}>(?:-?\d+(?:\.\d+)?)|(?:null))(?:st|nd|rd|th)?")
        } else {
            format!(r"(?P<{group}>-?\d+(?:\.\d+)?)(?:st|nd|rd|th)?")
        }
    }
}

struct EnumPattern;

impl InlinePattern for EnumPattern {
    fn handles(&self, ty: &ParamType) -> bool {
        matches!(ty, ParamType::Enum(_))
    }

    fn fragment(&self, ty: &ParamType, group: &str) -> String {
        let ParamType::Enum(e) = ty else {
            return format!(r"(?P<{group}>.+?)");
        };
        let alternatives: Vec<String> = e
            .values
            .iter()
            .map(|value| {
                let spaced = phrase(value, Prefix::Keep);
                let loose: Vec<String> = spaced.split_whitespace().map(regex::escape).collect();
                format!("(?:{})", loose.join(r"\s*"))
            })
            .collect();
        format!("(?P<{group}>{})", alternatives.join("|"))
    }
}

struct TextPattern;

impl InlinePattern for TextPattern {
    fn handles(&self, ty: &ParamType) -> bool {
        matches!(ty, ParamType::Text)
    }

    fn fragment(&self, _ty: &ParamType, group: &str) -> String {
        format!(r"(?P<{group}>.+?)")
    }
}

/// Ordered set of inline pattern generators, resolved by first match.
pub struct InlineCatalogue {
    generators: Vec<Box<dyn InlinePattern>>,
}

impl InlineCatalogue {
    /// Catalogue with the built-in generators: int, float, enum, text.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            generators: vec![
                Box::new(IntPattern),
                Box::new(FloatPattern),
                Box::new(EnumPattern),
                Box::new(TextPattern),
            ],
        }
    }

    /// Append a host-supplied generator, consulted after the built-ins.
    pub fn push(&mut self, generator: Box<dyn InlinePattern>) {
        self.generators.push(generator);
    }

    /// Whether any generator handles `ty`.
    #[must_use]
    pub fn supports(&self, ty: &ParamType) -> bool {
        self.generators.iter().any(|g| g.handles(ty))
    }

    /// Produce the capture fragment for `param`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternBuildError::UnsupportedType`] when no generator
    /// handles the parameter's type.
    pub fn fragment_for(&self, param: &Param) -> Result<String, PatternBuildError> {
        self.generators
            .iter()
            .find(|g| g.handles(&param.ty))
            .map(|g| g.fragment(&param.ty, param.name))
            .ok_or_else(|| PatternBuildError::UnsupportedType {
                name: param.name.to_string(),
                ty: param.ty.to_string(),
            })
    }
}

impl Default for InlineCatalogue {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(param: &Param) -> String {
        match InlineCatalogue::standard().fragment_for(param) {
            Ok(fragment) => fragment,
            Err(err) => panic!("fragment should build: {err}"),
        }
    }

    #[test]
    fn int_fragment_keeps_ordinal_suffix_outside_the_group() {
        let param = Param::new("count", ParamType::int());
        assert_eq!(fragment(&param), r"(?P<count>-?\d+)(?:st|nd|rd|th)?");
    }

    #[test]
    fn nullable_int_fragment_accepts_null() {
        let param = Param::new("count", ParamType::nullable_int());
        assert!(fragment(&param).contains("null"));
    }

    #[test]
    fn enum_fragment_spaces_multi_word_values_loosely() {
        let colour = EnumType {
            name: "Colour",
            values: &["Red", "BlueGreen"],
        };
        let param = Param::new("colour", ParamType::Enum(colour));
        assert_eq!(fragment(&param), r"(?P<colour>(?:Red)|(?:Blue\s*Green))");
    }

    #[test]
    fn form_and_grid_are_not_inline() {
        let catalogue = InlineCatalogue::standard();
        assert!(!catalogue.supports(&ParamType::Form));
        assert!(!catalogue.supports(&ParamType::Grid));
        assert!(catalogue.fragment_for(&Param::new("data", ParamType::Grid)).is_err());
    }

    #[test]
    fn opaque_types_are_unsupported() {
        let catalogue = InlineCatalogue::standard();
        let param = Param::new("conn", ParamType::Opaque("Connection"));
        assert!(matches!(
            catalogue.fragment_for(&param),
            Err(PatternBuildError::UnsupportedType { .. })
        ));
    }
}
