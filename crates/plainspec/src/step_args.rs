//! Typed argument values handed to step definition handlers.

use std::error::Error;
use std::fmt;

use crate::block::{Form, Grid};

/// A coerced argument value extracted from step text or a block.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// A parsed integer.
    Int(i64),
    /// A parsed decimal number.
    Float(f64),
    /// Free text captured from the step line.
    Text(String),
    /// The canonical identifier of a matched enumeration value.
    Enum(String),
    /// The literal `null` token on a nullable parameter.
    Null,
    /// A form block bound to the step.
    Form(Form),
    /// A grid block bound to the step.
    Grid(Grid),
}

impl ArgValue {
    /// The integer value, if this is an [`ArgValue::Int`].
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The decimal value, if this is an [`ArgValue::Float`].
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// The text, if this is an [`ArgValue::Text`] or [`ArgValue::Enum`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) | Self::Enum(value) => Some(value),
            _ => None,
        }
    }

    /// The form, if this is an [`ArgValue::Form`].
    #[must_use]
    pub fn as_form(&self) -> Option<&Form> {
        match self {
            Self::Form(form) => Some(form),
            _ => None,
        }
    }

    /// The grid, if this is an [`ArgValue::Grid`].
    #[must_use]
    pub fn as_grid(&self) -> Option<&Grid> {
        match self {
            Self::Grid(grid) => Some(grid),
            _ => None,
        }
    }

    /// Whether this is the [`ArgValue::Null`] token.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// The named, ordered arguments extracted for one step invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepArgs {
    values: Vec<(String, ArgValue)>,
}

impl StepArgs {
    /// Create the argument set from named values in declaration order.
    #[must_use]
    pub fn new(values: Vec<(String, ArgValue)>) -> Self {
        Self { values }
    }

    /// Look up an argument by parameter name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Look up an argument by declaration position.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&ArgValue> {
        self.values.get(index).map(|(_, value)| value)
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the step received no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Failure raised by a step definition handler.
///
/// A handler failure aborts the current scenario; remaining steps in it are
/// recorded as skipped, and later scenarios still run.
#[derive(Debug)]
pub struct StepFailure {
    message: String,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl StepFailure {
    /// Create a failure with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a failure wrapping an underlying error.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for StepFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn Error + 'static))
    }
}
