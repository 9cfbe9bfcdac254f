//! Step definition registration.
//!
//! Definitions arrive either through explicit [`DefinitionRegistry::register`]
//! calls or through the [`step!`](crate::step) macro, which submits a static
//! registration gathered by [`DefinitionRegistry::from_inventory`]. The
//! registry never inspects host methods; callers declare the identifier,
//! kind, and parameter list themselves.

use plainspec_patterns::{InlineCatalogue, Param, StepKind, validate_definition};

use crate::step_args::{StepArgs, StepFailure};

/// Signature of a statically registered step handler.
pub type HandlerFn = fn(&StepArgs) -> Result<(), StepFailure>;

/// A step definition submitted to the global inventory by [`step!`](crate::step).
pub struct RegisteredDefinition {
    /// Method-like identifier the matching phrase derives from.
    pub identifier: &'static str,
    /// The step kind this definition answers.
    pub kind: StepKind,
    /// Constructor for the parameter list.
    pub params: fn() -> Vec<Param>,
    /// The handler invoked on a match.
    pub handler: HandlerFn,
    /// Source file of the registration.
    pub file: &'static str,
    /// Line number of the registration.
    pub line: u32,
}

inventory::collect!(RegisteredDefinition);

/// Register a step definition with the global inventory.
///
/// The macro hides the underlying `inventory` call and captures the source
/// location automatically.
///
/// # Examples
///
/// ```
/// use plainspec::{StepKind, step};
/// use plainspec::step_args::{StepArgs, StepFailure};
///
/// fn a_user(_args: &StepArgs) -> Result<(), StepFailure> {
///     Ok(())
/// }
///
/// step!(StepKind::Given, "Given_a_user", Vec::new, a_user);
/// ```
#[macro_export]
macro_rules! step {
    ($kind:expr, $identifier:expr, $params:expr, $handler:path) => {
        $crate::submit! {
            $crate::registry::RegisteredDefinition {
                identifier: $identifier,
                kind: $kind,
                params: $params,
                handler: $handler,
                file: file!(),
                line: line!(),
            }
        }
    };
}

/// One registered step definition with its invocable handler.
pub struct StepDefinition {
    identifier: String,
    kind: StepKind,
    params: Vec<Param>,
    handler: Box<dyn Fn(&StepArgs) -> Result<(), StepFailure>>,
}

impl StepDefinition {
    /// The definition's identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The step kind this definition answers.
    #[must_use]
    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// The declared parameters in order.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Invoke the handler with extracted arguments.
    ///
    /// # Errors
    ///
    /// Propagates the handler's [`StepFailure`].
    pub fn invoke(&self, args: &StepArgs) -> Result<(), StepFailure> {
        (self.handler)(args)
    }
}

impl std::fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepDefinition")
            .field("identifier", &self.identifier)
            .field("kind", &self.kind)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of step definitions for one matching session.
///
/// Registration order is the tie-break order during matching: the first
/// registered definition whose pattern matches a step wins.
pub struct DefinitionRegistry {
    definitions: Vec<StepDefinition>,
    catalogue: InlineCatalogue,
}

impl DefinitionRegistry {
    /// An empty registry with the standard inline catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalogue(InlineCatalogue::standard())
    }

    /// An empty registry with a host-extended inline catalogue.
    #[must_use]
    pub fn with_catalogue(catalogue: InlineCatalogue) -> Self {
        Self {
            definitions: Vec::new(),
            catalogue,
        }
    }

    /// A registry holding every definition submitted via [`step!`](crate::step).
    ///
    /// Registrations are ordered by source location so the tie-break order
    /// is stable across builds.
    #[must_use]
    pub fn from_inventory() -> Self {
        let mut submitted: Vec<&RegisteredDefinition> =
            inventory::iter::<RegisteredDefinition>.into_iter().collect();
        submitted.sort_by_key(|def| (def.file, def.line));
        let mut registry = Self::new();
        for def in submitted {
            registry.register(def.identifier, def.kind, (def.params)(), def.handler);
        }
        registry
    }

    /// Register a definition.
    ///
    /// Definitions whose matching pattern can never be built (unsupported
    /// parameter type, or an inline parameter absent from the phrase) are
    /// kept but logged: they surface later as permanently undefined steps.
    pub fn register(
        &mut self,
        identifier: impl Into<String>,
        kind: StepKind,
        params: Vec<Param>,
        handler: impl Fn(&StepArgs) -> Result<(), StepFailure> + 'static,
    ) {
        let identifier = identifier.into();
        if let Err(error) = validate_definition(&identifier, &params, &self.catalogue) {
            log::warn!("step definition `{identifier}` can never match: {error}");
        }
        self.definitions.push(StepDefinition {
            identifier,
            kind,
            params,
            handler: Box::new(handler),
        });
    }

    /// The registered definitions in registration order.
    #[must_use]
    pub fn definitions(&self) -> &[StepDefinition] {
        &self.definitions
    }

    /// The inline pattern catalogue definitions are validated against.
    #[must_use]
    pub fn catalogue(&self) -> &InlineCatalogue {
        &self.catalogue
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for DefinitionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
