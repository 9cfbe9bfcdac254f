//! Runtime configuration for plainspec.
//!
//! The only tunable is the default language used when a document carries no
//! `# language:` directive. A directive always wins; the hard default is
//! `"en"`.

use std::sync::{PoisonError, RwLock};

static DEFAULT_LANGUAGE_OVERRIDE: RwLock<Option<String>> = RwLock::new(None);

fn env_default_language() -> Option<String> {
    std::env::var("PLAINSPEC_DEFAULT_LANG")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Determine the language used for documents without a language directive.
///
/// Resolution order: in-process override, the `PLAINSPEC_DEFAULT_LANG`
/// environment variable, then `"en"`.
#[must_use]
pub fn default_language() -> String {
    let guard = DEFAULT_LANGUAGE_OVERRIDE
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    guard
        .clone()
        .or_else(env_default_language)
        .unwrap_or_else(|| "en".to_string())
}

/// Override the default language for the current process.
///
/// Tests may call [`clear_default_language_override`] to restore environment
/// driven behaviour afterwards.
pub fn set_default_language(code: &str) {
    let mut guard = DEFAULT_LANGUAGE_OVERRIDE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = Some(code.to_string());
}

/// Remove any in-process override for the default language.
pub fn clear_default_language_override() {
    let mut guard = DEFAULT_LANGUAGE_OVERRIDE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}
