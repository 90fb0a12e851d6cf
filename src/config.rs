//! Process-wide configuration registry.
//!
//! Holds the custom and locale error maps consulted by the message
//! resolution ladder. Reads take a coherent snapshot; concurrent parses
//! never observe a half-written configuration.

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::error::RawIssue;

type ErrorMapFn = Arc<dyn Fn(&RawIssue) -> Option<String> + Send + Sync>;

/// A message resolver: either a fixed string applied to every issue, or a
/// function inspecting the raw issue. Returning `None` (or an empty string)
/// defers to the next rung of the ladder.
#[derive(Clone)]
pub enum ErrorMap {
    Static(String),
    Func(ErrorMapFn),
}

impl ErrorMap {
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&RawIssue) -> Option<String> + Send + Sync + 'static,
    {
        ErrorMap::Func(Arc::new(f))
    }

    pub fn resolve(&self, raw: &RawIssue) -> Option<String> {
        match self {
            ErrorMap::Static(msg) => Some(msg.clone()),
            ErrorMap::Func(f) => f(raw),
        }
    }
}

impl fmt::Debug for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMap::Static(msg) => write!(f, "ErrorMap::Static({:?})", msg),
            ErrorMap::Func(_) => f.write_str("ErrorMap::Func(..)"),
        }
    }
}

impl From<&str> for ErrorMap {
    fn from(msg: &str) -> Self {
        ErrorMap::Static(msg.to_string())
    }
}

impl From<String> for ErrorMap {
    fn from(msg: String) -> Self {
        ErrorMap::Static(msg)
    }
}

/// Process-wide configuration: a custom error map consulted before the
/// locale map.
#[derive(Clone, Default)]
pub struct Config {
    pub custom_error: Option<ErrorMap>,
    pub locale_error: Option<ErrorMap>,
}

static CONFIG: RwLock<Config> = RwLock::new(Config {
    custom_error: None,
    locale_error: None,
});

/// Replace the whole configuration.
pub fn configure(config: Config) {
    *CONFIG.write().unwrap_or_else(|e| e.into_inner()) = config;
}

/// Install (or clear) the process-wide custom error map.
pub fn set_custom_error(error: Option<ErrorMap>) {
    CONFIG.write().unwrap_or_else(|e| e.into_inner()).custom_error = error;
}

/// Install (or clear) the process-wide locale error map.
pub fn set_locale_error(error: Option<ErrorMap>) {
    CONFIG.write().unwrap_or_else(|e| e.into_inner()).locale_error = error;
}

/// Coherent snapshot of the current configuration.
pub fn snapshot() -> Config {
    CONFIG.read().unwrap_or_else(|e| e.into_inner()).clone()
}
