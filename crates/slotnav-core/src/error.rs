//! Error and warning types for the engine.
//!
//! Two categories, handled very differently:
//!
//! - [`NavigatorError`] - caller mistakes (an accessor used outside any
//!   navigator). Returned as `Err` and never caught inside the engine.
//! - [`ConfigWarning`] - composition problems with a deterministic fallback
//!   (empty navigator, unknown initial route). Logged, never returned.
//!
//! [`ConfigError`] covers loading a [`FlagSet`](crate::FlagSet) from TOML.

use std::fmt;

use thiserror::Error;

use crate::context::ContextKey;

/// Usage errors. Fatal to the current render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigatorError {
    /// A context-dependent accessor ran with no navigator in scope.
    #[error("{accessor} must be used within a <Navigator />")]
    OutsideNavigator {
        /// Name of the accessor that was called.
        accessor: &'static str,
    },
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be deserialized.
    #[error("invalid flag configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Non-fatal composition problems. Each one has a fallback already applied
/// by the time it is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No screens resolved under the default entry point; renders nothing.
    EmptyNavigator { context_key: ContextKey },
    /// `initial_route_name` named no entry; the first entry is used.
    UnknownInitialRoute {
        context_key: ContextKey,
        name: String,
    },
    /// A declared screen matched no child route and has no renderer; skipped.
    UnknownScreen {
        context_key: ContextKey,
        name: String,
    },
    /// A screen name was declared twice; the first declaration is kept.
    DuplicateScreen {
        context_key: ContextKey,
        name: String,
    },
    /// No navigator up the chain handled an action.
    UnhandledAction {
        context_key: ContextKey,
        action: &'static str,
    },
}

impl ConfigWarning {
    /// Context key of the navigator the warning is about.
    pub fn context_key(&self) -> &ContextKey {
        match self {
            Self::EmptyNavigator { context_key }
            | Self::UnknownInitialRoute { context_key, .. }
            | Self::UnknownScreen { context_key, .. }
            | Self::DuplicateScreen { context_key, .. }
            | Self::UnhandledAction { context_key, .. } => context_key,
        }
    }

    /// Logs the warning.
    pub fn emit(&self) {
        tracing::warn!(context_key = %self.context_key(), "{self}");
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNavigator { context_key } => {
                write!(f, "Navigator at \"{}\" has no children.", context_key)
            }
            Self::UnknownInitialRoute { context_key, name } => write!(
                f,
                "initial route \"{}\" does not match any route in navigator at \"{}\", using the first route",
                name, context_key
            ),
            Self::UnknownScreen { context_key, name } => write!(
                f,
                "screen \"{}\" does not match any child route of \"{}\" and has no renderer, ignoring it",
                name, context_key
            ),
            Self::DuplicateScreen { context_key, name } => write!(
                f,
                "screen \"{}\" is declared more than once in navigator at \"{}\"",
                name, context_key
            ),
            Self::UnhandledAction {
                context_key,
                action,
            } => write!(
                f,
                "action {} was not handled by navigator at \"{}\" or any parent",
                action, context_key
            ),
        }
    }
}
