//! Routing strategies.
//!
//! A [`Router`] decides how navigation state is created and how it reacts to
//! an [`Action`]. Two strategies ship with the engine and are selected
//! explicitly through a [`RouterHandle`]:
//!
//! - [`StackRouter`] ([`stack`], the default) - `routes` is a history stack
//! - [`SingleActiveRouter`] ([`single_active`]) - `routes` is the whole
//!   table and only the active index ever changes

use std::fmt;
use std::sync::{Arc, LazyLock};

use serde::Serialize;

use crate::config::DUPLICATE_KEY_SEPARATOR;
use crate::context::ContextKey;
use crate::error::ConfigWarning;
use crate::screen::Params;

// ============================================================================
// State
// ============================================================================

/// A route as it appears in navigation state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRef {
    pub key: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

/// Active index plus route list for one navigator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationState {
    pub context_key: ContextKey,
    pub routes: Vec<RouteRef>,
    pub index: usize,
}

impl NavigationState {
    /// The route at `index`, if any.
    pub fn active(&self) -> Option<&RouteRef> {
        self.routes.get(self.index)
    }

    pub fn route_names(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.name.as_str())
    }

    pub fn route_keys(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.key.as_str())
    }
}

// ============================================================================
// Actions
// ============================================================================

/// A requested state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Go to a route, reusing it if already present.
    Navigate {
        name: String,
        params: Option<Params>,
    },
    /// Add a new instance of a route on top.
    Push {
        name: String,
        params: Option<Params>,
    },
    /// Swap the active route for another.
    Replace {
        name: String,
        params: Option<Params>,
    },
    /// Remove `n` routes from the top.
    Pop(usize),
    /// Return to the first route.
    PopToTop,
    /// Activate the route at an index.
    SetIndex(usize),
}

impl Action {
    pub fn navigate(name: impl Into<String>) -> Self {
        Self::Navigate {
            name: name.into(),
            params: None,
        }
    }

    pub fn navigate_with(name: impl Into<String>, params: Params) -> Self {
        Self::Navigate {
            name: name.into(),
            params: Some(params),
        }
    }

    pub fn push(name: impl Into<String>) -> Self {
        Self::Push {
            name: name.into(),
            params: None,
        }
    }

    pub fn replace(name: impl Into<String>) -> Self {
        Self::Replace {
            name: name.into(),
            params: None,
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "NAVIGATE",
            Self::Push { .. } => "PUSH",
            Self::Replace { .. } => "REPLACE",
            Self::Pop(_) => "POP",
            Self::PopToTop => "POP_TO_TOP",
            Self::SetIndex(_) => "SET_INDEX",
        }
    }
}

// ============================================================================
// Router
// ============================================================================

/// Options every strategy receives when creating initial state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterOptions {
    pub initial_route_name: Option<String>,
}

/// A navigation state machine.
///
/// `table` is always the navigator's ordered route table as initial
/// [`RouteRef`]s. Returning `None` from [`Router::apply`] means the action is
/// not handled here and should bubble to the parent navigator.
pub trait Router: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    fn initial_state(
        &self,
        context_key: &ContextKey,
        table: &[RouteRef],
        options: &RouterOptions,
    ) -> NavigationState;

    fn apply(
        &self,
        state: &NavigationState,
        table: &[RouteRef],
        action: &Action,
    ) -> Option<NavigationState>;
}

/// Shared handle to a strategy. Identity (`Arc::ptr_eq`) is part of the
/// published context's memo key.
pub type RouterHandle = Arc<dyn Router>;

static STACK: LazyLock<RouterHandle> = LazyLock::new(|| Arc::new(StackRouter));
static SINGLE_ACTIVE: LazyLock<RouterHandle> = LazyLock::new(|| Arc::new(SingleActiveRouter));

/// The default strategy.
pub fn stack() -> RouterHandle {
    STACK.clone()
}

/// The strategy Slots expect: one active route, no history.
pub fn single_active() -> RouterHandle {
    SINGLE_ACTIVE.clone()
}

/// Index into `table` of the initial route.
///
/// Falls back to the first entry, with a warning, when the requested name is
/// not in the table.
pub fn initial_index(
    context_key: &ContextKey,
    table: &[RouteRef],
    options: &RouterOptions,
) -> usize {
    let Some(name) = options.initial_route_name.as_deref() else {
        return 0;
    };

    match table.iter().position(|route| route.name == name) {
        Some(index) => index,
        None => {
            ConfigWarning::UnknownInitialRoute {
                context_key: context_key.clone(),
                name: name.to_string(),
            }
            .emit();
            0
        }
    }
}

fn table_route<'a>(table: &'a [RouteRef], name: &str) -> Option<&'a RouteRef> {
    table.iter().find(|route| route.name == name)
}

/// New params win; no params keep the existing ones.
fn with_params(mut route: RouteRef, params: Option<&Params>) -> RouteRef {
    if let Some(params) = params {
        route.params = Some(params.clone());
    }
    route
}

// ============================================================================
// StackRouter
// ============================================================================

/// History stack. Starts with just the initial route.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackRouter;

impl StackRouter {
    /// A key for `base` not already used in `routes`.
    fn unique_key(routes: &[RouteRef], base: &RouteRef) -> String {
        let taken = |key: &str| routes.iter().any(|r| r.key == key);
        if !taken(base.key.as_str()) {
            return base.key.clone();
        }
        (2..)
            .map(|n| format!("{}{}{}", base.key, DUPLICATE_KEY_SEPARATOR, n))
            .find(|key| !taken(key.as_str()))
            .unwrap_or_else(|| base.key.clone())
    }

    fn fresh(routes: &[RouteRef], base: &RouteRef, params: &Option<Params>) -> RouteRef {
        RouteRef {
            key: Self::unique_key(routes, base),
            name: base.name.clone(),
            params: params.clone().or_else(|| base.params.clone()),
        }
    }
}

impl Router for StackRouter {
    fn name(&self) -> &'static str {
        "stack"
    }

    fn initial_state(
        &self,
        context_key: &ContextKey,
        table: &[RouteRef],
        options: &RouterOptions,
    ) -> NavigationState {
        let routes = table
            .get(initial_index(context_key, table, options))
            .cloned()
            .into_iter()
            .collect();

        NavigationState {
            context_key: context_key.clone(),
            routes,
            index: 0,
        }
    }

    fn apply(
        &self,
        state: &NavigationState,
        table: &[RouteRef],
        action: &Action,
    ) -> Option<NavigationState> {
        let mut routes = state.routes.clone();

        match action {
            Action::Navigate { name, params } => {
                let base = table_route(table, name)?;
                match routes.iter().rposition(|r| r.name == *name) {
                    Some(at) => {
                        routes.truncate(at + 1);
                        let top = routes.pop()?;
                        routes.push(with_params(top, params.as_ref()));
                    }
                    None => {
                        let route = Self::fresh(&routes, base, params);
                        routes.push(route);
                    }
                }
            }
            Action::Push { name, params } => {
                let base = table_route(table, name)?;
                let route = Self::fresh(&routes, base, params);
                routes.push(route);
            }
            Action::Replace { name, params } => {
                let base = table_route(table, name)?;
                routes.pop()?;
                let route = Self::fresh(&routes, base, params);
                routes.push(route);
            }
            Action::Pop(count) => {
                if routes.len() <= 1 || *count == 0 {
                    return None;
                }
                let keep = routes.len().saturating_sub(*count).max(1);
                routes.truncate(keep);
            }
            Action::PopToTop => {
                if routes.len() <= 1 {
                    return None;
                }
                routes.truncate(1);
            }
            Action::SetIndex(_) => return None,
        }

        Some(NavigationState {
            context_key: state.context_key.clone(),
            index: routes.len().saturating_sub(1),
            routes,
        })
    }
}

// ============================================================================
// SingleActiveRouter
// ============================================================================

/// Whole table in `routes`; transitions only move `index`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleActiveRouter;

impl Router for SingleActiveRouter {
    fn name(&self) -> &'static str {
        "single-active"
    }

    fn initial_state(
        &self,
        context_key: &ContextKey,
        table: &[RouteRef],
        options: &RouterOptions,
    ) -> NavigationState {
        NavigationState {
            context_key: context_key.clone(),
            routes: table.to_vec(),
            index: initial_index(context_key, table, options),
        }
    }

    fn apply(
        &self,
        state: &NavigationState,
        _table: &[RouteRef],
        action: &Action,
    ) -> Option<NavigationState> {
        let (index, params) = match action {
            Action::Navigate { name, params } | Action::Replace { name, params } => (
                state.routes.iter().position(|r| r.name == *name)?,
                params.as_ref(),
            ),
            Action::SetIndex(index) if *index < state.routes.len() => (*index, None),
            _ => return None,
        };

        let mut next = state.clone();
        next.index = index;
        if params.is_some() {
            next.routes[index] = with_params(next.routes[index].clone(), params);
        }
        Some(next)
    }
}

// ============================================================================
// Tests
// ============================================================================
