//! Navigator/Slot resolution engine.
//!
//! Turns a file-system-shaped route tree into live navigation state and
//! resolves which branch is active for a given place in the tree.
//!
//! One render pass always runs in the same order:
//!
//! 1. [`filter_screen_children`] splits a navigator's children into screens
//!    and passthrough content
//! 2. [`sort_screens`] produces the ordered route table
//! 3. [`NavigatorInstance::publish`] reconciles [`NavigationState`] with the
//!    [`NavigationStore`] and publishes a memoized [`NavigatorContext`]
//! 4. [`slot::enter`] decides whether a Slot can render directly or must wrap
//!    itself in a navigator first
//!
//! The engine is host-agnostic: anything implementing [`HostElement`] can be
//! rendered. [`host`] is a small synchronous reference host.

pub mod config;
mod context;
pub mod error;
mod flags;
pub mod host;
mod navigation;
mod navigator;
mod ordering;
mod publish;
mod route;
pub mod router;
mod screen;
pub mod slot;
mod view;

pub use context::{ContextKey, resolve_context_key};
pub use error::{ConfigError, ConfigWarning, NavigatorError};
pub use flags::FlagSet;
pub use navigation::{
    BuiltNavigation, Descriptor, Descriptors, Navigation, NavigationStore, NavigatorInstance,
    NavigatorMemo, SubscriptionId,
};
pub use navigator::{Mounted, NavigatorConfig, mount_navigator, require_navigator};
pub use ordering::{RouteEntry, RouteMeta, order_entries, sort_screens};
pub use publish::NavigatorContext;
pub use route::{Renderer, RouteNode, RouteTree, Segment, Specificity};
pub use router::{Action, NavigationState, RouteRef, Router, RouterHandle, RouterOptions};
pub use screen::{
    Child, DeclaredScreen, FilterOptions, FilteredChildren, Params, Screen, ScreenOptions,
    filter_screen_children,
};
pub use view::HostElement;
