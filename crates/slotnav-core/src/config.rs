//! Engine constants.
//!
//! Centralizes the route-file conventions and identity keys shared by the
//! route tree builder, the ordering policy and the slot resolver.

// =============================================================================
// Route Files
// =============================================================================

/// File name that turns a directory into a nested navigator.
pub const LAYOUT_ROUTE: &str = "_layout";

/// Route name of a directory's default screen.
pub const INDEX_ROUTE: &str = "index";

/// Separator between path segments in route names and context keys.
pub const PATH_SEPARATOR: char = '/';

// =============================================================================
// Identity Keys
// =============================================================================

/// Context key of the route tree root.
pub const ROOT_CONTEXT_KEY: &str = "/";

/// Separator between a navigator's context key and a route name in route keys.
pub const ROUTE_KEY_SEPARATOR: char = ':';

/// Separator between a route key and its duplicate counter (`/:item#2`).
pub const DUPLICATE_KEY_SEPARATOR: char = '#';

/// Identity key a Slot stamps on its content when layout remounting is
/// prevented. The same key across route switches means keyed hosts keep the
/// subtree mounted.
pub const STATIC_SLOT_KEY: &str = "slotnav-uses-a-static-key-for-slot-navigator";
