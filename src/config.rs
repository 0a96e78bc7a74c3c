//! Application configuration.
//!
//! Centralizes the constants used by the web entry point.

use tracing::Level;

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name shown in the demo chrome.
pub const APP_NAME: &str = "slotnav";

/// Id of the element the app mounts into.
pub const MOUNT_ELEMENT_ID: &str = "app";

// =============================================================================
// Runtime Flags
// =============================================================================

/// Navigator flags, loaded at compile time.
pub const FLAGS_TOML: &str = include_str!("../slotnav.toml");

// =============================================================================
// Logging
// =============================================================================

/// Most verbose level forwarded to the browser console.
pub const MAX_LOG_LEVEL: Level = Level::DEBUG;
