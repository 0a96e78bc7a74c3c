//! Process-wide feature flags.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Read-only flags consulted during render.
///
/// Loaded once by the host (from TOML, or constructed directly) and passed
/// down unchanged; nothing in the engine writes to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagSet {
    /// Stamp [`STATIC_SLOT_KEY`](crate::config::STATIC_SLOT_KEY) on Slot
    /// content instead of the active route's key.
    ///
    /// Keyed hosts then keep the Slot's subtree mounted across route switches:
    /// mount and unmount no longer fire when the active route changes inside
    /// that Slot. Route-level state survives the switch as a consequence.
    pub prevent_layout_remounting: bool,
}

/// A configuration document with flags under `[flags]`. Other tables are
/// left to their own readers.
#[derive(Deserialize)]
struct FlagsDocument {
    #[serde(default)]
    flags: FlagSet,
}

impl FlagSet {
    /// Parses the `[flags]` table of a TOML document. A missing table or
    /// missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let document: FlagsDocument = toml::from_str(source)?;
        Ok(document.flags)
    }
}
