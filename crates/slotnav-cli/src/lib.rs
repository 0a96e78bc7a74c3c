//! Manifest-driven front end for the slotnav engine.
//!
//! - [`manifest`] - TOML route manifests and the route tree they describe
//! - [`session`] - Render and navigate one manifest
//! - [`print`] - Text output for route tables and rendered trees

pub mod error;
pub mod manifest;
pub mod print;
pub mod session;

pub use error::{CliError, ManifestError};
pub use manifest::Manifest;
pub use session::{Session, Target};
