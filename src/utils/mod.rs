//! Utility modules for the web entry point.
//!
//! - [`console`] - `tracing` layer that writes to the browser console

pub mod console;
