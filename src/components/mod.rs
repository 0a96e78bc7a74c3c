//! UI components built with Leptos.
//!
//! - [`navigator`] - Navigator, Slot and route scope bindings
//! - [`pages`] - Demo route tree and its pages

pub mod navigator;
pub mod pages;

pub use navigator::{NavigatorHost, RouteRoot};
