//! Root application module.
//!
//! Provides the [`NavigatorHost`] shared by every navigator and mounts the
//! demo route tree inside an error boundary.

use leptos::prelude::*;
use slotnav_core::FlagSet;

use crate::components::pages::route_tree;
use crate::components::{NavigatorHost, RouteRoot};
use crate::config::FLAGS_TOML;

/// Navigator flags from the bundled TOML, or defaults when it does not parse.
pub fn load_flags() -> FlagSet {
    FlagSet::from_toml_str(FLAGS_TOML).unwrap_or_else(|err| {
        tracing::warn!(%err, "using default navigator flags");
        FlagSet::default()
    })
}

/// Root application component.
///
/// Usage errors from the navigator bindings (a slot or accessor used outside
/// any navigator) surface in the error boundary.
#[component]
pub fn App() -> impl IntoView {
    provide_context(NavigatorHost::new(load_flags()));
    let tree = route_tree();

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    padding: 2rem;
                    background: #0a0e27;
                    color: #e0e0e0;
                    font-family: 'Courier New', monospace;
                ">
                    <h1 style="color: #ff6b6b;">"Something went wrong"</h1>
                    <ul style="color: #ff6b6b; font-size: 0.9rem;">
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                </div>
            }
        >
            <RouteRoot tree=tree />
        </ErrorBoundary>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_flags_parse() {
        assert!(FlagSet::from_toml_str(FLAGS_TOML).is_ok());
        assert_eq!(load_flags(), FlagSet::from_toml_str(FLAGS_TOML).unwrap());
    }

    #[test]
    fn test_bundled_flags_use_flags_table() {
        assert!(FLAGS_TOML.lines().any(|line| line.trim() == "[flags]"));
    }
}
