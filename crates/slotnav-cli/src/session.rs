//! A navigable render session over one manifest.

use std::sync::Arc;

use slotnav_core::host::{Output, Runtime};
use slotnav_core::{ContextKey, FlagSet, NavigationState, RouteNode};

use crate::error::CliError;
use crate::manifest::{Manifest, TextElement};

/// One `--navigate CONTEXT=NAME` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub context_key: ContextKey,
    pub name: String,
}

impl std::str::FromStr for Target {
    type Err = CliError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.split_once('=') {
            Some((context_key, name)) if !name.is_empty() => Ok(Target {
                context_key: ContextKey::from(context_key),
                name: name.to_string(),
            }),
            _ => Err(CliError::InvalidTarget(raw.to_string())),
        }
    }
}

pub struct Session {
    runtime: Runtime<String>,
    tree: Arc<RouteNode<TextElement>>,
}

impl Session {
    pub fn new(manifest: &Manifest, flags: FlagSet) -> Self {
        Self {
            runtime: Runtime::new(flags),
            tree: manifest.tree(),
        }
    }

    pub fn render(&self) -> Result<Output<String>, CliError> {
        Ok(self.runtime.render(&self.tree)?)
    }

    /// Navigates the navigator mounted at `target.context_key`.
    ///
    /// Navigators only exist once rendered, so render before the first call.
    pub fn navigate(&self, target: &Target) -> Result<(), CliError> {
        let navigation = self
            .runtime
            .navigation(&target.context_key)
            .ok_or_else(|| CliError::UnknownNavigator(target.context_key.to_string()))?;

        if !navigation.navigate(target.name.clone()) {
            return Err(CliError::Unhandled {
                context_key: target.context_key.to_string(),
                name: target.name.clone(),
            });
        }
        tracing::info!(context_key = %target.context_key, route = %target.name, "navigated");
        Ok(())
    }

    /// Renders, applies every target in order re-rendering after each, and
    /// returns the final output.
    pub fn run(&self, targets: &[Target]) -> Result<Output<String>, CliError> {
        let mut output = self.render()?;
        for target in targets {
            self.navigate(target)?;
            output = self.render()?;
        }
        Ok(output)
    }

    /// Stored state of every navigator, ordered by context key.
    pub fn states(&self) -> Vec<NavigationState> {
        let store = self.runtime.store();
        store.keys().iter().filter_map(|key| store.state(key)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> Manifest {
        Manifest::from_toml_str(
            r#"
            routes = ["_layout", "index", "about", "blog/_layout", "blog/index", "blog/[slug]"]
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_target() {
        let target: Target = "/blog=[slug]".parse().unwrap();
        assert_eq!(target.context_key, ContextKey::from("/blog"));
        assert_eq!(target.name, "[slug]");

        assert!("/blog".parse::<Target>().is_err());
        assert!("/blog=".parse::<Target>().is_err());
    }

    #[test]
    fn test_run_applies_targets_in_order() {
        let session = Session::new(&manifest(), FlagSet::default());
        let targets = ["/=blog".parse().unwrap(), "/blog=[slug]".parse().unwrap()];
        let output = session.run(&targets).unwrap();

        assert_eq!(output.views(), vec!["layout /", "layout /blog", "page blog/[slug]"]);
        let keys: Vec<_> = session.states().iter().map(|s| s.context_key.to_string()).collect();
        assert_eq!(keys, vec!["/", "/blog"]);
    }

    #[test]
    fn test_navigate_unmounted_navigator_fails() {
        let session = Session::new(&manifest(), FlagSet::default());
        session.render().unwrap();
        let err = session.navigate(&"/blog=index".parse().unwrap()).unwrap_err();
        assert!(matches!(err, CliError::UnknownNavigator(key) if key == "/blog"));
    }

    #[test]
    fn test_navigate_unknown_route_fails() {
        let session = Session::new(&manifest(), FlagSet::default());
        session.render().unwrap();
        let err = session.navigate(&"/=missing".parse().unwrap()).unwrap_err();
        assert!(matches!(err, CliError::Unhandled { .. }));
    }
}
