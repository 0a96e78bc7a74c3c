//! Navigator mounting.
//!
//! [`mount_navigator`] is the whole per-navigator pass: resolve the context
//! key, filter children, order entries, build state and publish. Hosts call
//! it once per navigator per render and keep the [`NavigatorMemo`] between
//! calls.

use std::sync::Arc;

use crate::context::resolve_context_key;
use crate::error::NavigatorError;
use crate::navigation::{Navigation, NavigationStore, NavigatorInstance, NavigatorMemo};
use crate::ordering::sort_screens;
use crate::publish::NavigatorContext;
use crate::route::RouteNode;
use crate::router::RouterHandle;
use crate::screen::{Child, FilterOptions, ScreenOptions, filter_screen_children, report_empty};

/// Caller-supplied navigator configuration.
#[derive(Debug, Clone, Default)]
pub struct NavigatorConfig {
    pub initial_route_name: Option<String>,
    /// Defaults applied to every screen; per-screen options win.
    pub screen_options: ScreenOptions,
    /// Routing strategy; [`stack`](crate::router::stack) when unset.
    pub router: Option<RouterHandle>,
}

impl NavigatorConfig {
    pub fn initial_route_name(mut self, name: impl Into<String>) -> Self {
        self.initial_route_name = Some(name.into());
        self
    }

    pub fn screen_options(mut self, options: ScreenOptions) -> Self {
        self.screen_options = options;
        self
    }

    pub fn router(mut self, router: RouterHandle) -> Self {
        self.router = Some(router);
        self
    }
}

/// A navigator that resolved at least one entry.
pub struct Mounted<T, C> {
    pub instance: NavigatorInstance<T>,
    pub context: Arc<NavigatorContext<T>>,
    /// Non-screen children, to render inside the provided context.
    pub other: Vec<C>,
}

/// Runs one navigator pass.
///
/// `route` is the ambient route scope, `parent` the enclosing navigator's
/// handle, `is_custom` is `false` only for the implicit default navigator.
/// Returns `None` when no entries resolve: the navigator renders nothing,
/// and the default navigator logs a warning.
pub fn mount_navigator<T, C>(
    store: &NavigationStore,
    memo: &mut NavigatorMemo<T>,
    route: Option<&Arc<RouteNode<T>>>,
    parent: Option<&Navigation>,
    config: &NavigatorConfig,
    children: Vec<Child<T, C>>,
    is_custom: bool,
) -> Option<Mounted<T, C>> {
    let context_key = resolve_context_key(route.map(|node| &**node));
    let filter = FilterOptions {
        is_custom,
        context_key: context_key.clone(),
    };
    let filtered = filter_screen_children(children, &filter);
    let entries = sort_screens(route.map(|node| &**node), &context_key, filtered.screens);

    if entries.is_empty() {
        report_empty(&filter);
        return None;
    }

    tracing::debug!(%context_key, entries = entries.len(), is_custom, "mounting navigator");
    let instance = NavigatorInstance::new(context_key, entries, config, parent.cloned());
    let context = instance.publish(store, memo);
    Some(Mounted {
        instance,
        context,
        other: filtered.other,
    })
}

/// The ambient navigator context, or the usage error `accessor` must raise
/// outside any navigator.
pub fn require_navigator<T>(
    ambient: Option<&Arc<NavigatorContext<T>>>,
    accessor: &'static str,
) -> Result<Arc<NavigatorContext<T>>, NavigatorError> {
    ambient
        .cloned()
        .ok_or(NavigatorError::OutsideNavigator { accessor })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteTree;
    use crate::router;
    use crate::screen::Screen;
    use tracing_test::traced_test;

    fn blog() -> Arc<RouteNode<()>> {
        RouteTree::new()
            .route("_layout", || ())
            .route("index", || ())
            .route("blog/_layout", || ())
            .route("blog/[slug]", || ())
            .route("blog/index", || ())
            .build()
    }

    #[test]
    fn test_mount_resolves_key_and_entries() {
        let root = blog();
        let node = root.child("blog").unwrap();
        let store = NavigationStore::new();
        let mounted = mount_navigator::<(), ()>(
            &store,
            &mut NavigatorMemo::default(),
            Some(node),
            None,
            &NavigatorConfig::default(),
            Vec::new(),
            true,
        )
        .unwrap();

        assert_eq!(mounted.context.context_key.as_str(), "/blog");
        let names: Vec<_> = mounted
            .instance
            .entries()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["index", "[slug]"]);
        let active = mounted.context.active_descriptor().unwrap();
        assert_eq!(active.route().key, "/blog:index");
    }

    #[test]
    fn test_mount_outside_route_scope_uses_root() {
        let store = NavigationStore::new();
        let children = vec![
            Child::Screen(Screen::new("home").render(|| ())),
            Child::Content("chrome"),
        ];
        let mounted = mount_navigator(
            &store,
            &mut NavigatorMemo::default(),
            None,
            None,
            &NavigatorConfig::default().router(router::single_active()),
            children,
            true,
        )
        .unwrap();

        assert!(mounted.context.context_key.is_root());
        assert_eq!(mounted.other, vec!["chrome"]);
        assert_eq!(mounted.instance.router().name(), "single-active");
    }

    #[test]
    #[traced_test]
    fn test_empty_default_navigator_warns() {
        let store = NavigationStore::new();
        let leaf = Arc::new(RouteNode::<()>::leaf("about", "/about".into(), None));
        let mounted = mount_navigator::<(), ()>(
            &store,
            &mut NavigatorMemo::default(),
            Some(&leaf),
            None,
            &NavigatorConfig::default(),
            Vec::new(),
            false,
        );

        assert!(mounted.is_none());
        assert!(logs_contain("Navigator at \"/about\" has no children."));
    }

    #[test]
    #[traced_test]
    fn test_empty_custom_navigator_is_silent() {
        let store = NavigationStore::new();
        let mounted = mount_navigator::<(), ()>(
            &store,
            &mut NavigatorMemo::default(),
            None,
            None,
            &NavigatorConfig::default(),
            Vec::new(),
            true,
        );

        assert!(mounted.is_none());
        assert!(!logs_contain("has no children"));
    }

    #[test]
    fn test_require_navigator() {
        let err = require_navigator::<()>(None, "use_slot").unwrap_err();
        assert_eq!(err.to_string(), "use_slot must be used within a <Navigator />");
    }
}
