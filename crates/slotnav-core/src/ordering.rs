//! Screen ordering policy.
//!
//! Entries are ordered by:
//!
//! 1. specificity class: static (including `index`) before dynamic before catch-all
//! 2. within a class, explicitly declared screens in declaration order
//! 3. then undeclared index routes
//! 4. then original position, via a stable sort
//!
//! The key only depends on entry metadata, so sorting a sorted table is a no-op.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::config::ROUTE_KEY_SEPARATOR;
use crate::context::ContextKey;
use crate::error::ConfigWarning;
use crate::route::{RouteNode, Specificity, is_index_route};
use crate::router::RouteRef;
use crate::screen::{DeclaredScreen, Params, Screen, ScreenOptions};

/// Ordering hints and configuration carried by an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMeta {
    pub specificity: Specificity,
    pub is_index: bool,
    /// Position among the navigator's screen declarations, if declared.
    pub declared_at: Option<usize>,
    pub options: ScreenOptions,
    pub initial_params: Option<Params>,
}

/// One addressable route of a navigator.
pub struct RouteEntry<T> {
    /// `"{context_key}:{name}"`, unique within the navigator.
    pub key: String,
    pub name: String,
    pub node: Arc<RouteNode<T>>,
    pub meta: RouteMeta,
}

impl<T> RouteEntry<T> {
    fn new(
        context_key: &ContextKey,
        node: Arc<RouteNode<T>>,
        declared: Option<(usize, &Screen<T>)>,
    ) -> Self {
        let name = node.route().to_string();
        let (declared_at, options, initial_params) = match declared {
            Some((at, screen)) => (
                Some(at),
                screen.screen_options().clone(),
                screen.params().cloned(),
            ),
            None => (None, ScreenOptions::default(), None),
        };

        Self {
            key: route_key(context_key, &name),
            meta: RouteMeta {
                specificity: Specificity::of(&name),
                is_index: is_index_route(&name),
                declared_at,
                options,
                initial_params,
            },
            name,
            node,
        }
    }

    fn sort_key(&self) -> (Specificity, usize, bool) {
        (
            self.meta.specificity,
            self.meta.declared_at.unwrap_or(usize::MAX),
            !self.meta.is_index,
        )
    }

    /// The entry as an initial route reference.
    pub fn route_ref(&self) -> RouteRef {
        RouteRef {
            key: self.key.clone(),
            name: self.name.clone(),
            params: self.meta.initial_params.clone(),
        }
    }
}

impl<T> Clone for RouteEntry<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            name: self.name.clone(),
            node: self.node.clone(),
            meta: self.meta.clone(),
        }
    }
}

impl<T> fmt::Debug for RouteEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("meta", &self.meta)
            .finish()
    }
}

/// Key of route `name` in the navigator at `context_key`.
pub(crate) fn route_key(context_key: &ContextKey, name: &str) -> String {
    format!("{}{}{}", context_key, ROUTE_KEY_SEPARATOR, name)
}

/// Builds the ordered route table for the navigator at `context_key`.
///
/// Child routes of `route` become entries, configured by the declared screen
/// of the same name. Declared screens without a matching child become
/// entries only when they carry a renderer.
pub fn sort_screens<T>(
    route: Option<&RouteNode<T>>,
    context_key: &ContextKey,
    screens: Vec<DeclaredScreen<T>>,
) -> Vec<RouteEntry<T>> {
    let mut seen = HashSet::new();
    let mut declared: Vec<Screen<T>> = Vec::new();
    for DeclaredScreen { screen, owner } in screens {
        if owner != *context_key {
            tracing::debug!(
                %owner,
                %context_key,
                screen = screen.name(),
                "skipping screen declared by another navigator"
            );
            continue;
        }
        if !seen.insert(screen.name().to_string()) {
            ConfigWarning::DuplicateScreen {
                context_key: context_key.clone(),
                name: screen.name().to_string(),
            }
            .emit();
            continue;
        }
        declared.push(screen);
    }

    let children = route.map(RouteNode::children).unwrap_or_default();
    let mut matched = vec![false; declared.len()];
    let mut entries: Vec<RouteEntry<T>> = children
        .iter()
        .map(|child| {
            let position = declared.iter().position(|s| s.name() == child.route());
            if let Some(at) = position {
                matched[at] = true;
            }
            RouteEntry::new(
                context_key,
                child.clone(),
                position.map(|at| (at, &declared[at])),
            )
        })
        .collect();

    for (at, screen) in declared.iter().enumerate() {
        if matched[at] {
            continue;
        }
        match screen.renderer() {
            Some(render) => {
                let node = RouteNode::leaf(
                    screen.name(),
                    context_key.child(screen.name()),
                    Some(render.clone()),
                );
                let entry = RouteEntry::new(context_key, Arc::new(node), Some((at, screen)));
                entries.push(entry);
            }
            None => ConfigWarning::UnknownScreen {
                context_key: context_key.clone(),
                name: screen.name().to_string(),
            }
            .emit(),
        }
    }

    order_entries(entries)
}

/// Applies the ordering policy to an existing table.
pub fn order_entries<T>(mut entries: Vec<RouteEntry<T>>) -> Vec<RouteEntry<T>> {
    entries.sort_by_key(RouteEntry::sort_key);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteTree;
    use tracing_test::traced_test;

    fn declared(names: &[&str], owner: &ContextKey) -> Vec<DeclaredScreen<()>> {
        names
            .iter()
            .map(|name| DeclaredScreen {
                screen: Screen::new(*name),
                owner: owner.clone(),
            })
            .collect()
    }

    fn names<T>(entries: &[RouteEntry<T>]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn tree(routes: &[&str]) -> Arc<RouteNode<()>> {
        let mut tree = RouteTree::new();
        for path in routes {
            tree.insert(path, Arc::new(|| ()));
        }
        tree.build()
    }

    #[test]
    fn test_specificity_classes() {
        let root = tree(&["[...rest]", "[id]", "about", "index"]);
        let entries = sort_screens(Some(&*root), &ContextKey::root(), Vec::new());
        assert_eq!(names(&entries), vec!["index", "about", "[id]", "[...rest]"]);
    }

    #[test]
    fn test_declared_order_wins_within_class() {
        let root = tree(&["index", "about", "contact"]);
        let key = ContextKey::root();
        let entries = sort_screens(Some(&*root), &key, declared(&["contact", "about"], &key));
        assert_eq!(names(&entries), vec!["contact", "about", "index"]);
        assert_eq!(entries[0].meta.declared_at, Some(0));
        assert_eq!(entries[2].meta.declared_at, None);
    }

    #[test]
    fn test_declared_order_cannot_beat_class() {
        let root = tree(&["[id]", "about"]);
        let key = ContextKey::root();
        let entries = sort_screens(Some(&*root), &key, declared(&["[id]", "about"], &key));
        assert_eq!(names(&entries), vec!["about", "[id]"]);
    }

    #[test]
    fn test_entry_keys() {
        let root = tree(&["_layout", "blog/_layout", "blog/[slug]"]);
        let blog = root.child("blog").unwrap();
        let entries = sort_screens(Some(&**blog), blog.context_key(), Vec::new());
        assert_eq!(entries[0].key, "/blog:[slug]");
        assert_eq!(entries[0].route_ref().name, "[slug]");
    }

    #[test]
    fn test_screen_with_renderer_adds_entry() {
        let key = ContextKey::from("/inbox");
        let screens = vec![DeclaredScreen {
            screen: Screen::new("compose").render(|| ()),
            owner: key.clone(),
        }];
        let entries = sort_screens::<()>(None, &key, screens);
        assert_eq!(names(&entries), vec!["compose"]);
        assert_eq!(entries[0].node.context_key().as_str(), "/inbox/compose");
    }

    #[test]
    fn test_screens_of_other_navigators_are_skipped() {
        let root = tree(&["index"]);
        let other = ContextKey::from("/elsewhere");
        let screens = vec![DeclaredScreen {
            screen: Screen::new("extra").render(|| ()),
            owner: other,
        }];
        let entries = sort_screens(Some(&*root), &ContextKey::root(), screens);
        assert_eq!(names(&entries), vec!["index"]);
    }

    #[test]
    #[traced_test]
    fn test_unknown_screen_warns_and_is_skipped() {
        let root = tree(&["index"]);
        let key = ContextKey::root();
        let entries = sort_screens(Some(&*root), &key, declared(&["missing"], &key));
        assert_eq!(names(&entries), vec!["index"]);
        assert!(logs_contain("screen \"missing\" does not match any child route"));
    }

    #[test]
    #[traced_test]
    fn test_duplicate_screen_keeps_first() {
        let root = tree(&["a", "b"]);
        let key = ContextKey::root();
        let entries = sort_screens(Some(&*root), &key, declared(&["b", "b", "a"], &key));
        assert_eq!(names(&entries), vec!["b", "a"]);
        assert!(logs_contain("declared more than once"));
    }

    #[test]
    fn test_order_entries_is_idempotent() {
        let root = tree(&["[...all]", "z", "[x]", "index", "a"]);
        let once = sort_screens(Some(&*root), &ContextKey::root(), Vec::new());
        let twice = order_entries(once.clone());
        assert_eq!(names(&once), names(&twice));
    }
}
