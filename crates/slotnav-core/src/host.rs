//! Synchronous reference host.
//!
//! [`Element`] is a minimal element tree and [`Runtime`] renders it into an
//! [`Output`] tree in one pass. Navigator boundaries stay visible in the
//! output, which makes wrapper counts and identity keys easy to check. The
//! CLI renders manifests with it; UI hosts implement [`HostElement`] for
//! their own element type instead.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::context::{ContextKey, resolve_context_key};
use crate::error::NavigatorError;
use crate::flags::FlagSet;
use crate::navigation::{Navigation, NavigationStore, NavigatorMemo};
use crate::navigator::{NavigatorConfig, mount_navigator, require_navigator};
use crate::publish::NavigatorContext;
use crate::route::RouteNode;
use crate::router::RouterHandle;
use crate::screen::{Child, Screen, ScreenOptions};
use crate::slot::{self, QualifiedToken, SlotState};
use crate::view::HostElement;

// ============================================================================
// Elements
// ============================================================================

/// Something the runtime can render. `V` is the host's leaf payload.
pub enum Element<V> {
    Empty,
    View(V),
    Fragment(Vec<Element<V>>),
    Keyed { key: String, child: Box<Element<V>> },
    /// Renders the node with the node as route scope. A node without a
    /// renderer falls back to [`Element::DefaultNavigator`].
    Route(Arc<RouteNode<Element<V>>>),
    Navigator(NavigatorProps<V>),
    /// A non-custom navigator holding a single slot.
    DefaultNavigator,
    /// Renders the active route of the navigator for the current route scope,
    /// wrapping itself in one with this configuration when needed.
    Slot(NavigatorConfig),
    /// Renders the ambient navigator's active route without checking scope.
    QualifiedSlot(QualifiedToken),
}

impl<V> Element<V> {
    pub fn view(value: V) -> Self {
        Element::View(value)
    }

    pub fn fragment(children: impl IntoIterator<Item = Element<V>>) -> Self {
        Element::Fragment(children.into_iter().collect())
    }

    pub fn navigator(props: NavigatorProps<V>) -> Self {
        Element::Navigator(props)
    }

    pub fn slot() -> Self {
        Element::Slot(NavigatorConfig::default())
    }

    pub fn slot_with(config: NavigatorConfig) -> Self {
        Element::Slot(config)
    }
}

impl<V: 'static> HostElement for Element<V> {
    fn route(node: Arc<RouteNode<Self>>) -> Self {
        Element::Route(node)
    }

    fn keyed(self, key: &str) -> Self {
        let child = match self {
            Element::Keyed { child, .. } => child,
            other => Box::new(other),
        };
        Element::Keyed {
            key: key.to_string(),
            child,
        }
    }
}

/// Props of an explicit navigator.
pub struct NavigatorProps<V> {
    pub config: NavigatorConfig,
    pub children: Vec<Child<Element<V>>>,
}

impl<V> NavigatorProps<V> {
    pub fn new() -> Self {
        Self {
            config: NavigatorConfig::default(),
            children: Vec::new(),
        }
    }

    pub fn initial_route_name(mut self, name: impl Into<String>) -> Self {
        self.config.initial_route_name = Some(name.into());
        self
    }

    pub fn screen_options(mut self, options: ScreenOptions) -> Self {
        self.config.screen_options = options;
        self
    }

    pub fn router(mut self, router: RouterHandle) -> Self {
        self.config.router = Some(router);
        self
    }

    pub fn screen(mut self, screen: Screen<Element<V>>) -> Self {
        self.children.push(Child::Screen(screen));
        self
    }

    pub fn child(mut self, element: Element<V>) -> Self {
        self.children.push(Child::Content(element));
        self
    }
}

impl<V> Default for NavigatorProps<V> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Output
// ============================================================================

/// A rendered tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Output<V> {
    Empty,
    View(V),
    Fragment(Vec<Output<V>>),
    Keyed { key: String, child: Box<Output<V>> },
    Navigator {
        context_key: ContextKey,
        children: Vec<Output<V>>,
    },
}

impl<V> Output<V> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Output::Empty)
    }

    /// Number of navigator boundaries in the tree.
    pub fn count_navigators(&self) -> usize {
        self.navigator_keys().len()
    }

    /// Context keys of every navigator boundary, depth-first.
    pub fn navigator_keys(&self) -> Vec<&ContextKey> {
        let mut keys = Vec::new();
        self.walk(&mut |node| {
            if let Output::Navigator { context_key, .. } = node {
                keys.push(context_key);
            }
        });
        keys
    }

    /// Identity keys, depth-first.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        self.walk(&mut |node| {
            if let Output::Keyed { key, .. } = node {
                keys.push(key.as_str());
            }
        });
        keys
    }

    /// Leaf payloads, depth-first.
    pub fn views(&self) -> Vec<&V> {
        let mut views = Vec::new();
        self.walk(&mut |node| {
            if let Output::View(view) = node {
                views.push(view);
            }
        });
        views
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Output<V>)) {
        visit(self);
        match self {
            Output::Empty | Output::View(_) => {}
            Output::Keyed { child, .. } => child.walk(&mut *visit),
            Output::Fragment(children) | Output::Navigator { children, .. } => {
                for child in children {
                    child.walk(&mut *visit);
                }
            }
        }
    }
}

// ============================================================================
// Runtime
// ============================================================================

/// Ambient values at one point of the element tree.
pub struct Scope<V> {
    pub route: Option<Arc<RouteNode<Element<V>>>>,
    pub navigator: Option<Arc<NavigatorContext<Element<V>>>>,
}

impl<V> Clone for Scope<V> {
    fn clone(&self) -> Self {
        Self {
            route: self.route.clone(),
            navigator: self.navigator.clone(),
        }
    }
}

impl<V> Default for Scope<V> {
    fn default() -> Self {
        Self {
            route: None,
            navigator: None,
        }
    }
}

/// The navigator context in `scope`, or a usage error.
pub fn use_navigator_context<V>(
    scope: &Scope<V>,
) -> Result<Arc<NavigatorContext<Element<V>>>, NavigatorError> {
    require_navigator(scope.navigator.as_ref(), "use_navigator_context")
}

/// Renders element trees against a [`NavigationStore`].
///
/// Memos live as long as the runtime, so rendering the same tree twice with
/// no transition in between reuses every published context.
/// A navigator that leaves the tree keeps its memo and store record, and
/// resumes both when it renders again at the same key.
pub struct Runtime<V> {
    store: NavigationStore,
    flags: FlagSet,
    memos: Mutex<HashMap<ContextKey, NavigatorMemo<Element<V>>>>,
}

impl<V: 'static> Runtime<V> {
    pub fn new(flags: FlagSet) -> Self {
        Self::with_store(NavigationStore::new(), flags)
    }

    pub fn with_store(store: NavigationStore, flags: FlagSet) -> Self {
        Self {
            store,
            flags,
            memos: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &NavigationStore {
        &self.store
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// Renders a route tree from its root.
    pub fn render(&self, root: &Arc<RouteNode<Element<V>>>) -> Result<Output<V>, NavigatorError> {
        self.render_in(Element::Route(root.clone()), &Scope::default())
    }

    /// Renders `element` under `scope`.
    pub fn render_in(
        &self,
        element: Element<V>,
        scope: &Scope<V>,
    ) -> Result<Output<V>, NavigatorError> {
        match element {
            Element::Empty => Ok(Output::Empty),
            Element::View(value) => Ok(Output::View(value)),
            Element::Fragment(children) => self.render_all(children, scope).map(Output::Fragment),
            Element::Keyed { key, child } => Ok(Output::Keyed {
                key,
                child: Box::new(self.render_in(*child, scope)?),
            }),
            Element::Route(node) => {
                let element = node.render().unwrap_or(Element::DefaultNavigator);
                let inner = Scope {
                    route: Some(node),
                    navigator: scope.navigator.clone(),
                };
                self.render_in(element, &inner)
            }
            Element::Navigator(props) => {
                self.render_navigator(&props.config, props.children, true, scope)
            }
            Element::DefaultNavigator => {
                let children = vec![Child::Content(Element::slot())];
                self.render_navigator(&NavigatorConfig::default(), children, false, scope)
            }
            Element::Slot(config) => {
                let expected = resolve_context_key(scope.route.as_deref());
                let content = match slot::enter(scope.navigator.as_deref(), &expected) {
                    SlotState::Qualified(qualified) => qualified.render(&self.flags),
                    SlotState::Unqualified(unqualified) => {
                        let wrapper = unqualified.wrap();
                        let children = vec![Child::Content(Element::QualifiedSlot(wrapper.token))];
                        return self.render_navigator(&config, children, true, scope);
                    }
                };
                self.render_content(content, scope)
            }
            Element::QualifiedSlot(token) => {
                let context = use_navigator_context(scope)?;
                let content = slot::render_qualified(token, &context, &self.flags);
                self.render_content(content, scope)
            }
        }
    }

    /// Transition handle of the navigator last published at `context_key`.
    pub fn navigation(&self, context_key: &ContextKey) -> Option<Navigation> {
        self.context(context_key)
            .map(|context| context.navigation.clone())
    }

    /// Context last published at `context_key`.
    pub fn context(&self, context_key: &ContextKey) -> Option<Arc<NavigatorContext<Element<V>>>> {
        self.memos
            .lock()
            .get(context_key)
            .and_then(|memo| memo.published.clone())
    }

    fn render_all(
        &self,
        children: Vec<Element<V>>,
        scope: &Scope<V>,
    ) -> Result<Vec<Output<V>>, NavigatorError> {
        children
            .into_iter()
            .map(|child| self.render_in(child, scope))
            .collect()
    }

    fn render_content(
        &self,
        content: Option<Element<V>>,
        scope: &Scope<V>,
    ) -> Result<Output<V>, NavigatorError> {
        match content {
            Some(element) => self.render_in(element, scope),
            None => Ok(Output::Empty),
        }
    }

    fn render_navigator(
        &self,
        config: &NavigatorConfig,
        children: Vec<Child<Element<V>>>,
        is_custom: bool,
        scope: &Scope<V>,
    ) -> Result<Output<V>, NavigatorError> {
        let context_key = resolve_context_key(scope.route.as_deref());
        let parent = scope.navigator.as_ref().map(|context| &context.navigation);

        // Released before children render, nested navigators lock it again.
        let mounted = {
            let mut memos = self.memos.lock();
            let memo = memos.entry(context_key.clone()).or_default();
            mount_navigator(
                &self.store,
                memo,
                scope.route.as_ref(),
                parent,
                config,
                children,
                is_custom,
            )
        };
        let Some(mounted) = mounted else {
            return Ok(Output::Empty);
        };

        let inner = Scope {
            route: scope.route.clone(),
            navigator: Some(mounted.context),
        };
        let children = self.render_all(mounted.other, &inner)?;
        Ok(Output::Navigator {
            context_key,
            children,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
