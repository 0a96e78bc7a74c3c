//! Leptos bindings for the navigator engine.
//!
//! - [`Navigator`] - an explicit navigator for the current route scope
//! - [`Slot`] - renders the active route, wrapping itself in a navigator when
//!   none exists for its scope
//! - [`QualifiedSlot`] - the inner half of a wrapped slot
//! - [`DefaultNavigator`] - what a route without its own renderer shows
//! - [`RouteRoot`] - mounts a route tree
//!
//! Route scope and navigator scope travel through Leptos context. A navigator
//! subscribes to the [`NavigationStore`] and republishes its context into a
//! signal whenever its state changes; slots read that signal.

use std::sync::Arc;

use leptos::context::Provider;
use leptos::prelude::*;
use parking_lot::Mutex;
use slotnav_core::slot::{self, QualifiedToken, SlotState};
use slotnav_core::{
    Child, ContextKey, FlagSet, HostElement, Navigation, NavigationState, NavigationStore,
    NavigatorConfig, NavigatorContext, NavigatorError, NavigatorMemo, RouteNode, RouterHandle,
    Screen, ScreenOptions, mount_navigator, resolve_context_key,
};

// ============================================================================
// SlotView
// ============================================================================

type PageFn = Arc<dyn Fn() -> AnyView + Send + Sync>;

enum SlotKind {
    Route(Arc<RouteNode<SlotView>>),
    Page(PageFn),
}

/// Element type of the Leptos host.
///
/// Route files render to a `SlotView`; build one with [`SlotView::page`].
pub struct SlotView {
    key: Option<String>,
    kind: SlotKind,
}

impl SlotView {
    /// A view produced by `render` each time the route mounts.
    pub fn page<F, V>(render: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: IntoView + 'static,
    {
        Self {
            key: None,
            kind: SlotKind::Page(Arc::new(move || render().into_any())),
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn into_view(self) -> AnyView {
        match self.kind {
            SlotKind::Route(node) => {
                if let Some(key) = &self.key {
                    tracing::trace!(%key, context_key = %node.context_key(), "rendering route");
                }
                let route = RouteContext(node.clone());
                view! { <Provider value=route>{route_body(node)}</Provider> }.into_any()
            }
            SlotKind::Page(render) => render(),
        }
    }
}

impl HostElement for SlotView {
    fn route(node: Arc<RouteNode<Self>>) -> Self {
        Self {
            key: None,
            kind: SlotKind::Route(node),
        }
    }

    fn keyed(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }
}

fn route_body(node: Arc<RouteNode<SlotView>>) -> AnyView {
    match node.render() {
        Some(content) => content.into_view(),
        None => view! { <DefaultNavigator /> }.into_any(),
    }
}

// ============================================================================
// Context
// ============================================================================

/// Store and flags shared by every navigator under one root.
#[derive(Clone, Default)]
pub struct NavigatorHost {
    pub store: NavigationStore,
    pub flags: FlagSet,
}

impl NavigatorHost {
    pub fn new(flags: FlagSet) -> Self {
        Self {
            store: NavigationStore::new(),
            flags,
        }
    }

    /// The provided host, or a fresh one provided at the current owner.
    fn current() -> Self {
        use_context::<Self>().unwrap_or_else(|| {
            let host = Self::default();
            provide_context(host.clone());
            host
        })
    }
}

/// The ambient route scope.
#[derive(Clone)]
pub struct RouteContext(pub Arc<RouteNode<SlotView>>);

/// The ambient navigator, as seen by its subtree.
#[derive(Clone)]
pub struct NavigatorScope {
    pub context: ArcRwSignal<Arc<NavigatorContext<SlotView>>>,
}

impl NavigatorScope {
    pub fn context_key(&self) -> ContextKey {
        self.context
            .with_untracked(|context| context.context_key.clone())
    }

    /// Transition handle. Stable for the navigator's lifetime.
    pub fn navigation(&self) -> Navigation {
        self.context
            .with_untracked(|context| context.navigation.clone())
    }

    /// Current state, tracked.
    pub fn state(&self) -> NavigationState {
        self.context.with(|context| context.state.clone())
    }

    /// Options of the active route, tracked.
    pub fn active_options(&self) -> ScreenOptions {
        self.context.with(|context| {
            context
                .active_descriptor()
                .map(|descriptor| descriptor.options().clone())
                .unwrap_or_default()
        })
    }
}

/// The enclosing navigator, or a usage error outside any navigator.
pub fn use_navigator_context() -> Result<NavigatorScope, NavigatorError> {
    use_context::<NavigatorScope>().ok_or(NavigatorError::OutsideNavigator {
        accessor: "use_navigator_context",
    })
}

fn current_route() -> Option<Arc<RouteNode<SlotView>>> {
    use_context::<RouteContext>().map(|route| route.0)
}

// ============================================================================
// Components
// ============================================================================

/// Mounts `tree` at its root.
#[component]
pub fn RouteRoot(tree: Arc<RouteNode<SlotView>>) -> impl IntoView {
    SlotView::route(tree).into_view()
}

/// An explicit navigator for the current route scope.
///
/// `screens` configure (or add) routes; `children` render inside the
/// navigator's scope and usually include a [`Slot`].
#[component]
pub fn Navigator(
    #[prop(optional, into)] initial_route_name: Option<String>,
    #[prop(optional)] screen_options: ScreenOptions,
    #[prop(optional)] screens: Vec<Screen<SlotView>>,
    #[prop(optional)] router: Option<RouterHandle>,
    #[prop(optional)] children: Option<ChildrenFn>,
) -> impl IntoView {
    let config = NavigatorConfig {
        initial_route_name,
        screen_options,
        router,
    };
    let children = screens
        .into_iter()
        .map(Child::Screen)
        .chain(children.map(Child::Content))
        .collect();
    render_navigator(config, children, true)
}

/// Renders the active route of the navigator for the current route scope.
///
/// Without such a navigator in scope, mounts one (configured by the props)
/// around a [`QualifiedSlot`] instead.
#[component]
pub fn Slot(
    #[prop(optional, into)] initial_route_name: Option<String>,
    #[prop(optional)] screen_options: ScreenOptions,
    #[prop(optional)] router: Option<RouterHandle>,
) -> impl IntoView {
    let expected = resolve_context_key(current_route().as_deref());
    let ambient = use_context::<NavigatorScope>().map(|scope| scope.context.get_untracked());

    match slot::enter(ambient.as_deref(), &expected) {
        SlotState::Qualified(qualified) => {
            let token = qualified.into_token();
            view! { <QualifiedSlot token=token /> }.into_any()
        }
        SlotState::Unqualified(unqualified) => {
            let token = unqualified.wrap().token;
            let config = NavigatorConfig {
                initial_route_name,
                screen_options,
                router,
            };
            let inner: ChildrenFn =
                Arc::new(move || view! { <QualifiedSlot token=token /> }.into_any());
            render_navigator(config, vec![Child::Content(inner)], true)
        }
    }
}

/// Renders the ambient navigator's active route without checking scope.
#[component]
pub fn QualifiedSlot(token: QualifiedToken) -> impl IntoView {
    let flags = NavigatorHost::current().flags;
    let scope = use_navigator_context();

    move || match &scope {
        Ok(scope) => {
            let context = scope.context.get();
            let qualified = slot::render_qualified(token, &context, &flags);
            Ok(qualified.map(SlotView::into_view))
        }
        Err(err) => Err(err.clone()),
    }
}

/// A non-custom navigator holding a single [`Slot`].
#[component]
pub fn DefaultNavigator() -> impl IntoView {
    let slot: ChildrenFn = Arc::new(|| view! { <Slot /> }.into_any());
    let children = vec![Child::Content(slot)];
    render_navigator(NavigatorConfig::default(), children, false)
}

fn render_navigator(
    config: NavigatorConfig,
    children: Vec<Child<SlotView, ChildrenFn>>,
    is_custom: bool,
) -> AnyView {
    let host = NavigatorHost::current();
    let route = current_route();
    let parent = use_context::<NavigatorScope>().map(|scope| scope.navigation());

    let mut memo = NavigatorMemo::default();
    let Some(mounted) = mount_navigator(
        &host.store,
        &mut memo,
        route.as_ref(),
        parent.as_ref(),
        &config,
        children,
        is_custom,
    ) else {
        return ().into_any();
    };

    let context = ArcRwSignal::new(mounted.context);
    let instance = Arc::new(mounted.instance);
    let memo = Arc::new(Mutex::new(memo));

    let subscription = host.store.subscribe({
        let store = host.store.clone();
        let context = context.clone();
        move |changed: &ContextKey| {
            if changed != instance.context_key() {
                return;
            }
            let published = instance.publish(&store, &mut memo.lock());
            if !Arc::ptr_eq(&published, &context.get_untracked()) {
                context.set(published);
            }
        }
    });
    let store = host.store.clone();
    on_cleanup(move || store.unsubscribe(subscription));

    let scope = NavigatorScope { context };
    let content = mounted.other;
    view! {
        <Provider value=scope>
            {content.into_iter().map(|child| child()).collect_view()}
        </Provider>
    }
    .into_any()
}

// ============================================================================
// Tests
// ============================================================================
