//! Navigation state builder.
//!
//! [`NavigationStore`] holds every navigator's [`NavigationState`] across
//! render passes. [`NavigatorInstance`] is one navigator's view of a pass: its
//! ordered entries and configuration. Building an instance reconciles the
//! stored state with the current entries and yields the transition handle
//! ([`Navigation`]) and per-route [`Descriptors`].
//!
//! State only changes through [`Navigation::dispatch`], which runs the
//! navigator's [`Router`](crate::Router) under the store's write lock.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::context::ContextKey;
use crate::error::ConfigWarning;
use crate::navigator::NavigatorConfig;
use crate::ordering::RouteEntry;
use crate::publish::{self, NavigatorContext};
use crate::route::RouteNode;
use crate::router::{self, Action, NavigationState, RouteRef, RouterHandle, RouterOptions};
use crate::screen::{Params, ScreenOptions};
use crate::view::HostElement;

// ============================================================================
// NavigationStore
// ============================================================================

type Listener = Arc<dyn Fn(&ContextKey) + Send + Sync>;

/// Handle returned by [`NavigationStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Record {
    state: NavigationState,
    table: Vec<RouteRef>,
    router: RouterHandle,
}

struct StoreInner {
    records: RwLock<HashMap<ContextKey, Record>>,
    listeners: RwLock<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

/// Per-host navigation memory, keyed by [`ContextKey`].
///
/// Records live as long as the store. A navigator that unmounts and mounts
/// again at the same key resumes its previous state, provided its route
/// names are unchanged. Drop the store to forget every navigator.
///
/// Cloning shares the same store.
#[derive(Clone)]
pub struct NavigationStore {
    inner: Arc<StoreInner>,
}

impl NavigationStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                records: RwLock::new(HashMap::new()),
                listeners: RwLock::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Current state of the navigator at `context_key`.
    pub fn state(&self, context_key: &ContextKey) -> Option<NavigationState> {
        self.inner
            .records
            .read()
            .get(context_key)
            .map(|record| record.state.clone())
    }

    /// Keys of every navigator with stored state, sorted.
    pub fn keys(&self) -> Vec<ContextKey> {
        let mut keys: Vec<_> = self.inner.records.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Registers a listener called with the key of every navigator whose
    /// state changes. Listeners run after the store lock is released.
    pub fn subscribe(
        &self,
        listener: impl Fn(&ContextKey) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.listeners.write().push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.listeners.write().retain(|(existing, _)| *existing != id);
    }

    /// Returns the stored state when the route table is unchanged, otherwise
    /// recomputes initial state and stores it.
    pub(crate) fn reconcile(
        &self,
        context_key: &ContextKey,
        table: &[RouteRef],
        router: &RouterHandle,
        options: &RouterOptions,
    ) -> NavigationState {
        let mut records = self.inner.records.write();
        if let Some(record) = records.get(context_key)
            && Arc::ptr_eq(&record.router, router)
            && same_routes(&record.table, table)
        {
            return record.state.clone();
        }

        let state = router.initial_state(context_key, table, options);
        tracing::debug!(
            %context_key,
            router = router.name(),
            index = state.index,
            "navigation state initialized"
        );
        records.insert(
            context_key.clone(),
            Record {
                state: state.clone(),
                table: table.to_vec(),
                router: router.clone(),
            },
        );
        state
    }

    /// Applies `action` to one navigator. `false` when the navigator has no
    /// state or its router does not handle the action.
    pub(crate) fn dispatch(&self, context_key: &ContextKey, action: &Action) -> bool {
        let changed = {
            let mut records = self.inner.records.write();
            let Some(record) = records.get_mut(context_key) else {
                return false;
            };
            let Some(next) = record.router.apply(&record.state, &record.table, action) else {
                return false;
            };

            tracing::debug!(
                %context_key,
                action = action.kind(),
                from = record.state.index,
                to = next.index,
                "navigation state transition"
            );
            let changed = next != record.state;
            record.state = next;
            changed
        };

        if changed {
            self.notify(context_key);
        }
        true
    }

    fn notify(&self, context_key: &ContextKey) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(context_key);
        }
    }

    fn same_store(&self, other: &NavigationStore) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for NavigationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NavigationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationStore")
            .field("navigators", &self.keys())
            .finish()
    }
}

fn same_routes(a: &[RouteRef], b: &[RouteRef]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.name == y.name)
}

// ============================================================================
// Navigation
// ============================================================================

struct NavigationInner {
    context_key: ContextKey,
    store: NavigationStore,
    parent: Option<Navigation>,
}

/// Transition handle of one navigator.
///
/// Equality is identity: a navigator keeps the same handle across passes as
/// long as its key, store and parent are unchanged.
#[derive(Clone)]
pub struct Navigation {
    inner: Arc<NavigationInner>,
}

impl Navigation {
    fn new(context_key: ContextKey, store: NavigationStore, parent: Option<Navigation>) -> Self {
        Self {
            inner: Arc::new(NavigationInner {
                context_key,
                store,
                parent,
            }),
        }
    }

    #[inline]
    pub fn context_key(&self) -> &ContextKey {
        &self.inner.context_key
    }

    /// Current state of this navigator.
    pub fn state(&self) -> Option<NavigationState> {
        self.inner.store.state(&self.inner.context_key)
    }

    /// Applies `action` here, or in the nearest ancestor that handles it.
    ///
    /// Returns `false` (and logs) when no navigator up the chain does.
    pub fn dispatch(&self, action: Action) -> bool {
        let mut current = Some(self);
        while let Some(navigation) = current {
            if navigation.inner.store.dispatch(navigation.context_key(), &action) {
                return true;
            }
            current = navigation.inner.parent.as_ref();
        }

        ConfigWarning::UnhandledAction {
            context_key: self.context_key().clone(),
            action: action.kind(),
        }
        .emit();
        false
    }

    pub fn navigate(&self, name: impl Into<String>) -> bool {
        self.dispatch(Action::navigate(name))
    }

    pub fn navigate_with(&self, name: impl Into<String>, params: Params) -> bool {
        self.dispatch(Action::navigate_with(name, params))
    }

    pub fn push(&self, name: impl Into<String>) -> bool {
        self.dispatch(Action::push(name))
    }

    pub fn replace(&self, name: impl Into<String>) -> bool {
        self.dispatch(Action::replace(name))
    }

    pub fn pop(&self, count: usize) -> bool {
        self.dispatch(Action::Pop(count))
    }

    pub fn pop_to_top(&self) -> bool {
        self.dispatch(Action::PopToTop)
    }

    pub fn set_index(&self, index: usize) -> bool {
        self.dispatch(Action::SetIndex(index))
    }

    /// The direct parent, or with `id` the nearest ancestor at that key.
    pub fn parent(&self, id: Option<&ContextKey>) -> Option<&Navigation> {
        let mut current = self.inner.parent.as_ref();
        let Some(id) = id else {
            return current;
        };

        while let Some(navigation) = current {
            if navigation.context_key() == id {
                return Some(navigation);
            }
            current = navigation.inner.parent.as_ref();
        }
        None
    }

    fn is_for(
        &self,
        context_key: &ContextKey,
        store: &NavigationStore,
        parent: Option<&Navigation>,
    ) -> bool {
        self.inner.context_key == *context_key
            && self.inner.store.same_store(store)
            && self.inner.parent.as_ref() == parent
    }
}

impl PartialEq for Navigation {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Navigation {}

impl fmt::Debug for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigation")
            .field("context_key", &self.inner.context_key)
            .field(
                "parent",
                &self.inner.parent.as_ref().map(Navigation::context_key),
            )
            .finish()
    }
}

// ============================================================================
// Descriptors
// ============================================================================

/// Render handle for one route in navigation state.
pub struct Descriptor<T> {
    route: RouteRef,
    options: ScreenOptions,
    node: Arc<RouteNode<T>>,
}

impl<T> Descriptor<T> {
    pub fn route(&self) -> &RouteRef {
        &self.route
    }

    /// Navigator `screen_options` merged with the screen's own options.
    pub fn options(&self) -> &ScreenOptions {
        &self.options
    }

    pub fn node(&self) -> &Arc<RouteNode<T>> {
        &self.node
    }
}

impl<T: HostElement> Descriptor<T> {
    /// Materializes the route's element, keyed by the route key.
    pub fn render(&self) -> T {
        T::route(self.node.clone()).keyed(&self.route.key)
    }
}

/// Descriptors of one navigator, keyed by route key.
pub struct Descriptors<T> {
    by_key: HashMap<String, Descriptor<T>>,
}

impl<T> Descriptors<T> {
    pub fn get(&self, key: &str) -> Option<&Descriptor<T>> {
        self.by_key.get(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.by_key.keys().map(String::as_str)
    }
}

impl<T> fmt::Debug for Descriptors<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("Descriptors").field("keys", &keys).finish()
    }
}

/// What a descriptor is built from. Nodes are compared by position and
/// shape, not by address, so a rebuilt tree or a synthetic screen node
/// with the same layout reuses the previous descriptors.
#[derive(PartialEq)]
struct DescriptorSource {
    route: RouteRef,
    entry_key: String,
    node_route: String,
    node_context_key: ContextKey,
    is_layout: bool,
    has_renderer: bool,
    options: ScreenOptions,
}

impl DescriptorSource {
    fn new<T>(route: &RouteRef, entry: &RouteEntry<T>, options: ScreenOptions) -> Self {
        Self {
            route: route.clone(),
            entry_key: entry.key.clone(),
            node_route: entry.node.route().to_string(),
            node_context_key: entry.node.context_key().clone(),
            is_layout: entry.node.is_layout(),
            has_renderer: entry.node.renderer().is_some(),
            options,
        }
    }
}

// ============================================================================
// NavigatorInstance
// ============================================================================

/// Values a navigator keeps between passes so unchanged inputs produce
/// identical outputs.
pub struct NavigatorMemo<T> {
    navigation: Option<Navigation>,
    descriptors: Option<(Vec<DescriptorSource>, Arc<Descriptors<T>>)>,
    pub(crate) published: Option<Arc<NavigatorContext<T>>>,
}

impl<T> Default for NavigatorMemo<T> {
    fn default() -> Self {
        Self {
            navigation: None,
            descriptors: None,
            published: None,
        }
    }
}

/// Output of [`NavigatorInstance::build`].
pub struct BuiltNavigation<T> {
    pub state: NavigationState,
    pub navigation: Navigation,
    pub descriptors: Arc<Descriptors<T>>,
}

/// One navigator's ordered entries and configuration for a render pass.
pub struct NavigatorInstance<T> {
    context_key: ContextKey,
    entries: Vec<RouteEntry<T>>,
    table: Vec<RouteRef>,
    screen_options: ScreenOptions,
    options: RouterOptions,
    router: RouterHandle,
    parent: Option<Navigation>,
}

impl<T> NavigatorInstance<T> {
    pub fn new(
        context_key: ContextKey,
        entries: Vec<RouteEntry<T>>,
        config: &NavigatorConfig,
        parent: Option<Navigation>,
    ) -> Self {
        let table = entries.iter().map(RouteEntry::route_ref).collect();
        Self {
            context_key,
            entries,
            table,
            screen_options: config.screen_options.clone(),
            options: RouterOptions {
                initial_route_name: config.initial_route_name.clone(),
            },
            router: config.router.clone().unwrap_or_else(router::stack),
            parent,
        }
    }

    #[inline]
    pub fn context_key(&self) -> &ContextKey {
        &self.context_key
    }

    /// The ordered route table.
    pub fn entries(&self) -> &[RouteEntry<T>] {
        &self.entries
    }

    pub fn router(&self) -> &RouterHandle {
        &self.router
    }

    /// Reconciles this navigator's state with the store.
    ///
    /// With the same key and entries and no transition in between, repeated
    /// builds return equal state and the same navigation and descriptor
    /// handles.
    pub fn build(
        &self,
        store: &NavigationStore,
        memo: &mut NavigatorMemo<T>,
    ) -> BuiltNavigation<T> {
        let state = store.reconcile(&self.context_key, &self.table, &self.router, &self.options);

        let navigation = match &memo.navigation {
            Some(navigation)
                if navigation.is_for(&self.context_key, store, self.parent.as_ref()) =>
            {
                navigation.clone()
            }
            _ => {
                let navigation =
                    Navigation::new(self.context_key.clone(), store.clone(), self.parent.clone());
                memo.navigation = Some(navigation.clone());
                navigation
            }
        };

        let descriptors = self.descriptors(&state, memo);
        BuiltNavigation {
            state,
            navigation,
            descriptors,
        }
    }

    /// Builds and publishes the navigator's context.
    pub fn publish(
        &self,
        store: &NavigationStore,
        memo: &mut NavigatorMemo<T>,
    ) -> Arc<NavigatorContext<T>> {
        let built = self.build(store, memo);
        publish::publish(memo, &self.context_key, built, &self.router)
    }

    fn descriptors(
        &self,
        state: &NavigationState,
        memo: &mut NavigatorMemo<T>,
    ) -> Arc<Descriptors<T>> {
        let sources: Vec<(DescriptorSource, &RouteEntry<T>)> = state
            .routes
            .iter()
            .filter_map(|route| {
                let entry = self.entries.iter().find(|entry| entry.name == route.name)?;
                let options = self.screen_options.merged(&entry.meta.options);
                Some((DescriptorSource::new(route, entry, options), entry))
            })
            .collect();

        if let Some((fingerprint, descriptors)) = &memo.descriptors
            && fingerprint.len() == sources.len()
            && fingerprint.iter().zip(&sources).all(|(old, (new, _))| old == new)
        {
            return descriptors.clone();
        }

        let by_key = sources
            .iter()
            .map(|(source, entry)| {
                let descriptor = Descriptor {
                    route: source.route.clone(),
                    options: source.options.clone(),
                    node: entry.node.clone(),
                };
                (source.route.key.clone(), descriptor)
            })
            .collect();
        let descriptors = Arc::new(Descriptors { by_key });
        let fingerprint = sources.into_iter().map(|(source, _)| source).collect();
        memo.descriptors = Some((fingerprint, descriptors.clone()));
        descriptors
    }
}

impl<T> fmt::Debug for NavigatorInstance<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigatorInstance")
            .field("context_key", &self.context_key)
            .field("entries", &self.entries)
            .field("router", &self.router.name())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::ordering::sort_screens;
    use crate::route::RouteTree;
    use tracing_test::traced_test;

    #[derive(Debug, PartialEq)]
    enum El {
        Route(ContextKey),
        Keyed(String, Box<El>),
    }

    impl HostElement for El {
        fn route(node: Arc<RouteNode<Self>>) -> Self {
            El::Route(node.context_key().clone())
        }

        fn keyed(self, key: &str) -> Self {
            match self {
                El::Keyed(_, inner) => El::Keyed(key.to_string(), inner),
                other => El::Keyed(key.to_string(), Box::new(other)),
            }
        }
    }

    fn instance(config: NavigatorConfig) -> NavigatorInstance<El> {
        let tree = RouteTree::new()
            .route("a", || El::Route(ContextKey::root()))
            .route("b", || El::Route(ContextKey::root()))
            .route("c", || El::Route(ContextKey::root()))
            .build();
        let entries = sort_screens(Some(&*tree), &ContextKey::root(), Vec::new());
        NavigatorInstance::new(ContextKey::root(), entries, &config, None)
    }

    fn active_name(built: &BuiltNavigation<El>) -> &str {
        &built.state.active().unwrap().name
    }

    #[test]
    fn test_initial_route_resolution() {
        let store = NavigationStore::new();
        let mut memo = NavigatorMemo::default();
        let built = instance(NavigatorConfig::default()).build(&store, &mut memo);
        assert_eq!(active_name(&built), "a");

        let store = NavigationStore::new();
        let config = NavigatorConfig::default().initial_route_name("b");
        let built = instance(config).build(&store, &mut NavigatorMemo::default());
        assert_eq!(active_name(&built), "b");
    }

    #[test]
    #[traced_test]
    fn test_unknown_initial_route_uses_first_entry() {
        let store = NavigationStore::new();
        let config = NavigatorConfig::default()
            .initial_route_name("z")
            .router(router::single_active());
        let built = instance(config).build(&store, &mut NavigatorMemo::default());
        assert_eq!(built.state.index, 0);
        assert_eq!(active_name(&built), "a");
        assert!(logs_contain("initial route \"z\" does not match"));
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let config = NavigatorConfig::default().router(router::single_active());
        let (first_store, second_store) = (NavigationStore::new(), NavigationStore::new());
        let first = instance(config.clone()).build(&first_store, &mut NavigatorMemo::default());
        let second = instance(config).build(&second_store, &mut NavigatorMemo::default());

        assert_eq!(first.state.index, second.state.index);
        assert_eq!(
            first.state.route_keys().collect::<Vec<_>>(),
            second.state.route_keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_rebuild_reuses_handles() {
        let store = NavigationStore::new();
        let mut memo = NavigatorMemo::default();
        let navigator = instance(NavigatorConfig::default());

        let first = navigator.publish(&store, &mut memo);
        let second = navigator.publish(&store, &mut memo);
        assert!(Arc::ptr_eq(&first, &second));

        // A fresh instance with the same inputs, as on the next render pass.
        let third = instance(NavigatorConfig::default()).publish(&store, &mut memo);
        assert!(Arc::ptr_eq(&first.descriptors, &third.descriptors));
        assert_eq!(first.navigation, third.navigation);
    }

    #[test]
    fn test_transition_survives_rebuild_and_republishes() {
        let store = NavigationStore::new();
        let mut memo = NavigatorMemo::default();
        let navigator = instance(NavigatorConfig::default().router(router::single_active()));

        let before = navigator.publish(&store, &mut memo);
        assert!(before.navigation.navigate("c"));

        let after = navigator.publish(&store, &mut memo);
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.state.active().unwrap().name, "c");
        // Same route refs, so descriptors are reused.
        assert!(Arc::ptr_eq(&before.descriptors, &after.descriptors));
    }

    #[test]
    fn test_changed_entries_recompute_state() {
        let store = NavigationStore::new();
        let mut memo = NavigatorMemo::default();
        let config = NavigatorConfig::default().router(router::single_active());
        let built = instance(config.clone()).build(&store, &mut memo);
        built.navigation.navigate("c");

        let tree = RouteTree::new()
            .route("a", || El::Route(ContextKey::root()))
            .build();
        let entries = sort_screens(Some(&*tree), &ContextKey::root(), Vec::new());
        let shrunk = NavigatorInstance::new(ContextKey::root(), entries, &config, None);
        let rebuilt = shrunk.build(&store, &mut memo);

        assert_eq!(rebuilt.state.route_names().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(rebuilt.state.index, 0);
        assert_eq!(rebuilt.descriptors.len(), 1);
    }

    #[test]
    fn test_descriptor_render_is_keyed() {
        let store = NavigationStore::new();
        let mut memo = NavigatorMemo::default();
        let built = instance(NavigatorConfig::default()).build(&store, &mut memo);
        let descriptor = built.descriptors.get("/:a").unwrap();

        assert_eq!(
            descriptor.render(),
            El::Keyed("/:a".into(), Box::new(El::Route(ContextKey::from("/a"))))
        );
    }

    #[test]
    fn test_descriptor_options_merge_screen_options() {
        let store = NavigationStore::new();
        let options = ScreenOptions::new().with("title", "App");
        let config = NavigatorConfig::default().screen_options(options);
        let built = instance(config).build(&store, &mut NavigatorMemo::default());
        let options = built.descriptors.get("/:a").unwrap().options();
        assert_eq!(options.get("title"), Some(&serde_json::json!("App")));
    }

    #[test]
    fn test_listeners_fire_on_change_only() {
        let store = NavigationStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let id = store.subscribe({
            let calls = calls.clone();
            move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });

        let built = instance(NavigatorConfig::default().router(router::single_active()))
            .build(&store, &mut NavigatorMemo::default());
        assert!(built.navigation.navigate("a"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(built.navigation.navigate("b"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        store.unsubscribe(id);
        assert!(built.navigation.set_index(2));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unhandled_action_bubbles_to_parent() {
        let store = NavigationStore::new();
        let mut memo = NavigatorMemo::default();
        let parent = instance(NavigatorConfig::default()).build(&store, &mut memo);

        let tree = RouteTree::new()
            .route("_layout", || El::Route(ContextKey::root()))
            .route("tabs/_layout", || El::Route(ContextKey::root()))
            .route("tabs/one", || El::Route(ContextKey::root()))
            .build();
        let tabs_node = tree.child("tabs").unwrap();
        let entries = sort_screens(Some(&**tabs_node), tabs_node.context_key(), Vec::new());
        let child = NavigatorInstance::new(
            tabs_node.context_key().clone(),
            entries,
            &NavigatorConfig::default().router(router::single_active()),
            Some(parent.navigation.clone()),
        )
        .build(&store, &mut NavigatorMemo::default());

        // Single-active cannot push; the parent stack can.
        assert!(child.navigation.push("b"));
        let parent_state = store.state(&ContextKey::root()).unwrap();
        assert_eq!(parent_state.route_names().collect::<Vec<_>>(), vec!["a", "b"]);

        assert_eq!(child.navigation.parent(None), Some(&parent.navigation));
        let root = ContextKey::root();
        assert_eq!(child.navigation.parent(Some(&root)), Some(&parent.navigation));
        assert_eq!(child.navigation.parent(Some(&ContextKey::from("/nope"))), None);
    }

    #[test]
    #[traced_test]
    fn test_unhandled_action_at_root_warns() {
        let store = NavigationStore::new();
        let mut memo = NavigatorMemo::default();
        let built = instance(NavigatorConfig::default()).build(&store, &mut memo);
        assert!(!built.navigation.pop(1));
        assert!(logs_contain("action POP was not handled"));
    }

    #[test]
    fn test_store_keys() {
        let store = NavigationStore::new();
        instance(NavigatorConfig::default()).build(&store, &mut NavigatorMemo::default());
        assert_eq!(store.keys(), vec![ContextKey::root()]);
        assert!(store.state(&ContextKey::from("/missing")).is_none());
    }

    #[test]
    fn test_state_survives_remount() {
        let store = NavigationStore::new();
        let id = store.subscribe(|_| {});
        let mut memo = NavigatorMemo::default();
        let mounted = instance(NavigatorConfig::default()).build(&store, &mut memo);
        assert!(mounted.navigation.navigate("b"));
        store.unsubscribe(id);
        drop(mounted);

        let mut fresh = NavigatorMemo::default();
        let remounted = instance(NavigatorConfig::default()).build(&store, &mut fresh);
        assert_eq!(active_name(&remounted), "b");
        assert_eq!(store.keys(), vec![ContextKey::root()]);
    }
}
