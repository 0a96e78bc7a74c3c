//! Context publisher.
//!
//! A navigator publishes one [`NavigatorContext`] per pass for its
//! descendants. The value is memoized: when key, state, navigation handle,
//! descriptors and router are all unchanged, the previously published `Arc`
//! is returned so consumers can compare by identity.

use std::fmt;
use std::sync::Arc;

use crate::context::ContextKey;
use crate::navigation::{BuiltNavigation, Descriptor, Descriptors, Navigation, NavigatorMemo};
use crate::router::{NavigationState, RouterHandle};

/// Ambient value a navigator exposes to its subtree.
pub struct NavigatorContext<T> {
    pub context_key: ContextKey,
    pub state: NavigationState,
    pub navigation: Navigation,
    pub descriptors: Arc<Descriptors<T>>,
    pub router: RouterHandle,
}

impl<T> NavigatorContext<T> {
    /// Descriptor of the route at `state.index`.
    pub fn active_descriptor(&self) -> Option<&Descriptor<T>> {
        let route = self.state.active()?;
        self.descriptors.get(&route.key)
    }

    fn matches(
        &self,
        context_key: &ContextKey,
        built: &BuiltNavigation<T>,
        router: &RouterHandle,
    ) -> bool {
        self.context_key == *context_key
            && self.state == built.state
            && self.navigation == built.navigation
            && Arc::ptr_eq(&self.descriptors, &built.descriptors)
            && Arc::ptr_eq(&self.router, router)
    }
}

impl<T> fmt::Debug for NavigatorContext<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigatorContext")
            .field("context_key", &self.context_key)
            .field("state", &self.state)
            .field("descriptors", &self.descriptors)
            .field("router", &self.router.name())
            .finish()
    }
}

pub(crate) fn publish<T>(
    memo: &mut NavigatorMemo<T>,
    context_key: &ContextKey,
    built: BuiltNavigation<T>,
    router: &RouterHandle,
) -> Arc<NavigatorContext<T>> {
    if let Some(published) = &memo.published
        && published.matches(context_key, &built, router)
    {
        return published.clone();
    }

    tracing::trace!(%context_key, index = built.state.index, "publishing navigator context");
    let context = Arc::new(NavigatorContext {
        context_key: context_key.clone(),
        state: built.state,
        navigation: built.navigation,
        descriptors: built.descriptors,
        router: router.clone(),
    });
    memo.published = Some(context.clone());
    context
}
