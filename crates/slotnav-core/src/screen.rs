//! Screen declarations and the navigator children filter.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::context::ContextKey;
use crate::error::ConfigWarning;
use crate::route::Renderer;

/// Route parameters, e.g. `{"slug": "hello-world"}`.
pub type Params = Map<String, Value>;

// ============================================================================
// ScreenOptions
// ============================================================================

/// Free-form per-screen options (`title`, `header_shown`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenOptions(Map<String, Value>);

impl ScreenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one option.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shallow merge: keys in `overrides` win.
    pub fn merged(&self, overrides: &ScreenOptions) -> ScreenOptions {
        let mut merged = self.0.clone();
        for (key, value) in &overrides.0 {
            merged.insert(key.clone(), value.clone());
        }
        ScreenOptions(merged)
    }
}

// ============================================================================
// Screen
// ============================================================================

/// Declares or configures one route of a navigator.
///
/// A screen whose name matches a child route configures that route. A screen
/// with its own renderer and no matching child adds a route.
pub struct Screen<T> {
    name: String,
    options: ScreenOptions,
    initial_params: Option<Params>,
    render: Option<Renderer<T>>,
}

impl<T> Screen<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: ScreenOptions::default(),
            initial_params: None,
            render: None,
        }
    }

    pub fn options(mut self, options: ScreenOptions) -> Self {
        self.options = options;
        self
    }

    pub fn initial_params(mut self, params: Params) -> Self {
        self.initial_params = Some(params);
        self
    }

    pub fn render(mut self, render: impl Fn() -> T + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn screen_options(&self) -> &ScreenOptions {
        &self.options
    }

    pub fn params(&self) -> Option<&Params> {
        self.initial_params.as_ref()
    }

    pub fn renderer(&self) -> Option<&Renderer<T>> {
        self.render.as_ref()
    }
}

impl<T> Clone for Screen<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            options: self.options.clone(),
            initial_params: self.initial_params.clone(),
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for Screen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screen")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("initial_params", &self.initial_params)
            .field("has_renderer", &self.render.is_some())
            .finish()
    }
}

// ============================================================================
// Filter
// ============================================================================

/// One child of a navigator: a screen declaration or opaque content.
pub enum Child<T, C = T> {
    Screen(Screen<T>),
    Content(C),
}

/// Caller information for [`filter_screen_children`].
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// `false` only for the implicit default navigator.
    pub is_custom: bool,
    /// Key of the navigator doing the filtering.
    pub context_key: ContextKey,
}

/// A screen tagged with the navigator that declared it.
#[derive(Debug, Clone)]
pub struct DeclaredScreen<T> {
    pub screen: Screen<T>,
    pub owner: ContextKey,
}

/// Output of [`filter_screen_children`].
pub struct FilteredChildren<T, C> {
    /// Screen declarations in declaration order.
    pub screens: Vec<DeclaredScreen<T>>,
    /// Everything else, untouched and in order.
    pub other: Vec<C>,
}

/// Splits navigator children into screens and passthrough content.
///
/// Content is never dropped, so a navigator with no screens still renders
/// its other children.
pub fn filter_screen_children<T, C>(
    children: impl IntoIterator<Item = Child<T, C>>,
    options: &FilterOptions,
) -> FilteredChildren<T, C> {
    let mut screens = Vec::new();
    let mut other = Vec::new();

    for child in children {
        match child {
            Child::Screen(screen) => screens.push(DeclaredScreen {
                screen,
                owner: options.context_key.clone(),
            }),
            Child::Content(content) => other.push(content),
        }
    }

    FilteredChildren { screens, other }
}

/// Reports a navigator that resolved no screens.
///
/// Only the default entry point warns: a custom navigator with no screens is
/// assumed intentional.
pub(crate) fn report_empty(options: &FilterOptions) {
    if !options.is_custom {
        ConfigWarning::EmptyNavigator {
            context_key: options.context_key.clone(),
        }
        .emit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options() -> FilterOptions {
        FilterOptions {
            is_custom: true,
            context_key: ContextKey::from("/blog"),
        }
    }

    #[test]
    fn test_filter_partitions_in_order() {
        let children: Vec<Child<(), &str>> = vec![
            Child::Content("header"),
            Child::Screen(Screen::new("index")),
            Child::Content("footer"),
            Child::Screen(Screen::new("[slug]")),
        ];

        let filtered = filter_screen_children(children, &options());
        let names: Vec<_> = filtered.screens.iter().map(|s| s.screen.name()).collect();
        assert_eq!(names, vec!["index", "[slug]"]);
        assert_eq!(filtered.other, vec!["header", "footer"]);
        assert!(filtered.screens.iter().all(|s| s.owner.as_str() == "/blog"));
    }

    #[test]
    fn test_filter_without_screens_keeps_content() {
        let children: Vec<Child<(), &str>> = vec![Child::Content("chrome")];
        let filtered = filter_screen_children(children, &options());
        assert!(filtered.screens.is_empty());
        assert_eq!(filtered.other, vec!["chrome"]);
    }

    #[test]
    fn test_screen_options_merge() {
        let base = ScreenOptions::new()
            .with("title", "Blog")
            .with("header_shown", true);
        let overrides = ScreenOptions::new().with("title", "Post");
        let merged = base.merged(&overrides);

        assert_eq!(merged.get("title"), Some(&json!("Post")));
        assert_eq!(merged.get("header_shown"), Some(&json!(true)));
        assert!(ScreenOptions::new().is_empty());
    }

    #[test]
    fn test_screen_builder() {
        let mut params = Params::new();
        params.insert("slug".into(), json!("intro"));
        let screen = Screen::new("[slug]").initial_params(params).render(|| 7);

        assert_eq!(screen.name(), "[slug]");
        assert_eq!(screen.params().unwrap()["slug"], json!("intro"));
        assert_eq!(screen.renderer().map(|r| r()), Some(7));
    }
}
