//! File-system-shaped route tree.
//!
//! Route files are given as extension-less paths relative to the app root:
//!
//! - `_layout` - the directory renders a nested navigator
//! - `index` - the directory's default screen
//! - `[slug]` - dynamic segment
//! - `[...rest]` - catch-all segment
//! - `(group)` - grouping directory that adds no specificity
//!
//! A directory without `_layout` is flattened into the nearest layout's
//! children, its files named with `/`-joined paths (`settings/profile`).

use std::fmt;
use std::sync::Arc;

use crate::config::{INDEX_ROUTE, LAYOUT_ROUTE, PATH_SEPARATOR};
use crate::context::ContextKey;

/// Lazily invoked content producer for a route.
pub type Renderer<T> = Arc<dyn Fn() -> T + Send + Sync>;

// ============================================================================
// Segments
// ============================================================================

/// One path segment of a route name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal segment (`about`, `index`).
    Static(&'a str),
    /// Grouping directory (`(tabs)`), matches no URL segment.
    Group(&'a str),
    /// Dynamic segment (`[slug]`), carries the parameter name.
    Dynamic(&'a str),
    /// Catch-all segment (`[...rest]`), carries the parameter name.
    CatchAll(&'a str),
}

impl<'a> Segment<'a> {
    pub fn parse(raw: &'a str) -> Self {
        if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            match inner.strip_prefix("...") {
                Some(name) => Self::CatchAll(name),
                None => Self::Dynamic(inner),
            }
        } else if let Some(inner) = raw.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            Self::Group(inner)
        } else {
            Self::Static(raw)
        }
    }
}

/// Specificity class of a route name. Lower classes sort first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Specificity {
    /// No dynamic or catch-all segment.
    Static,
    /// At least one `[param]` segment.
    Dynamic,
    /// At least one `[...param]` segment.
    CatchAll,
}

impl Specificity {
    /// Classifies a route name by its most general segment.
    pub fn of(route: &str) -> Self {
        route
            .split(PATH_SEPARATOR)
            .map(|raw| match Segment::parse(raw) {
                Segment::Static(_) | Segment::Group(_) => Self::Static,
                Segment::Dynamic(_) => Self::Dynamic,
                Segment::CatchAll(_) => Self::CatchAll,
            })
            .max()
            .unwrap_or(Self::Static)
    }
}

/// Whether a route name is a directory's default screen.
pub fn is_index_route(route: &str) -> bool {
    route.rsplit(PATH_SEPARATOR).next() == Some(INDEX_ROUTE)
}

// ============================================================================
// RouteNode
// ============================================================================

/// One route file or layout directory.
pub struct RouteNode<T> {
    route: String,
    context_key: ContextKey,
    layout: bool,
    render: Option<Renderer<T>>,
    children: Vec<Arc<RouteNode<T>>>,
}

impl<T> RouteNode<T> {
    /// A route without children.
    pub fn leaf(
        route: impl Into<String>,
        context_key: ContextKey,
        render: Option<Renderer<T>>,
    ) -> Self {
        Self {
            route: route.into(),
            context_key,
            layout: false,
            render,
            children: Vec::new(),
        }
    }

    /// A layout directory. `render` is `None` when the directory has no
    /// `_layout` file (only possible at the root).
    pub fn layout(
        route: impl Into<String>,
        context_key: ContextKey,
        render: Option<Renderer<T>>,
        children: Vec<Arc<RouteNode<T>>>,
    ) -> Self {
        Self {
            route: route.into(),
            context_key,
            layout: true,
            render,
            children,
        }
    }

    /// Route name relative to the parent layout.
    #[inline]
    pub fn route(&self) -> &str {
        &self.route
    }

    #[inline]
    pub fn context_key(&self) -> &ContextKey {
        &self.context_key
    }

    #[inline]
    pub fn is_layout(&self) -> bool {
        self.layout
    }

    /// Child routes in declaration order.
    #[inline]
    pub fn children(&self) -> &[Arc<RouteNode<T>>] {
        &self.children
    }

    pub fn child(&self, route: &str) -> Option<&Arc<RouteNode<T>>> {
        self.children.iter().find(|child| child.route == route)
    }

    pub fn renderer(&self) -> Option<&Renderer<T>> {
        self.render.as_ref()
    }

    /// Invokes the renderer. `None` when the node has none.
    pub fn render(&self) -> Option<T> {
        self.render.as_ref().map(|render| render())
    }

    #[inline]
    pub fn specificity(&self) -> Specificity {
        Specificity::of(&self.route)
    }

    #[inline]
    pub fn is_index(&self) -> bool {
        is_index_route(&self.route)
    }
}

impl<T> fmt::Debug for RouteNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteNode")
            .field("route", &self.route)
            .field("context_key", &self.context_key)
            .field("layout", &self.layout)
            .field("has_renderer", &self.render.is_some())
            .field("children", &self.children)
            .finish()
    }
}

// ============================================================================
// RouteTree
// ============================================================================

/// Builder that turns route file paths into a [`RouteNode`] tree.
pub struct RouteTree<T> {
    files: Vec<(Vec<String>, Renderer<T>)>,
}

impl<T> RouteTree<T> {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Adds a route file.
    pub fn route(mut self, path: &str, render: impl Fn() -> T + Send + Sync + 'static) -> Self {
        self.insert(path, Arc::new(render));
        self
    }

    /// Adds a route file, replacing an earlier file at the same path in place.
    pub fn insert(&mut self, path: &str, render: Renderer<T>) {
        let segments = split_path(path);
        if segments.is_empty() {
            return;
        }

        let existing = self.files.iter_mut().find(|(p, _)| *p == segments);
        match existing {
            Some(slot) => slot.1 = render,
            None => self.files.push((segments, render)),
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Builds the tree. The root node is always a layout with key `/`.
    pub fn build(&self) -> Arc<RouteNode<T>> {
        Arc::new(self.build_layout(&[], String::new()))
    }

    fn build_layout(&self, dir: &[String], route: String) -> RouteNode<T> {
        let render = self.layout_renderer(dir, &[]).cloned();
        let mut children = Vec::new();

        for (path, renderer) in &self.files {
            let Some(rel) = path.strip_prefix(dir) else {
                continue;
            };
            if rel.is_empty() || (rel.len() == 1 && rel[0] == LAYOUT_ROUTE) {
                continue;
            }

            // The shallowest intermediate directory with its own layout owns this file.
            let owner = (1..rel.len()).find(|&k| self.layout_renderer(dir, &rel[..k]).is_some());
            match owner {
                Some(k) if rel.len() == k + 1 && rel[k] == LAYOUT_ROUTE => {
                    let nested: Vec<String> = dir.iter().chain(&rel[..k]).cloned().collect();
                    let name = rel[..k].join("/");
                    children.push(Arc::new(self.build_layout(&nested, name)));
                }
                Some(_) => {}
                None => {
                    let key = ContextKey::from_segments(dir.iter().chain(rel));
                    children.push(Arc::new(RouteNode::leaf(
                        rel.join("/"),
                        key,
                        Some(renderer.clone()),
                    )));
                }
            }
        }

        RouteNode::layout(route, ContextKey::from_segments(dir), render, children)
    }

    fn layout_renderer(&self, dir: &[String], below: &[String]) -> Option<&Renderer<T>> {
        let depth = dir.len() + below.len();
        self.files.iter().find_map(|(path, renderer)| {
            let matches = path.len() == depth + 1
                && path[..dir.len()] == *dir
                && path[dir.len()..depth] == *below
                && path[depth] == LAYOUT_ROUTE;
            matches.then_some(renderer)
        })
    }
}

impl<T> Default for RouteTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split(PATH_SEPARATOR)
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn names<T>(node: &RouteNode<T>) -> Vec<&str> {
        node.children().iter().map(|c| c.route()).collect()
    }

    #[test]
    fn test_segment_parse() {
        assert_eq!(Segment::parse("about"), Segment::Static("about"));
        assert_eq!(Segment::parse("(tabs)"), Segment::Group("tabs"));
        assert_eq!(Segment::parse("[slug]"), Segment::Dynamic("slug"));
        assert_eq!(Segment::parse("[...rest]"), Segment::CatchAll("rest"));
    }

    #[test]
    fn test_specificity() {
        assert_eq!(Specificity::of("index"), Specificity::Static);
        assert_eq!(Specificity::of("(tabs)/home"), Specificity::Static);
        assert_eq!(Specificity::of("users/[id]"), Specificity::Dynamic);
        assert_eq!(Specificity::of("[id]/[...rest]"), Specificity::CatchAll);
        assert!(Specificity::Static < Specificity::Dynamic);
        assert!(Specificity::Dynamic < Specificity::CatchAll);
    }

    #[test]
    fn test_is_index_route() {
        assert!(is_index_route("index"));
        assert!(is_index_route("settings/index"));
        assert!(!is_index_route("indexes"));
    }

    #[test]
    fn test_build_flat_tree() {
        let tree = RouteTree::new()
            .route("_layout", || "root")
            .route("index", || "home")
            .route("about", || "about")
            .build();

        assert!(tree.is_layout());
        assert!(tree.context_key().is_root());
        assert_eq!(tree.render(), Some("root"));
        assert_eq!(names(&tree), vec!["index", "about"]);
        assert_eq!(tree.child("about").unwrap().context_key().as_str(), "/about");
    }

    #[test]
    fn test_build_nested_layout() {
        let tree = RouteTree::new()
            .route("_layout", || "root")
            .route("blog/_layout", || "blog")
            .route("blog/index", || "blog index")
            .route("blog/[slug]", || "post")
            .route("index", || "home")
            .build();

        assert_eq!(names(&tree), vec!["blog", "index"]);
        let blog = tree.child("blog").unwrap();
        assert!(blog.is_layout());
        assert_eq!(blog.context_key().as_str(), "/blog");
        assert_eq!(names(blog), vec!["index", "[slug]"]);
        assert_eq!(blog.child("[slug]").unwrap().context_key().as_str(), "/blog/[slug]");
    }

    #[test]
    fn test_directory_without_layout_is_flattened() {
        let tree = RouteTree::new()
            .route("_layout", || 0)
            .route("settings/profile", || 1)
            .route("settings/index", || 2)
            .build();

        assert_eq!(names(&tree), vec!["settings/profile", "settings/index"]);
        assert!(tree.child("settings/index").unwrap().is_index());
    }

    #[test]
    fn test_root_without_layout_has_no_renderer() {
        let tree = RouteTree::new().route("index", || ()).build();
        assert!(tree.renderer().is_none());
        assert_eq!(names(&tree), vec!["index"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut routes = RouteTree::new();
        routes.insert("a", Arc::new(|| 1));
        routes.insert("b", Arc::new(|| 2));
        routes.insert("./a", Arc::new(|| 3));
        assert_eq!(routes.len(), 2);

        let tree = routes.build();
        assert_eq!(names(&tree), vec!["a", "b"]);
        assert_eq!(tree.child("a").unwrap().render(), Some(3));
    }

    #[test]
    fn test_deep_layout_skips_intermediate_directory() {
        let tree = RouteTree::new()
            .route("_layout", || ())
            .route("a/b/_layout", || ())
            .route("a/b/c", || ())
            .build();

        assert_eq!(names(&tree), vec!["a/b"]);
        let nested = tree.child("a/b").unwrap();
        assert_eq!(nested.context_key().as_str(), "/a/b");
        assert_eq!(names(nested), vec!["c"]);
    }
}
