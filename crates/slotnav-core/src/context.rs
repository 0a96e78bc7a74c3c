//! Canonical identity of a navigator's position in the route tree.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::config::{PATH_SEPARATOR, ROOT_CONTEXT_KEY};
use crate::route::RouteNode;

/// Position of a navigator in the route tree (`"/"`, `"/blog"`, `"/(tabs)/settings"`).
///
/// Keys are derived from path segments only, so two distinct positions never
/// share a key and a position keeps its key across render passes. Cloning is
/// an `Arc` bump.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextKey(Arc<str>);

impl ContextKey {
    /// Key of the route tree root.
    pub fn root() -> Self {
        Self(Arc::from(ROOT_CONTEXT_KEY))
    }

    /// Builds a key from path segments. Empty segments are skipped.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut key = String::new();
        for segment in segments {
            let segment = segment.as_ref();
            if segment.is_empty() {
                continue;
            }
            key.push(PATH_SEPARATOR);
            key.push_str(segment);
        }

        if key.is_empty() {
            Self::root()
        } else {
            Self(Arc::from(key))
        }
    }

    /// Key of a child position, one or more segments below this one.
    pub fn child(&self, name: &str) -> Self {
        Self::from_segments(self.segments().chain(name.split(PATH_SEPARATOR)))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        &*self.0 == ROOT_CONTEXT_KEY
    }

    /// Path segments below the root, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(PATH_SEPARATOR).filter(|s| !s.is_empty())
    }
}

impl From<&str> for ContextKey {
    fn from(path: &str) -> Self {
        Self::from_segments(path.split(PATH_SEPARATOR))
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextKey({:?})", &*self.0)
    }
}

impl Serialize for ContextKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Resolves the context key for the ambient route scope.
///
/// Outside any route scope the root key is returned.
pub fn resolve_context_key<T>(route: Option<&RouteNode<T>>) -> ContextKey {
    route.map_or_else(ContextKey::root, |node| node.context_key().clone())
}
