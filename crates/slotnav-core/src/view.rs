//! Host rendering seam.

use std::sync::Arc;

use crate::route::RouteNode;

/// What the engine needs from a host's element type.
///
/// The engine never inspects elements; it only asks the host to give a route
/// a place in the tree and to stamp an identity key on it.
pub trait HostElement: Sized + 'static {
    /// An element that renders `node` with `node` as the ambient route scope.
    fn route(node: Arc<RouteNode<Self>>) -> Self;

    /// The same element carrying identity `key`, replacing any existing key.
    fn keyed(self, key: &str) -> Self;
}
