//! Slot resolver.
//!
//! A Slot renders the active route of the navigator it belongs to. When the
//! ambient navigator is not the one for the Slot's own route scope, the Slot
//! first wraps itself in a navigator for that scope and renders a qualified
//! slot inside it.
//!
//! The wrap can happen at most once per Slot: [`Unqualified::wrap`] consumes
//! the state and hands out a [`QualifiedToken`], and the token is the only way
//! to reach [`render_qualified`], which never re-checks.

use crate::config::STATIC_SLOT_KEY;
use crate::context::ContextKey;
use crate::flags::FlagSet;
use crate::publish::NavigatorContext;
use crate::view::HostElement;

/// Proof that a slot sits directly inside the navigator it expects.
///
/// Obtained from [`Unqualified::wrap`] or [`Qualified::into_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedToken {
    _private: (),
}

/// The result of [`enter`].
pub enum SlotState<'a, T> {
    /// No navigator for the expected key is in scope.
    Unqualified(Unqualified),
    /// The ambient navigator is the expected one.
    Qualified(Qualified<'a, T>),
}

pub struct Unqualified {
    context_key: ContextKey,
}

pub struct Qualified<'a, T> {
    context: &'a NavigatorContext<T>,
}

/// Instructions for the host: mount a custom navigator at `context_key` and
/// render a qualified slot built from `token` as its only child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapper {
    pub context_key: ContextKey,
    pub token: QualifiedToken,
}

/// Decides, with no side effects, whether a slot at `expected` is qualified
/// under `ambient`.
pub fn enter<'a, T>(
    ambient: Option<&'a NavigatorContext<T>>,
    expected: &ContextKey,
) -> SlotState<'a, T> {
    match ambient {
        Some(context) if context.context_key == *expected => {
            SlotState::Qualified(Qualified { context })
        }
        _ => SlotState::Unqualified(Unqualified {
            context_key: expected.clone(),
        }),
    }
}

impl Unqualified {
    pub fn context_key(&self) -> &ContextKey {
        &self.context_key
    }

    pub fn wrap(self) -> Wrapper {
        tracing::trace!(context_key = %self.context_key, "wrapping slot in navigator");
        Wrapper {
            context_key: self.context_key,
            token: QualifiedToken { _private: () },
        }
    }
}

impl<'a, T> Qualified<'a, T> {
    pub fn context(&self) -> &'a NavigatorContext<T> {
        self.context
    }

    pub fn into_token(self) -> QualifiedToken {
        QualifiedToken { _private: () }
    }
}

impl<T: HostElement> Qualified<'_, T> {
    pub fn render(self, flags: &FlagSet) -> Option<T> {
        use_slot(self.context, flags)
    }
}

/// Renders the active route of `context`.
///
/// `None` when the active index has no route. With
/// `prevent_layout_remounting` the element carries [`STATIC_SLOT_KEY`]
/// instead of its route key, so switching routes keeps the subtree mounted.
pub fn use_slot<T: HostElement>(context: &NavigatorContext<T>, flags: &FlagSet) -> Option<T> {
    let descriptor = context.active_descriptor()?;
    let element = descriptor.render();
    if flags.prevent_layout_remounting {
        Some(element.keyed(STATIC_SLOT_KEY))
    } else {
        Some(element)
    }
}

/// The qualified slot step. Renders straight from `context`.
pub fn render_qualified<T: HostElement>(
    _token: QualifiedToken,
    context: &NavigatorContext<T>,
    flags: &FlagSet,
) -> Option<T> {
    use_slot(context, flags)
}
