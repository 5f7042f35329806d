//! Lifecycle events and element handlers.
//!
//! Two separate mechanisms live here:
//! - *listeners* observe lifecycle events (`mount`, `destroy`) dispatched by
//!   the document while nodes are attached to or removed from the live tree;
//! - *handlers* are `on<event>` properties stored on an element, invoked by
//!   whoever owns the event (for example the hyperscript builder's `onload`).

use crate::{Document, NodeKey};
use std::fmt;
use std::rc::Rc;

/// Lifecycle event kinds dispatched by [`Document::mount`] and [`Document::unmount`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DomEvent {
    Mount,
    Destroy,
}

impl DomEvent {
    pub fn name(self) -> &'static str {
        match self {
            DomEvent::Mount => "mount",
            DomEvent::Destroy => "destroy",
        }
    }
}

impl fmt::Display for DomEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Element event handler (`onload`, `onclick`, ...).
pub type EventHandler = Rc<dyn Fn(&mut Document, NodeKey)>;

/// Lifecycle listener registered on a node.
///
/// `Once` listeners are dropped after their first invocation; `Persistent`
/// listeners stay registered until the node is removed.
pub enum Listener {
    Once(Box<dyn FnOnce(&mut Document, NodeKey)>),
    Persistent(Box<dyn FnMut(&mut Document, NodeKey)>),
}

impl Listener {
    pub fn once(f: impl FnOnce(&mut Document, NodeKey) + 'static) -> Self {
        Listener::Once(Box::new(f))
    }

    pub fn persistent(f: impl FnMut(&mut Document, NodeKey) + 'static) -> Self {
        Listener::Persistent(Box::new(f))
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listener::Once(_) => f.write_str("Listener::Once(..)"),
            Listener::Persistent(_) => f.write_str("Listener::Persistent(..)"),
        }
    }
}
