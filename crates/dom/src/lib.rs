//! In-memory live document: keyed node arena, lifecycle events and
//! debugging views.

pub mod debug;
#[cfg(any(test, feature = "dom-snapshot"))]
pub mod snapshot;

mod document;
mod error;
mod events;
mod types;

pub use crate::document::Document;
pub use crate::error::DomError;
pub use crate::events::{DomEvent, EventHandler, Listener};
pub use crate::types::{Namespace, NodeKey, NodeType, TreeNode};
