use crate::node::Node;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A value that becomes available later.
///
/// The renderer never waits on it: a pending node is handed to whatever
/// component handles the `await` tag, which decides what to show meanwhile.
/// Clones share the same slot.
#[derive(Clone, Default)]
pub struct Pending {
    slot: Rc<RefCell<Option<Node>>>,
}

impl Pending {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolved(value: Node) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(value))),
        }
    }

    /// Store the value. Returns `false` if it was already resolved; the first
    /// value wins.
    pub fn resolve(&self, value: Node) -> bool {
        let mut slot = self.slot.borrow_mut();
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        true
    }

    pub fn is_resolved(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub fn value(&self) -> Option<Node> {
        self.slot.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &Pending) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl fmt::Debug for Pending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_resolved() {
            f.write_str("Pending(resolved)")
        } else {
            f.write_str("Pending(waiting)")
        }
    }
}
