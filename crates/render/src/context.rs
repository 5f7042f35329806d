//! Register of the component instance currently rendering.
//!
//! The slot is thread-local and updated strictly in call/return order: every
//! component render enters a [`ContextGuard`] that installs the instance and
//! puts the previous value back when dropped, early returns included.

use crate::component::ComponentInstance;
use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    static CURRENT: RefCell<Option<Rc<ComponentInstance>>> = const { RefCell::new(None) };
}

/// Instance whose render function is running on this thread, if any.
pub fn current_component() -> Option<Rc<ComponentInstance>> {
    CURRENT.with(|slot| slot.borrow().clone())
}

#[must_use = "the previous component is restored when the guard is dropped"]
pub(crate) struct ContextGuard {
    previous: Option<Rc<ComponentInstance>>,
}

impl ContextGuard {
    pub(crate) fn enter(instance: Rc<ComponentInstance>) -> Self {
        let previous = CURRENT.with(|slot| slot.replace(Some(instance)));
        Self { previous }
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|slot| *slot.borrow_mut() = previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentFn;
    use crate::node::Node;
    use crate::props::Props;

    fn instance(name: &str) -> Rc<ComponentInstance> {
        ComponentInstance::new(
            ComponentFn::new(name, |_, _, _| Node::Null),
            Props::new(),
            Vec::new(),
        )
    }

    #[test]
    fn guards_nest_and_restore_in_reverse_order() {
        assert!(current_component().is_none());
        let outer = ContextGuard::enter(instance("outer"));
        assert_eq!(current_component().unwrap().name(), "outer");
        {
            let _inner = ContextGuard::enter(instance("inner"));
            assert_eq!(current_component().unwrap().name(), "inner");
        }
        assert_eq!(current_component().unwrap().name(), "outer");
        drop(outer);
        assert!(current_component().is_none());
    }
}
