use crate::awaiter::await_component;
use crate::component::ComponentFn;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// Mapping from custom tag name to the component rendering it.
///
/// Clones share the same table, so a registry handed to a renderer can still
/// be extended by the application afterwards.
#[derive(Clone, Default)]
pub struct CustomTags {
    tags: Rc<RefCell<HashMap<Arc<str>, ComponentFn>>>,
}

impl CustomTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `await` component under `kind`.
    pub fn with_await(kind: &str) -> Self {
        let tags = Self::new();
        tags.register(kind, await_component());
        tags
    }

    /// Returns the component previously registered under `name`.
    pub fn register(&self, name: &str, component: ComponentFn) -> Option<ComponentFn> {
        log::debug!(target: "render", "custom tag <{name}> -> {}", component.name());
        self.tags.borrow_mut().insert(Arc::from(name), component)
    }

    pub fn unregister(&self, name: &str) -> Option<ComponentFn> {
        self.tags.borrow_mut().remove(name)
    }

    pub fn get(&self, name: &str) -> Option<ComponentFn> {
        self.tags.borrow().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.borrow().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tags.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.borrow().is_empty()
    }
}

impl std::fmt::Debug for CustomTags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tags = self.tags.borrow();
        let mut names: Vec<&str> = tags.keys().map(|k| k.as_ref()).collect();
        names.sort_unstable();
        f.debug_tuple("CustomTags").field(&names).finish()
    }
}
