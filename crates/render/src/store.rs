//! Reactive bindings.
//!
//! A [`Binding`] renders itself into the document. [`Store`] is a minimal
//! value cell whose [`Listener`]s render the mapped value as text and keep
//! every text node they produced up to date.

use crate::node::Node;
use dom::{Document, DomError, NodeKey};
use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

/// Object able to render itself directly into the document.
pub trait Binding {
    fn render(&self, doc: &mut Document) -> Result<NodeKey, DomError>;
}

pub struct Store<T> {
    inner: Rc<StoreInner<T>>,
}

struct StoreInner<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<Weak<ListenerInner<T>>>>,
}

impl<T: 'static> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn get(&self) -> Ref<'_, T> {
        self.inner.value.borrow()
    }

    /// Replace the value and refresh every rendered listener. Returns how many
    /// text nodes were updated.
    pub fn set(&self, doc: &mut Document, value: T) -> Result<usize, DomError> {
        *self.inner.value.borrow_mut() = value;
        self.refresh(doc)
    }

    /// Replace the value with `f(current)`. The value is only borrowed
    /// shared while `f` runs, so `f` may read the store.
    pub fn update(&self, doc: &mut Document, f: impl FnOnce(&T) -> T) -> Result<usize, DomError> {
        let next = f(&self.inner.value.borrow());
        *self.inner.value.borrow_mut() = next;
        self.refresh(doc)
    }

    /// Binding that renders `map(value)` as a text node.
    pub fn listen(&self, map: impl Fn(&T) -> String + 'static) -> Listener<T> {
        let inner = Rc::new(ListenerInner {
            store: Rc::clone(&self.inner),
            map: Box::new(map),
            rendered: RefCell::new(Vec::new()),
        });
        self.inner
            .listeners
            .borrow_mut()
            .push(Rc::downgrade(&inner));
        Listener { inner }
    }

    fn refresh(&self, doc: &mut Document) -> Result<usize, DomError> {
        let listeners: Vec<Rc<ListenerInner<T>>> = {
            let mut list = self.inner.listeners.borrow_mut();
            list.retain(|l| l.strong_count() > 0);
            list.iter().filter_map(Weak::upgrade).collect()
        };
        let mut updated = 0;
        for listener in listeners {
            let text = (listener.map)(&self.inner.value.borrow());
            let mut rendered = listener.rendered.borrow_mut();
            rendered.retain(|key| doc.contains(*key));
            for key in rendered.iter() {
                doc.set_text(*key, &text)?;
                updated += 1;
            }
        }
        Ok(updated)
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

pub struct Listener<T> {
    inner: Rc<ListenerInner<T>>,
}

struct ListenerInner<T> {
    store: Rc<StoreInner<T>>,
    map: Box<dyn Fn(&T) -> String>,
    rendered: RefCell<Vec<NodeKey>>,
}

impl<T> Listener<T> {
    /// Text nodes rendered by this listener that were live at the last refresh.
    pub fn rendered(&self) -> Vec<NodeKey> {
        self.inner.rendered.borrow().clone()
    }
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Binding for Listener<T> {
    fn render(&self, doc: &mut Document) -> Result<NodeKey, DomError> {
        let text = (self.inner.map)(&self.inner.store.value.borrow());
        let key = doc.create_text(text);
        self.inner.rendered.borrow_mut().push(key);
        Ok(key)
    }
}

impl<T: 'static> From<Listener<T>> for Node {
    fn from(listener: Listener<T>) -> Self {
        Node::Binding(Rc::new(listener))
    }
}
