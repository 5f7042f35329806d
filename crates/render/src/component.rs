//! Component references and per-render component instances.

use crate::node::Node;
use crate::props::Props;
use crate::rendered::Rendered;
use crate::renderer::Renderer;
use dom::{Document, DomError, DomEvent, NodeKey};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

/// Render function of a component. Receives the instance being rendered so it
/// can declare a style payload or subscribe to lifecycle events.
pub type RenderFn = dyn Fn(&ComponentInstance, &Props, &[Node]) -> Node;

/// Lifecycle hook registered on an instance.
pub type Hook = Rc<dyn Fn(&mut Document, NodeKey)>;

/// Reference to a component: a named render function.
#[derive(Clone)]
pub struct ComponentFn {
    name: Arc<str>,
    render: Rc<RenderFn>,
}

impl ComponentFn {
    pub fn new(
        name: &str,
        render: impl Fn(&ComponentInstance, &Props, &[Node]) -> Node + 'static,
    ) -> Self {
        Self {
            name: Arc::from(name),
            render: Rc::new(render),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ptr_eq(&self, other: &ComponentFn) -> bool {
        Rc::ptr_eq(&self.render, &other.render)
    }
}

impl fmt::Debug for ComponentFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentFn({})", self.name)
    }
}

/// Plain function component for the hyperscript builder: called eagerly with
/// its props, children merged under `children`.
#[derive(Clone)]
pub struct FunctionComponent {
    name: Arc<str>,
    call: Rc<dyn Fn(Props) -> Node>,
}

impl FunctionComponent {
    pub fn new(name: &str, call: impl Fn(Props) -> Node + 'static) -> Self {
        Self {
            name: Arc::from(name),
            call: Rc::new(call),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, props: Props) -> Node {
        (self.call)(props)
    }
}

impl fmt::Debug for FunctionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionComponent({})", self.name)
    }
}

/// Realized DOM of a component, as captured through its [`RefSink`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DomRef {
    #[default]
    Empty,
    Single(NodeKey),
    /// Multi-root output; positions not captured yet are `None`.
    Indexed(Vec<Option<NodeKey>>),
}

/// One materialization of a component.
///
/// Instances are created per render and are not reused across renders.
pub struct ComponentInstance {
    func: ComponentFn,
    props: RefCell<Props>,
    children: Vec<Node>,
    style: RefCell<Option<String>>,
    dom: RefCell<DomRef>,
    hooks: RefCell<Vec<(DomEvent, Hook)>>,
    style_element: Cell<Option<NodeKey>>,
}

impl ComponentInstance {
    pub fn new(func: ComponentFn, props: Props, children: Vec<Node>) -> Rc<Self> {
        Rc::new(Self {
            func,
            props: RefCell::new(props),
            children,
            style: RefCell::new(None),
            dom: RefCell::new(DomRef::Empty),
            hooks: RefCell::new(Vec::new()),
            style_element: Cell::new(None),
        })
    }

    pub fn func(&self) -> &ComponentFn {
        &self.func
    }

    pub fn name(&self) -> &str {
        self.func.name()
    }

    pub fn props(&self) -> Props {
        self.props.borrow().clone()
    }

    /// Merge `props` into the instance's props.
    pub fn set_props(&self, props: Props) {
        self.props.borrow_mut().merge(props);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn style(&self) -> Option<String> {
        self.style.borrow().clone()
    }

    /// Declare the CSS text injected into the document head while the
    /// component is mounted.
    pub fn set_style(&self, css: impl Into<String>) {
        *self.style.borrow_mut() = Some(css.into());
    }

    pub fn dom(&self) -> DomRef {
        self.dom.borrow().clone()
    }

    /// Prepare the reference slot for `len` roots.
    pub fn expect_roots(&self, len: usize) {
        *self.dom.borrow_mut() = DomRef::Indexed(vec![None; len]);
    }

    pub fn on(&self, event: DomEvent, hook: impl Fn(&mut Document, NodeKey) + 'static) {
        self.hooks.borrow_mut().push((event, Rc::new(hook)));
    }

    pub fn on_mount(&self, hook: impl Fn(&mut Document, NodeKey) + 'static) {
        self.on(DomEvent::Mount, hook);
    }

    pub fn on_destroy(&self, hook: impl Fn(&mut Document, NodeKey) + 'static) {
        self.on(DomEvent::Destroy, hook);
    }

    /// Run the hooks registered for `event`, in registration order.
    pub fn trigger(&self, doc: &mut Document, event: DomEvent, node: NodeKey) {
        let hooks: Vec<Hook> = self
            .hooks
            .borrow()
            .iter()
            .filter(|(e, _)| *e == event)
            .map(|(_, h)| Rc::clone(h))
            .collect();
        log::trace!(
            target: "render",
            "{} {event} on node {} ({} hooks)",
            self.name(),
            node.0,
            hooks.len()
        );
        for hook in hooks {
            hook(doc, node);
        }
    }

    /// Call the render function and materialize its output under `parent`.
    pub fn render(
        &self,
        renderer: &Renderer,
        doc: &mut Document,
        parent: Option<NodeKey>,
    ) -> Result<Rendered, DomError> {
        let props = self.props();
        let output = (self.func.render)(self, &props, &self.children);
        renderer.materialize(doc, output, parent)
    }

    pub fn style_element(&self) -> Option<NodeKey> {
        self.style_element.get()
    }

    /// Inject the style payload into the head, once per instance.
    pub(crate) fn attach_style(&self, doc: &mut Document) {
        if self.style_element.get().is_some() {
            return;
        }
        let Some(css) = self.style() else {
            return;
        };
        let head = doc.head();
        let style = doc.create_element("style");
        let text = doc.create_text(css);
        let attached = doc
            .append_child(style, text)
            .and_then(|()| doc.append_child(head, style));
        match attached {
            Ok(()) => self.style_element.set(Some(style)),
            Err(err) => log::warn!(target: "render", "{}: style not injected: {err}", self.name()),
        }
    }

    /// Remove the injected style element, if any.
    pub(crate) fn detach_style(&self, doc: &mut Document) {
        let Some(style) = self.style_element.take() else {
            return;
        };
        if let Err(err) = doc.remove(style) {
            log::debug!(target: "render", "{}: style element already gone: {err}", self.name());
        }
    }
}

impl fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("name", &self.name())
            .field("props", &self.props.borrow())
            .field("dom", &self.dom.borrow())
            .finish()
    }
}

/// Write handle into a component's [`DomRef`] slot.
#[derive(Clone, Debug)]
pub struct RefSink {
    instance: Weak<ComponentInstance>,
}

impl RefSink {
    pub fn new(instance: &Rc<ComponentInstance>) -> Self {
        Self {
            instance: Rc::downgrade(instance),
        }
    }

    /// Without an index, or when the slot is not indexed, the whole slot is
    /// replaced; with an index into an indexed slot only that position is
    /// written (the slot grows as needed). Returns `false` once the instance
    /// is gone.
    pub fn capture(&self, value: NodeKey, index: Option<usize>) -> bool {
        let Some(instance) = self.instance.upgrade() else {
            return false;
        };
        let mut slot = instance.dom.borrow_mut();
        let replace = match (index, &mut *slot) {
            (Some(i), DomRef::Indexed(items)) => {
                if items.len() <= i {
                    items.resize(i + 1, None);
                }
                items[i] = Some(value);
                false
            }
            _ => true,
        };
        if replace {
            *slot = DomRef::Single(value);
        }
        true
    }

    pub fn instance(&self) -> Option<Rc<ComponentInstance>> {
        self.instance.upgrade()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> Rc<ComponentInstance> {
        let func = ComponentFn::new("probe", |_, _, _| Node::Null);
        ComponentInstance::new(func, Props::new().with("a", 1i64), Vec::new())
    }

    #[test]
    fn capture_without_index_replaces_slot() {
        let inst = instance();
        let sink = RefSink::new(&inst);
        assert!(sink.capture(NodeKey(7), None));
        assert_eq!(inst.dom(), DomRef::Single(NodeKey(7)));
        assert!(sink.capture(NodeKey(8), Some(2)));
        assert_eq!(inst.dom(), DomRef::Single(NodeKey(8)));
    }

    #[test]
    fn capture_with_index_writes_position_of_indexed_slot() {
        let inst = instance();
        inst.expect_roots(2);
        let sink = RefSink::new(&inst);
        sink.capture(NodeKey(3), Some(0));
        sink.capture(NodeKey(5), Some(3));
        assert_eq!(
            inst.dom(),
            DomRef::Indexed(vec![Some(NodeKey(3)), None, None, Some(NodeKey(5))])
        );
    }

    #[test]
    fn capture_after_instance_drop_is_refused() {
        let sink = RefSink::new(&instance());
        assert!(!sink.capture(NodeKey(1), None));
        assert!(sink.instance().is_none());
    }

    #[test]
    fn set_props_merges_and_trigger_filters_by_event() {
        let inst = instance();
        inst.set_props(Props::new().with("b", "x"));
        assert!(inst.props().contains_key("a"));
        assert!(inst.props().contains_key("b"));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        inst.on_mount(move |_, key| sink.borrow_mut().push(("mount", key)));
        let sink = Rc::clone(&seen);
        inst.on_destroy(move |_, key| sink.borrow_mut().push(("destroy", key)));

        let mut doc = Document::new();
        inst.trigger(&mut doc, DomEvent::Destroy, NodeKey(4));
        assert_eq!(*seen.borrow(), vec![("destroy", NodeKey(4))]);
    }

    #[test]
    fn style_is_attached_once_and_removed_once() {
        let inst = instance();
        inst.set_style("p { color: red }");
        let mut doc = Document::new();
        inst.attach_style(&mut doc);
        inst.attach_style(&mut doc);
        assert_eq!(doc.children(doc.head()).len(), 1);
        let style = inst.style_element().unwrap();
        assert_eq!(doc.text_content(style), "p { color: red }");

        inst.detach_style(&mut doc);
        inst.detach_style(&mut doc);
        assert!(doc.children(doc.head()).is_empty());
        assert!(inst.style_element().is_none());
    }
}
