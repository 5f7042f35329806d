//! Tree renderer: turns declarative nodes into live document nodes.

use crate::attrs::set_props;
use crate::classify::{Classified, classify};
use crate::component::{ComponentInstance, RefSink};
use crate::config::RenderConfig;
use crate::context::ContextGuard;
use crate::node::{Descriptor, Kind, Node, flatten};
use crate::props::Props;
use crate::registry::CustomTags;
use crate::rendered::Rendered;
use dom::{Document, DomError, DomEvent, Listener, Namespace, NodeKey};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Materializes [`Node`] trees into a [`Document`].
///
/// Cheap to clone; clones share the configuration, the custom tag registry
/// and the reference sink table. Sinks are keyed by document id as well as
/// node key, so one renderer can serve several documents.
#[derive(Clone, Debug)]
pub struct Renderer {
    config: Rc<RenderConfig>,
    tags: CustomTags,
    ref_sinks: Rc<RefCell<HashMap<(u64, NodeKey), RefSink>>>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            config: Rc::new(config),
            tags: CustomTags::new(),
            ref_sinks: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn with_tags(mut self, tags: CustomTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn tags(&self) -> &CustomTags {
        &self.tags
    }

    /// Reference sink of the component whose output starts at `key` in `doc`.
    pub fn ref_sink(&self, doc: &Document, key: NodeKey) -> Option<RefSink> {
        self.ref_sinks.borrow().get(&(doc.id(), key)).cloned()
    }

    /// Materialize `node` and mount the result under `parent`.
    pub fn render_into(
        &self,
        doc: &mut Document,
        node: impl Into<Node>,
        parent: NodeKey,
    ) -> Result<Rendered, DomError> {
        let rendered = self.materialize(doc, node.into(), Some(parent))?;
        rendered.mount_into(doc, parent)?;
        Ok(rendered)
    }

    /// Materialize `node` without attaching it. `parent` is the element the
    /// output is meant for; it only decides SVG namespace inheritance.
    pub fn materialize(
        &self,
        doc: &mut Document,
        node: Node,
        parent: Option<NodeKey>,
    ) -> Result<Rendered, DomError> {
        match classify(node, &self.tags) {
            Classified::Sequence(items) => {
                let items = flatten(items);
                if items.is_empty() {
                    return self.materialize(doc, Node::List(vec![Node::Null]), parent);
                }
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.materialize(doc, item, parent)?);
                }
                Ok(Rendered::Many(out))
            }
            Classified::Module(inner) => self.materialize(doc, inner, parent),
            Classified::Component {
                func,
                props,
                children,
            } => self.render_instance(doc, ComponentInstance::new(func, props, children), parent),
            Classified::Real(key) => Ok(Rendered::Node(key)),
            Classified::Binding(binding) => binding.render(doc).map(Rendered::Node),
            Classified::Pending(pending) => {
                let props = Props::new().with("src", pending);
                let awaited = Node::element(&self.config.await_kind, props, Vec::new());
                self.materialize(doc, awaited, parent)
            }
            Classified::Text(text) => Ok(doc.create_text(text).into()),
            Classified::Empty => Ok(doc.create_comment("").into()),
            Classified::Malformed(value) => {
                log::debug!(target: "render", "malformed node rendered as text: {value}");
                let text = self.config.malformed_text(value.to_string());
                Ok(doc.create_text(text).into())
            }
            Classified::CustomTag {
                descriptor,
                component,
            } => {
                let substituted = Descriptor {
                    kind: Kind::Component(component),
                    ..descriptor
                };
                self.materialize(doc, Node::Element(substituted), parent)
            }
            Classified::Intrinsic {
                tag,
                props,
                children,
            } => {
                let svg = tag.as_ref() == "svg" || parent.is_some_and(|p| doc.is_svg(p));
                let element = if svg {
                    doc.create_element_ns(Namespace::Svg, &tag)
                } else {
                    doc.create_element(&tag)
                };
                log::trace!(target: "render", "<{tag}> -> {} (svg: {svg})", element.0);
                set_props(doc, element, &props)?;
                for child in flatten(children) {
                    let rendered = match child {
                        Node::Real(key) => Rendered::Node(key),
                        other => self.materialize(doc, other, Some(element))?,
                    };
                    rendered.mount_into(doc, element)?;
                }
                Ok(Rendered::Node(element))
            }
        }
    }

    /// Render an existing instance: install it as the current component,
    /// call its render function, wire its lifecycle onto the output and
    /// register its reference sink.
    pub fn render_instance(
        &self,
        doc: &mut Document,
        instance: Rc<ComponentInstance>,
        parent: Option<NodeKey>,
    ) -> Result<Rendered, DomError> {
        log::trace!(target: "render", "component {}", instance.name());
        let _guard = ContextGuard::enter(Rc::clone(&instance));
        let output = instance.render(self, doc, parent)?;

        match &output {
            Rendered::Node(key) => wire_lifecycle(doc, &instance, *key)?,
            Rendered::Many(items) => {
                for item in items {
                    if let Rendered::Node(key) = item {
                        wire_lifecycle(doc, &instance, *key)?;
                    }
                }
            }
        }

        if let Some(first) = output.first_node() {
            let doc_id = doc.id();
            let mut sinks = self.ref_sinks.borrow_mut();
            sinks.retain(|(id, key), sink| {
                sink.instance().is_some() && (*id != doc_id || doc.contains(*key))
            });
            sinks.insert((doc_id, first), RefSink::new(&instance));
        }
        Ok(output)
    }
}

/// One-shot mount/destroy listeners for one output node of `instance`.
fn wire_lifecycle(
    doc: &mut Document,
    instance: &Rc<ComponentInstance>,
    key: NodeKey,
) -> Result<(), DomError> {
    let mounted = Rc::clone(instance);
    doc.add_listener(
        key,
        DomEvent::Mount,
        Listener::once(move |doc, node| {
            mounted.attach_style(doc);
            mounted.trigger(doc, DomEvent::Mount, node);
        }),
    )?;
    let destroyed = Rc::clone(instance);
    doc.add_listener(
        key,
        DomEvent::Destroy,
        Listener::once(move |doc, node| {
            destroyed.trigger(doc, DomEvent::Destroy, node);
            destroyed.detach_style(doc);
        }),
    )
}
