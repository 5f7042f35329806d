//! Hyperscript builder.
//!
//! `h(query, props, children)`-style construction. Intrinsic elements are
//! cloned from cached template prototypes; component constructors produce an
//! unrendered instance; plain functions are called eagerly.

use crate::attrs::set_attributes;
use crate::component::{ComponentFn, ComponentInstance, FunctionComponent};
use crate::node::{Descriptor, Kind, Node, flatten};
use crate::props::Props;
use crate::renderer::Renderer;
use crate::template::{QueryResolver, TagResolver, TemplateCache};
use dom::{Document, DomError, NodeKey};
use std::rc::Rc;
use std::sync::Arc;

/// First argument of a build.
#[derive(Clone, Debug)]
pub enum Query {
    /// Intrinsic tag query, `tag#id.class` syntax.
    Tag(Arc<str>),
    /// Component constructor.
    Component(ComponentFn),
    Function(FunctionComponent),
}

impl From<&str> for Query {
    fn from(query: &str) -> Self {
        Query::Tag(Arc::from(query))
    }
}

impl From<String> for Query {
    fn from(query: String) -> Self {
        Query::Tag(Arc::from(query))
    }
}

impl From<ComponentFn> for Query {
    fn from(func: ComponentFn) -> Self {
        Query::Component(func)
    }
}

impl From<FunctionComponent> for Query {
    fn from(func: FunctionComponent) -> Self {
        Query::Function(func)
    }
}

/// Result of a build.
#[derive(Debug)]
pub enum Built {
    /// Component instance, not materialized yet.
    Instance(Rc<ComponentInstance>),
    /// Whatever a function component returned.
    Value(Node),
    Element(NodeKey),
}

impl Built {
    pub fn element(&self) -> Option<NodeKey> {
        match self {
            Built::Element(key) => Some(*key),
            _ => None,
        }
    }

    /// Declarative form, for feeding the result to the renderer. An instance
    /// becomes a component descriptor with the instance's props and children.
    pub fn into_node(self) -> Node {
        match self {
            Built::Instance(instance) => Node::component(
                instance.func().clone(),
                instance.props(),
                instance.children().to_vec(),
            ),
            Built::Value(node) => node,
            Built::Element(key) => Node::Real(key),
        }
    }
}

impl From<Built> for Node {
    fn from(built: Built) -> Self {
        built.into_node()
    }
}

pub struct Hyperscript {
    renderer: Renderer,
    templates: TemplateCache,
    resolver: Box<dyn TagResolver>,
}

impl Hyperscript {
    pub fn new(renderer: Renderer) -> Self {
        Self::with_resolver(renderer, QueryResolver)
    }

    pub fn with_resolver(renderer: Renderer, resolver: impl TagResolver + 'static) -> Self {
        Self {
            renderer,
            templates: TemplateCache::new(),
            resolver: Box::new(resolver),
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn templates(&self) -> &TemplateCache {
        &self.templates
    }

    pub fn html(
        &mut self,
        doc: &mut Document,
        depth: usize,
        query: impl Into<Query>,
        props: Option<Props>,
        children: Vec<Node>,
    ) -> Result<Built, DomError> {
        self.build(doc, false, depth, query, props, children)
    }

    pub fn svg(
        &mut self,
        doc: &mut Document,
        depth: usize,
        query: impl Into<Query>,
        props: Option<Props>,
        children: Vec<Node>,
    ) -> Result<Built, DomError> {
        self.build(doc, true, depth, query, props, children)
    }

    pub fn build(
        &mut self,
        doc: &mut Document,
        is_svg: bool,
        depth: usize,
        query: impl Into<Query>,
        props: Option<Props>,
        children: Vec<Node>,
    ) -> Result<Built, DomError> {
        match query.into() {
            Query::Component(func) => {
                let instance = ComponentInstance::new(func, Props::new(), children);
                if let Some(props) = props {
                    instance.set_props(props);
                }
                Ok(Built::Instance(instance))
            }
            Query::Function(func) => {
                log::trace!(target: "render.builder", "{:indent$}call {}", "", func.name(), indent = depth * 2);
                let mut props = props.unwrap_or_default();
                props.set_children(children);
                Ok(Built::Value(func.call(props)))
            }
            Query::Tag(query) => self
                .element(doc, is_svg, depth, &query, props.as_ref(), children)
                .map(Built::Element),
        }
    }

    fn element(
        &mut self,
        doc: &mut Document,
        is_svg: bool,
        depth: usize,
        query: &str,
        props: Option<&Props>,
        children: Vec<Node>,
    ) -> Result<NodeKey, DomError> {
        let svg = is_svg || query == "svg";
        let template = self
            .templates
            .get_or_resolve(doc, self.resolver.as_ref(), query, svg)?;
        let element = doc.clone_node(template, false)?;
        log::trace!(target: "render.builder", "{:indent$}<{query}> -> {}", "", element.0, indent = depth * 2);

        if let Some(props) = props {
            set_attributes(doc, element, props, depth)?;
        }
        self.append_children(doc, element, children, svg, depth)?;

        // Fired right away: the element counts as loaded once it is built.
        if let Some(onload) = doc.handler(element, "load") {
            onload(doc, element);
        }
        Ok(element)
    }

    /// Append possibly nested `children` under `element`.
    ///
    /// Realized nodes are mounted as they are, intrinsic descriptors are built
    /// one level deeper through the template cache, falsy values are skipped,
    /// and everything else goes through the renderer.
    pub fn append_children(
        &mut self,
        doc: &mut Document,
        element: NodeKey,
        children: Vec<Node>,
        is_svg: bool,
        depth: usize,
    ) -> Result<(), DomError> {
        for child in flatten(children) {
            match child {
                Node::Real(key) => doc.mount(key, element)?,
                Node::Null | Node::Undefined | Node::Bool(false) => {}
                Node::Element(Descriptor {
                    kind: Kind::Tag(tag),
                    props,
                    children,
                }) if !self.renderer.tags().contains(&tag) => {
                    let key = self.element(doc, is_svg, depth + 1, &tag, Some(&props), children)?;
                    doc.mount(key, element)?;
                }
                other => {
                    let rendered = self.renderer.materialize(doc, other, Some(element))?;
                    rendered.mount_into(doc, element)?;
                }
            }
        }
        Ok(())
    }
}
