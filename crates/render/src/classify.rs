//! Node classification.
//!
//! The variants are mutually exclusive and the match order below is the
//! dispatch order of the renderer: a node is classified by the first rule it
//! satisfies.

use crate::component::ComponentFn;
use crate::node::{Descriptor, Kind, Node, format_number};
use crate::pending::Pending;
use crate::props::Props;
use crate::registry::CustomTags;
use crate::store::Binding;
use dom::NodeKey;
use serde_json::Value;
use std::rc::Rc;
use std::sync::Arc;

/// Classification label, without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeClass {
    Sequence,
    Module,
    Component,
    Real,
    Binding,
    Pending,
    Text,
    Empty,
    Malformed,
    CustomTag,
    Intrinsic,
}

/// A node split into its class and the parts the renderer needs for it.
pub enum Classified {
    Sequence(Vec<Node>),
    Module(Node),
    Component {
        func: ComponentFn,
        props: Props,
        children: Vec<Node>,
    },
    Real(NodeKey),
    Binding(Rc<dyn Binding>),
    Pending(Pending),
    Text(String),
    Empty,
    Malformed(Value),
    CustomTag {
        descriptor: Descriptor,
        component: ComponentFn,
    },
    Intrinsic {
        tag: Arc<str>,
        props: Props,
        children: Vec<Node>,
    },
}

impl Classified {
    pub fn class(&self) -> NodeClass {
        match self {
            Classified::Sequence(_) => NodeClass::Sequence,
            Classified::Module(_) => NodeClass::Module,
            Classified::Component { .. } => NodeClass::Component,
            Classified::Real(_) => NodeClass::Real,
            Classified::Binding(_) => NodeClass::Binding,
            Classified::Pending(_) => NodeClass::Pending,
            Classified::Text(_) => NodeClass::Text,
            Classified::Empty => NodeClass::Empty,
            Classified::Malformed(_) => NodeClass::Malformed,
            Classified::CustomTag { .. } => NodeClass::CustomTag,
            Classified::Intrinsic { .. } => NodeClass::Intrinsic,
        }
    }
}

pub fn classify(node: Node, tags: &CustomTags) -> Classified {
    match node {
        Node::List(items) => Classified::Sequence(items),
        Node::Module(inner) => Classified::Module(*inner),
        Node::Component(func) => Classified::Component {
            func,
            props: Props::default(),
            children: Vec::new(),
        },
        Node::Element(Descriptor {
            kind: Kind::Component(func),
            props,
            children,
        }) => Classified::Component {
            func,
            props,
            children,
        },
        Node::Real(key) => Classified::Real(key),
        Node::Binding(binding) => Classified::Binding(binding),
        Node::Pending(pending) => Classified::Pending(pending),
        Node::Text(text) => Classified::Text(text),
        Node::Number(n) => Classified::Text(format_number(n)),
        Node::Null | Node::Undefined | Node::Bool(false) => Classified::Empty,
        Node::Bool(true) => Classified::Malformed(Value::Bool(true)),
        Node::Malformed(value) => Classified::Malformed(value),
        Node::Element(Descriptor {
            kind: Kind::Tag(tag),
            props,
            children,
        }) => match tags.get(&tag) {
            Some(component) => Classified::CustomTag {
                descriptor: Descriptor {
                    kind: Kind::Tag(tag),
                    props,
                    children,
                },
                component,
            },
            None => Classified::Intrinsic {
                tag,
                props,
                children,
            },
        },
    }
}

/// Class of `node` without consuming it.
pub fn class_of(node: &Node, tags: &CustomTags) -> NodeClass {
    match node {
        Node::List(_) => NodeClass::Sequence,
        Node::Module(_) => NodeClass::Module,
        Node::Component(_) => NodeClass::Component,
        Node::Element(Descriptor {
            kind: Kind::Component(_),
            ..
        }) => NodeClass::Component,
        Node::Real(_) => NodeClass::Real,
        Node::Binding(_) => NodeClass::Binding,
        Node::Pending(_) => NodeClass::Pending,
        Node::Text(_) | Node::Number(_) => NodeClass::Text,
        Node::Null | Node::Undefined | Node::Bool(false) => NodeClass::Empty,
        Node::Bool(true) | Node::Malformed(_) => NodeClass::Malformed,
        Node::Element(Descriptor {
            kind: Kind::Tag(tag),
            ..
        }) => {
            if tags.contains(tag) {
                NodeClass::CustomTag
            } else {
                NodeClass::Intrinsic
            }
        }
    }
}
