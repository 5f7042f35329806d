//! Declarative node model.

use crate::component::ComponentFn;
use crate::pending::Pending;
use crate::props::{PropValue, Props};
use crate::store::Binding;
use dom::NodeKey;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// A value the renderer knows how to materialize.
#[derive(Clone)]
pub enum Node {
    /// Ordered, possibly nested, sequence of nodes.
    List(Vec<Node>),
    /// Default-export indirection around another node.
    Module(Box<Node>),
    /// Bare component reference, rendered with empty props and no children.
    Component(ComponentFn),
    Element(Descriptor),
    /// Already realized document node, passed through untouched.
    Real(NodeKey),
    Binding(Rc<dyn Binding>),
    Pending(Pending),
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
    Undefined,
    /// Arbitrary data that is not a descriptor; rendered as its JSON text.
    Malformed(Value),
}

impl Node {
    pub fn element(tag: &str, props: Props, children: Vec<Node>) -> Self {
        Node::Element(Descriptor {
            kind: Kind::Tag(Arc::from(tag)),
            props,
            children,
        })
    }

    pub fn component(func: ComponentFn, props: Props, children: Vec<Node>) -> Self {
        Node::Element(Descriptor {
            kind: Kind::Component(func),
            props,
            children,
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Convert JSON data into a node.
    ///
    /// Objects carrying all of `type`, `props` and `children` (with a string
    /// `type`) become element descriptors; `{"__esModule": true, "default": ..}`
    /// becomes a module wrapper; any other object is kept as malformed data.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Node::Text(s),
            Value::Array(items) => Node::List(items.into_iter().map(Node::from_json).collect()),
            Value::Object(mut map) => {
                let is_module = map.get("__esModule").is_some_and(|v| v == &Value::Bool(true))
                    && map.get("default").is_some_and(|v| !v.is_null());
                if is_module {
                    if let Some(inner) = map.remove("default") {
                        return Node::Module(Box::new(Node::from_json(inner)));
                    }
                }
                let is_descriptor = matches!(map.get("type"), Some(Value::String(_)))
                    && map.contains_key("props")
                    && map.contains_key("children");
                if !is_descriptor {
                    return Node::Malformed(Value::Object(map));
                }
                let tag = match map.remove("type") {
                    Some(Value::String(tag)) => tag,
                    _ => return Node::Malformed(Value::Object(map)),
                };
                let props = match map.remove("props") {
                    Some(Value::Object(props)) => props
                        .into_iter()
                        .map(|(k, v)| {
                            let v = PropValue::from_json_prop(&k, v);
                            (k, v)
                        })
                        .collect(),
                    _ => Props::default(),
                };
                let children = match map.remove("children") {
                    Some(Value::Array(items)) => items.into_iter().map(Node::from_json).collect(),
                    Some(Value::Null) | None => Vec::new(),
                    Some(other) => vec![Node::from_json(other)],
                };
                Node::element(&tag, props, children)
            }
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::List(items) => f.debug_tuple("List").field(items).finish(),
            Node::Module(inner) => f.debug_tuple("Module").field(inner).finish(),
            Node::Component(func) => f.debug_tuple("Component").field(func).finish(),
            Node::Element(d) => fmt::Debug::fmt(d, f),
            Node::Real(key) => f.debug_tuple("Real").field(&key.0).finish(),
            Node::Binding(_) => f.write_str("Binding(..)"),
            Node::Pending(p) => fmt::Debug::fmt(p, f),
            Node::Text(t) => f.debug_tuple("Text").field(t).finish(),
            Node::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Node::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Node::Null => f.write_str("Null"),
            Node::Undefined => f.write_str("Undefined"),
            Node::Malformed(v) => f.debug_tuple("Malformed").field(v).finish(),
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Node::Number(n)
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Number(n as f64)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<NodeKey> for Node {
    fn from(key: NodeKey) -> Self {
        Node::Real(key)
    }
}

impl From<Descriptor> for Node {
    fn from(d: Descriptor) -> Self {
        Node::Element(d)
    }
}

impl From<Pending> for Node {
    fn from(p: Pending) -> Self {
        Node::Pending(p)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Node::Null)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(items: Vec<T>) -> Self {
        Node::List(items.into_iter().map(Into::into).collect())
    }
}

/// What a descriptor describes.
#[derive(Clone, Debug)]
pub enum Kind {
    Tag(Arc<str>),
    Component(ComponentFn),
}

/// Immutable description of one prospective piece of UI.
#[derive(Clone, Debug)]
pub struct Descriptor {
    pub kind: Kind,
    pub props: Props,
    pub children: Vec<Node>,
}

impl Descriptor {
    pub fn tag(tag: &str) -> Self {
        Self {
            kind: Kind::Tag(Arc::from(tag)),
            props: Props::default(),
            children: Vec::new(),
        }
    }

    pub fn component(func: ComponentFn) -> Self {
        Self {
            kind: Kind::Component(func),
            props: Props::default(),
            children: Vec::new(),
        }
    }

    pub fn prop(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.props.insert(name, value);
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Flatten nested lists into one ordered sequence. Non-list nodes, including
/// module wrappers, are kept as they are.
pub fn flatten(nodes: Vec<Node>) -> Vec<Node> {
    fn walk(nodes: Vec<Node>, out: &mut Vec<Node>) {
        for node in nodes {
            match node {
                Node::List(inner) => walk(inner, out),
                other => out.push(other),
            }
        }
    }

    let mut out = Vec::with_capacity(nodes.len());
    walk(nodes, &mut out);
    out
}

/// Format a number the way a script engine stringifies it for text content.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if !(1e-6..1e21).contains(&abs) {
        let s = format!("{n:e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}e{exp}"),
            Some((mantissa, exp)) => format!("{mantissa}e+{exp}"),
            None => s,
        };
    }
    if n.fract() == 0.0 {
        return format!("{n:.0}");
    }
    format!("{n}")
}
