use crate::node::{Node, format_number};
use crate::pending::Pending;
use dom::{Document, EventHandler, NodeKey};
use serde_json::Value;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::rc::Rc;

/// Key under which children are merged into the props of a function component.
pub const CHILDREN: &str = "children";

/// Property mapping of a descriptor. Keys are unique; iteration is in key order.
#[derive(Clone, Default)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<PropValue>) -> Option<PropValue> {
        self.0.insert(name.to_string(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        self.0.remove(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, PropValue> {
        self.0.iter()
    }

    /// Copy every entry of `other` over this mapping.
    pub fn merge(&mut self, other: Props) {
        self.0.extend(other.0);
    }

    pub fn children(&self) -> &[Node] {
        match self.0.get(CHILDREN) {
            Some(PropValue::Children(children)) => children,
            _ => &[],
        }
    }

    pub fn set_children(&mut self, children: Vec<Node>) {
        self.0
            .insert(CHILDREN.to_string(), PropValue::Children(children));
    }

    /// String form of a scalar prop.
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).and_then(PropValue::to_attribute_value)
    }
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl FromIterator<(String, PropValue)> for Props {
    fn from_iter<I: IntoIterator<Item = (String, PropValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Props {
    type Item = (&'a String, &'a PropValue);
    type IntoIter = btree_map::Iter<'a, String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Clone)]
pub enum PropValue {
    Str(String),
    Number(f64),
    Bool(bool),
    Null,
    /// Inline style declarations, in order.
    Style(Vec<(String, String)>),
    /// `on<event>` handler.
    Handler(EventHandler),
    Pending(Pending),
    Node(Box<Node>),
    Children(Vec<Node>),
}

impl PropValue {
    pub fn handler(f: impl Fn(&mut Document, NodeKey) + 'static) -> Self {
        PropValue::Handler(Rc::new(f))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            PropValue::Str(_) => "string",
            PropValue::Number(_) => "number",
            PropValue::Bool(_) => "bool",
            PropValue::Null => "null",
            PropValue::Style(_) => "style",
            PropValue::Handler(_) => "handler",
            PropValue::Pending(_) => "pending",
            PropValue::Node(_) => "node",
            PropValue::Children(_) => "children",
        }
    }

    /// Attribute text for scalar values; `None` for everything else.
    pub fn to_attribute_value(&self) -> Option<String> {
        match self {
            PropValue::Str(s) => Some(s.clone()),
            PropValue::Number(n) => Some(format_number(*n)),
            PropValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Convert the JSON value of prop `name`. Only `style` turns a flat
    /// object of strings and numbers into a style map.
    pub fn from_json_prop(name: &str, value: Value) -> Self {
        match value {
            Value::Object(map)
                if name == "style" && map.values().all(|v| v.is_string() || v.is_number()) =>
            {
                PropValue::Style(
                    map.into_iter()
                        .map(|(k, v)| {
                            let v = match v {
                                Value::String(s) => s,
                                other => other.to_string(),
                            };
                            (k, v)
                        })
                        .collect(),
                )
            }
            other => Self::from_json(other),
        }
    }

    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => PropValue::Null,
            Value::Bool(b) => PropValue::Bool(b),
            Value::Number(n) => PropValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => PropValue::Str(s),
            other => PropValue::Node(Box::new(Node::from_json(other))),
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Str(s) => fmt::Debug::fmt(s, f),
            PropValue::Number(n) => fmt::Debug::fmt(n, f),
            PropValue::Bool(b) => fmt::Debug::fmt(b, f),
            PropValue::Null => f.write_str("null"),
            PropValue::Style(pairs) => f.debug_tuple("Style").field(pairs).finish(),
            PropValue::Handler(_) => f.write_str("Handler(..)"),
            PropValue::Pending(p) => fmt::Debug::fmt(p, f),
            PropValue::Node(n) => fmt::Debug::fmt(n, f),
            PropValue::Children(c) => f.debug_tuple("Children").field(c).finish(),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Str(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Str(s)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self {
        PropValue::Number(n as f64)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<Pending> for PropValue {
    fn from(p: Pending) -> Self {
        PropValue::Pending(p)
    }
}

impl From<Node> for PropValue {
    fn from(n: Node) -> Self {
        PropValue::Node(Box::new(n))
    }
}

impl From<EventHandler> for PropValue {
    fn from(h: EventHandler) -> Self {
        PropValue::Handler(h)
    }
}
