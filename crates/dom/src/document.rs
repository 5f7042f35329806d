//! Live document tree.
//!
//! Invariants:
//! - Keys are allocated by the document and never reused; `NodeKey::INVALID` is
//!   never handed out.
//! - A node has at most one parent; operations never create cycles.
//! - Removing a node invalidates the keys of its whole subtree.
//! - Attribute order is insertion order; setting an existing attribute replaces
//!   its value in place.

use crate::events::{DomEvent, EventHandler, Listener};
use crate::{DomError, Namespace, NodeKey, NodeType, TreeNode};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct Document {
    id: u64,
    nodes: Vec<Option<NodeRecord>>,
    root: NodeKey,
    head: NodeKey,
    body: NodeKey,
}

impl Document {
    /// Create a document with the `#document > html > (head, body)` skeleton.
    pub fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        let mut doc = Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
            root: NodeKey::INVALID,
            head: NodeKey::INVALID,
            body: NodeKey::INVALID,
        };
        let root = doc.insert(NodeKind::Document);
        let html = doc.create_element("html");
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        doc.link(root, html);
        doc.link(html, head);
        doc.link(html, body);
        doc.root = root;
        doc.head = head;
        doc.body = body;
        doc
    }

    /// Stable per-instance identifier, used by caches that hold keys of this
    /// document to detect being paired with a different one.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    pub fn head(&self) -> NodeKey {
        self.head
    }

    pub fn body(&self) -> NodeKey {
        self.body
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.record(key).is_some()
    }

    /// Number of live nodes, detached ones included.
    pub fn live_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn create_element(&mut self, name: &str) -> NodeKey {
        self.create_element_ns(Namespace::Html, &name.to_ascii_lowercase())
    }

    /// Create an element in `namespace`. The name is kept as given, so SVG
    /// names such as `foreignObject` keep their case.
    pub fn create_element_ns(&mut self, namespace: Namespace, name: &str) -> NodeKey {
        self.insert(NodeKind::Element(ElementData {
            name: Arc::from(name),
            namespace,
            attributes: Vec::new(),
            style: Vec::new(),
            handlers: Vec::new(),
        }))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeKey {
        self.insert(NodeKind::Text { text: text.into() })
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeKey {
        self.insert(NodeKind::Comment { text: text.into() })
    }

    /// Copy a node. Element handlers and lifecycle listeners are not copied;
    /// with `deep` the children are cloned recursively.
    pub fn clone_node(&mut self, key: NodeKey, deep: bool) -> Result<NodeKey, DomError> {
        let record = self.live(key)?;
        let kind = match &record.kind {
            NodeKind::Document => return Err(DomError::WrongNodeKind(key)),
            NodeKind::Element(el) => NodeKind::Element(ElementData {
                name: Arc::clone(&el.name),
                namespace: el.namespace,
                attributes: el.attributes.clone(),
                style: el.style.clone(),
                handlers: Vec::new(),
            }),
            NodeKind::Text { text } => NodeKind::Text { text: text.clone() },
            NodeKind::Comment { text } => NodeKind::Comment { text: text.clone() },
        };
        let children = if deep {
            record.children.clone()
        } else {
            Vec::new()
        };
        let copy = self.insert(kind);
        for child in children {
            let child_copy = self.clone_node(child, true)?;
            self.link(copy, child_copy);
        }
        Ok(copy)
    }

    pub fn node_type(&self, key: NodeKey) -> Option<NodeType> {
        self.record(key).map(|r| match r.kind {
            NodeKind::Document => NodeType::Document,
            NodeKind::Element(_) => NodeType::Element,
            NodeKind::Text { .. } => NodeType::Text,
            NodeKind::Comment { .. } => NodeType::Comment,
        })
    }

    pub fn name(&self, key: NodeKey) -> Option<&str> {
        self.element(key).map(|el| el.name.as_ref())
    }

    pub fn namespace(&self, key: NodeKey) -> Option<Namespace> {
        self.element(key).map(|el| el.namespace)
    }

    pub fn is_svg(&self, key: NodeKey) -> bool {
        self.namespace(key) == Some(Namespace::Svg)
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.record(key).and_then(|r| r.parent)
    }

    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.record(key).map(|r| r.children.as_slice()).unwrap_or(&[])
    }

    pub fn attribute(&self, key: NodeKey, name: &str) -> Option<&str> {
        self.element(key)?
            .attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn has_attribute(&self, key: NodeKey, name: &str) -> bool {
        self.element(key)
            .is_some_and(|el| el.attributes.iter().any(|(k, _)| k.eq_ignore_ascii_case(name)))
    }

    pub fn attributes(&self, key: NodeKey) -> &[(Arc<str>, Option<String>)] {
        self.element(key)
            .map(|el| el.attributes.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_attribute(
        &mut self,
        key: NodeKey,
        name: &str,
        value: Option<String>,
    ) -> Result<(), DomError> {
        let el = self.element_mut(key)?;
        match el
            .attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value,
            None => el.attributes.push((Arc::from(name), value)),
        }
        Ok(())
    }

    /// Returns whether the attribute was present.
    pub fn remove_attribute(&mut self, key: NodeKey, name: &str) -> Result<bool, DomError> {
        let el = self.element_mut(key)?;
        let before = el.attributes.len();
        el.attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        Ok(el.attributes.len() != before)
    }

    pub fn style(&self, key: NodeKey) -> &[(String, String)] {
        self.element(key).map(|el| el.style.as_slice()).unwrap_or(&[])
    }

    pub fn set_style(&mut self, key: NodeKey, property: &str, value: &str) -> Result<(), DomError> {
        let el = self.element_mut(key)?;
        match el.style.iter_mut().find(|(k, _)| k == property) {
            Some((_, existing)) => {
                existing.clear();
                existing.push_str(value);
            }
            None => el.style.push((property.to_string(), value.to_string())),
        }
        Ok(())
    }

    /// Install or clear the `on<event>` handler of an element. `event` is the
    /// bare event name (`load`, `click`), matched case-insensitively.
    pub fn set_handler(
        &mut self,
        key: NodeKey,
        event: &str,
        handler: Option<EventHandler>,
    ) -> Result<(), DomError> {
        let el = self.element_mut(key)?;
        el.handlers.retain(|(name, _)| !name.eq_ignore_ascii_case(event));
        if let Some(handler) = handler {
            el.handlers
                .push((Arc::from(event.to_ascii_lowercase().as_str()), handler));
        }
        Ok(())
    }

    pub fn handler(&self, key: NodeKey, event: &str) -> Option<EventHandler> {
        self.element(key)?
            .handlers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(event))
            .map(|(_, h)| Rc::clone(h))
    }

    /// Character data of a text or comment node.
    pub fn text(&self, key: NodeKey) -> Option<&str> {
        match &self.record(key)?.kind {
            NodeKind::Text { text } | NodeKind::Comment { text } => Some(text),
            _ => None,
        }
    }

    pub fn set_text(&mut self, key: NodeKey, text: &str) -> Result<(), DomError> {
        match &mut self.live_mut(key)?.kind {
            NodeKind::Text { text: existing } | NodeKind::Comment { text: existing } => {
                existing.clear();
                existing.push_str(text);
                Ok(())
            }
            _ => Err(DomError::WrongNodeKind(key)),
        }
    }

    /// Concatenated text of all descendant text nodes (comments excluded).
    pub fn text_content(&self, key: NodeKey) -> String {
        let mut out = String::new();
        for node in self.subtree(key) {
            if let Some(NodeKind::Text { text }) = self.record(node).map(|r| &r.kind) {
                out.push_str(text);
            }
        }
        out
    }

    /// Append `child` as the last child of `parent`. A child that already has a
    /// parent is moved.
    pub fn append_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.detach(child)?;
        self.link(parent, child);
        log::trace!(target: "dom", "append {} -> {}", child.0, parent.0);
        Ok(())
    }

    pub fn insert_before(
        &mut self,
        parent: NodeKey,
        child: NodeKey,
        before: NodeKey,
    ) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        if self.live(before)?.parent != Some(parent) || before == child {
            return Err(DomError::InvalidSibling { parent, before });
        }
        self.detach(child)?;
        let siblings = &mut self.live_mut(parent)?.children;
        let pos = siblings
            .iter()
            .position(|k| *k == before)
            .ok_or(DomError::InvalidSibling { parent, before })?;
        siblings.insert(pos, child);
        self.live_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Unlink a node from its parent, keeping the subtree alive.
    pub fn detach(&mut self, key: NodeKey) -> Result<(), DomError> {
        let Some(parent) = self.live_mut(key)?.parent.take() else {
            return Ok(());
        };
        if let Some(record) = self.record_mut(parent) {
            record.children.retain(|k| *k != key);
        }
        Ok(())
    }

    /// Unlink a node and free its subtree. No lifecycle events are dispatched;
    /// see [`Document::unmount`].
    pub fn remove(&mut self, key: NodeKey) -> Result<(), DomError> {
        if key == self.root {
            return Err(DomError::InvalidParent(key));
        }
        self.detach(key)?;
        for node in self.subtree(key) {
            if let Some(slot) = self.nodes.get_mut(node.0 as usize - 1) {
                *slot = None;
            }
        }
        log::trace!(target: "dom", "removed subtree {}", key.0);
        Ok(())
    }

    /// Whether the node is reachable from the document root.
    pub fn is_connected(&self, key: NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            if k == self.root {
                return true;
            }
            current = self.parent(k);
        }
        false
    }

    /// Keys of the subtree rooted at `key`, in tree order.
    pub fn subtree(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        if !self.contains(key) {
            return out;
        }
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    pub fn add_listener(
        &mut self,
        key: NodeKey,
        event: DomEvent,
        listener: Listener,
    ) -> Result<(), DomError> {
        self.live_mut(key)?.listeners.push((event, listener));
        Ok(())
    }

    pub fn listener_count(&self, key: NodeKey, event: DomEvent) -> usize {
        self.record(key)
            .map(|r| r.listeners.iter().filter(|(e, _)| *e == event).count())
            .unwrap_or(0)
    }

    /// Invoke the listeners for `event` on a single node, in registration
    /// order. Returns how many listeners ran.
    pub fn dispatch(&mut self, key: NodeKey, event: DomEvent) -> usize {
        let Some(record) = self.record_mut(key) else {
            return 0;
        };
        let (matching, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut record.listeners)
            .into_iter()
            .partition(|(e, _)| *e == event);
        record.listeners = rest;

        let count = matching.len();
        for (event, listener) in matching {
            match listener {
                Listener::Once(f) => f(self, key),
                Listener::Persistent(mut f) => {
                    f(self, key);
                    if let Some(record) = self.record_mut(key) {
                        record.listeners.push((event, Listener::Persistent(f)));
                    }
                }
            }
        }
        if count != 0 {
            log::trace!(target: "dom", "dispatched {event} to {} ({count} listeners)", key.0);
        }
        count
    }

    /// Dispatch `event` to every node of the subtree, in tree order.
    pub fn dispatch_subtree(&mut self, key: NodeKey, event: DomEvent) {
        for node in self.subtree(key) {
            self.dispatch(node, event);
        }
    }

    /// Append `child` under `parent` and, when `parent` is part of the live
    /// tree, dispatch `mount` over the inserted subtree.
    pub fn mount(&mut self, child: NodeKey, parent: NodeKey) -> Result<(), DomError> {
        self.append_child(parent, child)?;
        if self.is_connected(parent) {
            self.dispatch_subtree(child, DomEvent::Mount);
        }
        Ok(())
    }

    /// Dispatch `destroy` over a connected subtree, then remove it.
    pub fn unmount(&mut self, key: NodeKey) -> Result<(), DomError> {
        self.live(key)?;
        if self.is_connected(key) {
            self.dispatch_subtree(key, DomEvent::Destroy);
        }
        // A destroy listener may already have removed the node.
        if self.contains(key) {
            self.remove(key)?;
        }
        Ok(())
    }

    /// Owned copy of the subtree rooted at `key`.
    pub fn to_tree(&self, key: NodeKey) -> Result<TreeNode, DomError> {
        let record = self.live(key)?;
        let children = record
            .children
            .iter()
            .map(|child| self.to_tree(*child))
            .collect::<Result<Vec<_>, _>>()?;
        let node = match &record.kind {
            NodeKind::Document => TreeNode::Document { key, children },
            NodeKind::Element(el) => TreeNode::Element {
                key,
                name: Arc::clone(&el.name),
                namespace: el.namespace,
                attributes: el.attributes.clone(),
                style: el.style.clone(),
                children,
            },
            NodeKind::Text { text } => TreeNode::Text {
                key,
                text: text.clone(),
            },
            NodeKind::Comment { text } => TreeNode::Comment {
                key,
                text: text.clone(),
            },
        };
        Ok(node)
    }

    fn insert(&mut self, kind: NodeKind) -> NodeKey {
        self.nodes.push(Some(NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }));
        // Keys are 1-based so that `NodeKey::INVALID` never collides.
        NodeKey(self.nodes.len() as u32)
    }

    fn link(&mut self, parent: NodeKey, child: NodeKey) {
        if let Some(record) = self.record_mut(parent) {
            record.children.push(child);
        }
        if let Some(record) = self.record_mut(child) {
            record.parent = Some(parent);
        }
    }

    fn check_insert(&self, parent: NodeKey, child: NodeKey) -> Result<(), DomError> {
        let parent_record = self.live(parent)?;
        let child_record = self.live(child)?;
        if !parent_record.allows_children() {
            return Err(DomError::InvalidParent(parent));
        }
        if matches!(child_record.kind, NodeKind::Document) {
            return Err(DomError::WrongNodeKind(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(DomError::CycleDetected { parent, child });
        }
        Ok(())
    }

    fn is_ancestor(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        let mut current = self.parent(node);
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            current = self.parent(k);
        }
        false
    }

    fn record(&self, key: NodeKey) -> Option<&NodeRecord> {
        if key == NodeKey::INVALID {
            return None;
        }
        self.nodes.get(key.0 as usize - 1)?.as_ref()
    }

    fn record_mut(&mut self, key: NodeKey) -> Option<&mut NodeRecord> {
        if key == NodeKey::INVALID {
            return None;
        }
        self.nodes.get_mut(key.0 as usize - 1)?.as_mut()
    }

    fn live(&self, key: NodeKey) -> Result<&NodeRecord, DomError> {
        if key == NodeKey::INVALID {
            return Err(DomError::InvalidKey(key));
        }
        self.record(key).ok_or(DomError::MissingKey(key))
    }

    fn live_mut(&mut self, key: NodeKey) -> Result<&mut NodeRecord, DomError> {
        if key == NodeKey::INVALID {
            return Err(DomError::InvalidKey(key));
        }
        self.record_mut(key).ok_or(DomError::MissingKey(key))
    }

    fn element(&self, key: NodeKey) -> Option<&ElementData> {
        match &self.record(key)?.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, key: NodeKey) -> Result<&mut ElementData, DomError> {
        match &mut self.live_mut(key)?.kind {
            NodeKind::Element(el) => Ok(el),
            _ => Err(DomError::WrongNodeKind(key)),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("live", &self.live_count())
            .finish()
    }
}

struct NodeRecord {
    kind: NodeKind,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    listeners: Vec<(DomEvent, Listener)>,
}

impl NodeRecord {
    fn allows_children(&self) -> bool {
        matches!(self.kind, NodeKind::Document | NodeKind::Element(_))
    }
}

enum NodeKind {
    Document,
    Element(ElementData),
    Text { text: String },
    Comment { text: String },
}

struct ElementData {
    name: Arc<str>,
    namespace: Namespace,
    attributes: Vec<(Arc<str>, Option<String>)>,
    style: Vec<(String, String)>,
    handlers: Vec<(Arc<str>, EventHandler)>,
}

#[cfg(test)]
mod tests;
