use std::sync::Arc;

/// Stable identity of a node within one [`crate::Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub u32);

impl NodeKey {
    /// Reserved sentinel for "unassigned/invalid" identity.
    pub const INVALID: NodeKey = NodeKey(0);
}

/// Element namespace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
}

/// Coarse node kind, used by callers that only need to branch on shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeType {
    Document,
    Element,
    Text,
    Comment,
}

/// Owned, detached copy of a subtree.
///
/// Produced by [`crate::Document::to_tree`] for debugging and test comparisons;
/// mutating it has no effect on the live document.
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode {
    Document {
        key: NodeKey,
        children: Vec<TreeNode>,
    },
    Element {
        key: NodeKey,
        name: Arc<str>,
        namespace: Namespace,
        attributes: Vec<(Arc<str>, Option<String>)>,
        style: Vec<(String, String)>,
        children: Vec<TreeNode>,
    },
    Text {
        key: NodeKey,
        text: String,
    },
    Comment {
        key: NodeKey,
        text: String,
    },
}

impl TreeNode {
    pub fn key(&self) -> NodeKey {
        match self {
            TreeNode::Document { key, .. } => *key,
            TreeNode::Element { key, .. } => *key,
            TreeNode::Text { key, .. } => *key,
            TreeNode::Comment { key, .. } => *key,
        }
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Document { children, .. } | TreeNode::Element { children, .. } => children,
            TreeNode::Text { .. } | TreeNode::Comment { .. } => &[],
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            TreeNode::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .and_then(|(_, v)| v.as_deref()),
            _ => None,
        }
    }
}
