use dom::{Document, DomError, NodeKey};

/// Output of a materialization: one realized node or an ordered sequence of
/// outputs (sequences nest when a list item is itself a multi-root component).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rendered {
    Node(NodeKey),
    Many(Vec<Rendered>),
}

impl Rendered {
    pub fn as_node(&self) -> Option<NodeKey> {
        match self {
            Rendered::Node(key) => Some(*key),
            Rendered::Many(_) => None,
        }
    }

    /// All realized nodes, flattened, in order.
    pub fn nodes(&self) -> Vec<NodeKey> {
        fn walk(r: &Rendered, out: &mut Vec<NodeKey>) {
            match r {
                Rendered::Node(key) => out.push(*key),
                Rendered::Many(items) => items.iter().for_each(|item| walk(item, out)),
            }
        }

        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }

    /// First realized node in order, if any.
    pub fn first_node(&self) -> Option<NodeKey> {
        match self {
            Rendered::Node(key) => Some(*key),
            Rendered::Many(items) => items.iter().find_map(Rendered::first_node),
        }
    }

    /// Number of entries at the top level.
    pub fn len(&self) -> usize {
        match self {
            Rendered::Node(_) => 1,
            Rendered::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mount every realized node under `parent`, in order.
    pub fn mount_into(&self, doc: &mut Document, parent: NodeKey) -> Result<(), DomError> {
        for key in self.nodes() {
            doc.mount(key, parent)?;
        }
        Ok(())
    }

    /// Unmount every realized node that is still live.
    pub fn unmount(&self, doc: &mut Document) -> Result<(), DomError> {
        for key in self.nodes() {
            if doc.contains(key) {
                doc.unmount(key)?;
            }
        }
        Ok(())
    }
}

impl From<NodeKey> for Rendered {
    fn from(key: NodeKey) -> Self {
        Rendered::Node(key)
    }
}
