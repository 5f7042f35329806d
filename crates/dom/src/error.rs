use crate::NodeKey;
use std::fmt;

/// Structural errors raised by [`crate::Document`] mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomError {
    InvalidKey(NodeKey),
    MissingKey(NodeKey),
    WrongNodeKind(NodeKey),
    InvalidParent(NodeKey),
    InvalidSibling { parent: NodeKey, before: NodeKey },
    CycleDetected { parent: NodeKey, child: NodeKey },
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::InvalidKey(key) => write!(f, "invalid node key {}", key.0),
            DomError::MissingKey(key) => write!(f, "node {} is not live", key.0),
            DomError::WrongNodeKind(key) => {
                write!(f, "node {} has the wrong kind for this operation", key.0)
            }
            DomError::InvalidParent(key) => write!(f, "node {} cannot have children", key.0),
            DomError::InvalidSibling { parent, before } => write!(
                f,
                "node {} is not a child of node {}",
                before.0, parent.0
            ),
            DomError::CycleDetected { parent, child } => write!(
                f,
                "appending node {} under node {} would create a cycle",
                child.0, parent.0
            ),
        }
    }
}

impl std::error::Error for DomError {}
