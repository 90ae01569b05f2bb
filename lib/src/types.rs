use serde::{Deserialize, Serialize};

/// 32-byte hash type
pub type H256 = [u8; 32];

/// A sequence of half-bytes, each in `0..16`.
pub type Nibbles = Vec<u8>;

/// Reference from a parent node to one of its children.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRef {
    /// No child in this slot.
    #[default]
    Empty,

    /// Keccak-256 of the child's encoding, resolved through the proof set.
    Digest(H256),

    /// Child encoding shorter than 32 bytes, embedded in the parent.
    Inline(Vec<u8>),
}

impl NodeRef {
    pub fn is_empty(&self) -> bool {
        matches!(self, NodeRef::Empty)
    }
}

/// MPT Node types
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrieNode {
    /// Branch node: 16 children + optional value
    Branch {
        children: [NodeRef; 16],
        value: Option<Vec<u8>>,
    },

    /// Extension node: [encoded_path, next]
    Extension { path: Vec<u8>, next: NodeRef },

    /// Leaf node: [encoded_path, value]
    Leaf { path: Vec<u8>, value: Vec<u8> },
}

impl TrieNode {
    pub fn kind(&self) -> &'static str {
        match self {
            TrieNode::Branch { .. } => "Branch",
            TrieNode::Extension { .. } => "Extension",
            TrieNode::Leaf { .. } => "Leaf",
        }
    }
}
