//! Node encoders for building proof fixtures in tests.

use rlp::RlpStream;

use crate::path::encode_path;
use crate::rlp_encoding::keccak256;
use crate::types::{Nibbles, H256};

/// How a parent embeds a child in a fixture.
#[derive(Clone, Debug, Default)]
pub enum Child {
    #[default]
    Empty,
    Digest(H256),
    /// A complete node encoding, embedded as a nested list.
    Inline(Vec<u8>),
}

impl Child {
    /// Reference an encoded node the way a real trie does: inline below 32 bytes.
    pub fn to(encoded: &[u8]) -> Self {
        if encoded.len() < 32 {
            Child::Inline(encoded.to_vec())
        } else {
            Child::Digest(keccak256(encoded))
        }
    }

    fn append_to(&self, stream: &mut RlpStream) {
        match self {
            Child::Empty => {
                stream.append_empty_data();
            }
            Child::Digest(digest) => {
                stream.append(&digest.to_vec());
            }
            Child::Inline(raw) => {
                stream.append_raw(raw, 1);
            }
        }
    }
}

/// Parse a hex string into nibbles, one per character.
pub fn nibs(hex: &str) -> Nibbles {
    hex.chars()
        .map(|c| c.to_digit(16).expect("hex digit") as u8)
        .collect()
}

pub fn leaf(path: &[u8], value: &[u8]) -> Vec<u8> {
    let mut stream = RlpStream::new_list(2);
    stream.append(&encode_path(path, true));
    stream.append(&value.to_vec());
    stream.out().to_vec()
}

pub fn extension(path: &[u8], next: Child) -> Vec<u8> {
    let mut stream = RlpStream::new_list(2);
    stream.append(&encode_path(path, false));
    next.append_to(&mut stream);
    stream.out().to_vec()
}

pub fn branch(children: [Child; 16], value: Option<&[u8]>) -> Vec<u8> {
    let mut stream = RlpStream::new_list(17);
    for child in &children {
        child.append_to(&mut stream);
    }
    match value {
        Some(value) => stream.append(&value.to_vec()),
        None => stream.append_empty_data(),
    };
    stream.out().to_vec()
}

/// A single-key proof: one branch per nibble of `path[..depth]`, then a leaf
/// holding the rest of the path.
///
/// Returns the root digest and the proof blobs, root first. Nodes shorter than
/// 32 bytes are embedded in their parent and do not appear as blobs, except the
/// root which is always hashed.
pub fn branch_chain(path: &[u8], depth: usize, value: &[u8]) -> (H256, Vec<Vec<u8>>) {
    let mut blobs = Vec::new();
    let mut node = leaf(&path[depth..], value);

    for &nibble in path[..depth].iter().rev() {
        let child = Child::to(&node);
        if matches!(child, Child::Digest(_)) {
            blobs.push(node);
        }
        let mut children: [Child; 16] = Default::default();
        children[nibble as usize] = child;
        node = branch(children, None);
    }

    let root = keccak256(&node);
    blobs.push(node);
    blobs.reverse();
    (root, blobs)
}
