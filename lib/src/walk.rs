use std::borrow::Cow;

use crate::account::{interpret, LeafValue};
use crate::error::WalkError;
use crate::node::parse;
use crate::path::decode_path;
use crate::proof_set::ProofSet;
use crate::types::{NodeRef, TrieNode, H256};

/// Where a visited node came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// Looked up in the proof set by digest.
    Digest(H256),
    /// Parsed from an inline reference inside its parent.
    Inline(Vec<u8>),
}

/// A node visited during a walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hop<'a> {
    pub location: Location,
    pub node: Cow<'a, TrieNode>,
    /// Target nibbles consumed before reaching this node.
    pub depth: usize,
}

/// The value a walk ended on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Terminal {
    pub payload: Vec<u8>,
    pub value: LeafValue,
}

/// Every node visited from the root, and how the walk ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Walk<'a> {
    pub hops: Vec<Hop<'a>>,
    pub outcome: Result<Terminal, WalkError>,
}

enum Step {
    Done(Vec<u8>),
    Follow { child: NodeRef, consumed: usize },
}

/// Walk from `root` along `target` and return the value at its end.
pub fn walk(root: &H256, target: &[u8], proof_set: &ProofSet) -> Result<Terminal, WalkError> {
    trace(root, target, proof_set).outcome
}

/// Like [`walk`], also keeping every node visited on the way.
///
/// Each branch consumes one nibble and each extension a non-empty prefix of the
/// path, and inline children are strictly shorter than their parent, so the
/// number of hops is bounded by the target length plus the inline hops.
pub fn trace<'a>(root: &H256, target: &[u8], proof_set: &'a ProofSet) -> Walk<'a> {
    let mut hops = Vec::new();
    let mut location = Location::Digest(*root);
    let mut depth = 0;

    let outcome = loop {
        let node = match resolve(&location, proof_set) {
            Ok(node) => node,
            Err(err) => break Err(err),
        };
        let next = step(&node, &target[depth..]);
        hops.push(Hop {
            location,
            node,
            depth,
        });

        match next {
            Ok(Step::Done(payload)) => {
                let value = interpret(&payload);
                break Ok(Terminal { payload, value });
            }
            Ok(Step::Follow { child, consumed }) => {
                depth += consumed;
                location = match child {
                    NodeRef::Digest(digest) => Location::Digest(digest),
                    NodeRef::Inline(raw) => Location::Inline(raw),
                    NodeRef::Empty => break Err(WalkError::EmptyChild),
                };
            }
            Err(err) => break Err(err),
        }
    };

    Walk { hops, outcome }
}

fn resolve<'a>(location: &Location, proof_set: &'a ProofSet) -> Result<Cow<'a, TrieNode>, WalkError> {
    match location {
        Location::Digest(digest) => proof_set
            .get(digest)
            .map(Cow::Borrowed)
            .ok_or(WalkError::MissingNode(*digest)),
        Location::Inline(raw) => parse(raw)
            .map(Cow::Owned)
            .map_err(WalkError::InlineNode),
    }
}

fn step(node: &TrieNode, remaining: &[u8]) -> Result<Step, WalkError> {
    match node {
        TrieNode::Branch { children, value } => {
            let Some(&nibble) = remaining.first() else {
                return value
                    .clone()
                    .map(Step::Done)
                    .ok_or(WalkError::PathEndedAtBranchWithoutValue);
            };
            let child = children
                .get(nibble as usize)
                .ok_or(WalkError::InvalidNibble(nibble))?;
            if child.is_empty() {
                return Err(WalkError::EmptyBranchSlot { slot: nibble });
            }
            Ok(Step::Follow {
                child: child.clone(),
                consumed: 1,
            })
        }
        TrieNode::Extension { path, next } => {
            let (shared, _) = decode_path(path)?;
            if !remaining.starts_with(&shared) {
                return Err(WalkError::PathPrefixMismatch {
                    expected: shared,
                    actual: remaining.to_vec(),
                });
            }
            Ok(Step::Follow {
                child: next.clone(),
                consumed: shared.len(),
            })
        }
        TrieNode::Leaf { path, value } => {
            let (end, _) = decode_path(path)?;
            if end != remaining {
                return Err(WalkError::PathSuffixMismatch {
                    expected: end,
                    actual: remaining.to_vec(),
                });
            }
            Ok(Step::Done(value.clone()))
        }
    }
}
