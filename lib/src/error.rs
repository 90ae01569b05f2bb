use thiserror::Error;

use crate::path::nibbles_to_hex;
use crate::types::{Nibbles, H256};

/// The supplied bytes are not a valid node encoding.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("empty raw data")]
    EmptyInput,
    #[error("failed to decode RLP: {0}")]
    WireDecode(#[from] rlp::DecoderError),
    #[error("invalid node with {0} items")]
    InvalidItemCount(usize),
    #[error("node has 2 items but path is empty")]
    EmptyPathField,
    #[error("invalid hex-prefix nibble: {0:x}")]
    InvalidHexPrefixFlag(u8),
    #[error("hex-prefix path is empty")]
    MalformedPath,
    #[error("extension node has an empty shared path")]
    EmptyExtensionPath,
    #[error("child reference of {0} bytes is neither a digest nor an inline node")]
    InvalidReferenceLength(usize),
}

/// A proof blob failed to decode.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("proof node {index}: {error}")]
pub struct ProofSetError {
    pub index: usize,
    pub error: DecodeError,
}

/// The proof does not lead from the root to a value along the target path.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WalkError {
    #[error("missing node in proof path: 0x{}", hex::encode(.0))]
    MissingNode(H256),
    #[error("invalid path nibble {0}")]
    InvalidNibble(u8),
    #[error("path led to an empty slot {slot:x} in branch node")]
    EmptyBranchSlot { slot: u8 },
    #[error("empty child reference")]
    EmptyChild,
    #[error("path ended at branch without value")]
    PathEndedAtBranchWithoutValue,
    #[error(
        "path mismatch: expected prefix '{}' but got '{}'",
        nibbles_to_hex(.expected),
        nibbles_to_hex(.actual)
    )]
    PathPrefixMismatch { expected: Nibbles, actual: Nibbles },
    #[error(
        "path mismatch: expected final path '{}' but remaining path is '{}'",
        nibbles_to_hex(.expected),
        nibbles_to_hex(.actual)
    )]
    PathSuffixMismatch { expected: Nibbles, actual: Nibbles },
    #[error("failed to parse inline node: {0}")]
    InlineNode(DecodeError),
    #[error(transparent)]
    Path(#[from] DecodeError),
}
