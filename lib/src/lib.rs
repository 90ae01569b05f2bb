//! Merkle Patricia Trie proof inspection: decode proof nodes, index them by
//! digest and walk a key's path from a pinned root to its value.

pub mod account;
pub mod error;
pub mod node;
pub mod path;
pub mod proof_set;
pub mod rlp_encoding;
pub mod types;
pub mod walk;

#[cfg(test)]
mod test_utils;

pub use account::*;
pub use error::*;
pub use node::*;
pub use path::*;
pub use proof_set::*;
pub use rlp_encoding::*;
pub use types::*;
pub use walk::*;

pub use primitive_types::U256;
