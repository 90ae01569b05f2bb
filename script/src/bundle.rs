//! On-disk form of a fetched proof, so a walk can be replayed offline.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use alloy::primitives::{Bytes, B256};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use trie_proof::{account_path, storage_path, Nibbles, ProofSet, ProofSetError, U256};

/// Which trie a bundle's proof belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrieKind {
    State,
    Storage,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofBundle {
    pub block: u64,
    pub trie: TrieKind,
    /// Root the proof is walked from: the block's state root, or the account's
    /// storage root.
    pub root: B256,
    /// Account address for state proofs, 32-byte slot index for storage proofs.
    pub key: Bytes,
    pub proof: Vec<Bytes>,
}

impl ProofBundle {
    pub fn target_path(&self) -> anyhow::Result<Nibbles> {
        match self.trie {
            TrieKind::State => Ok(account_path(&self.key)),
            TrieKind::Storage => {
                if self.key.len() > 32 {
                    bail!("storage slot key is {} bytes, expected at most 32", self.key.len());
                }
                Ok(storage_path(U256::from_big_endian(&self.key)))
            }
        }
    }

    pub fn proof_set(&self) -> Result<ProofSet, ProofSetError> {
        ProofSet::build(&self.proof)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse proof bundle {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("failed to write proof bundle {}", path.display()))
    }
}
