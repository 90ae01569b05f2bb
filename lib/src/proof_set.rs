use std::collections::HashMap;

use crate::error::ProofSetError;
use crate::node::parse;
use crate::rlp_encoding::keccak256;
use crate::types::{TrieNode, H256};

/// Parsed proof nodes keyed by the Keccak-256 of their raw encoding.
///
/// Built once per query and only read afterwards, so a single set can back
/// any number of concurrent walks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProofSet {
    nodes: HashMap<H256, TrieNode>,
}

impl ProofSet {
    /// Hash and parse every blob. Blob order does not matter; a failure is
    /// reported with the index of the blob that caused it.
    pub fn build<I>(blobs: I) -> Result<Self, ProofSetError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut nodes = HashMap::new();
        for (index, blob) in blobs.into_iter().enumerate() {
            let (digest, node) = hash_and_parse(index, blob.as_ref())?;
            nodes.insert(digest, node);
        }
        Ok(Self { nodes })
    }

    /// Same as [`ProofSet::build`], decoding blobs on the rayon pool.
    ///
    /// When several blobs are malformed the lowest index is reported.
    #[cfg(feature = "parallel")]
    pub fn build_par<B>(blobs: &[B]) -> Result<Self, ProofSetError>
    where
        B: AsRef<[u8]> + Sync,
    {
        use rayon::prelude::*;

        let parsed: Vec<_> = blobs
            .par_iter()
            .enumerate()
            .map(|(index, blob)| hash_and_parse(index, blob.as_ref()))
            .collect();

        let mut nodes = HashMap::with_capacity(parsed.len());
        for entry in parsed {
            let (digest, node) = entry?;
            nodes.insert(digest, node);
        }
        Ok(Self { nodes })
    }

    pub fn get(&self, digest: &H256) -> Option<&TrieNode> {
        self.nodes.get(digest)
    }

    pub fn contains(&self, digest: &H256) -> bool {
        self.nodes.contains_key(digest)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&H256, &TrieNode)> {
        self.nodes.iter()
    }
}

fn hash_and_parse(index: usize, blob: &[u8]) -> Result<(H256, TrieNode), ProofSetError> {
    let node = parse(blob).map_err(|error| ProofSetError { index, error })?;
    Ok((keccak256(blob), node))
}
