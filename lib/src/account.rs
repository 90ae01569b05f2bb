use primitive_types::U256;
use rlp::{Decodable, DecoderError, Rlp};
use serde::{Deserialize, Serialize};

use crate::rlp_encoding::decode_exact;
use crate::types::H256;

/// State trie leaf payload: `[nonce, balance, storage_root, code_hash]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub nonce: u64,
    pub balance: U256,
    pub storage_root: H256,
    pub code_hash: H256,
}

impl Decodable for Account {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 4 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Account {
            nonce: rlp.val_at(0)?,
            balance: rlp.val_at(1)?,
            storage_root: rlp.val_at::<primitive_types::H256>(2)?.0,
            code_hash: rlp.val_at::<primitive_types::H256>(3)?.0,
        })
    }
}

/// Interpretation of the bytes found at the end of a walk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeafValue {
    Account(Account),
    Raw(Vec<u8>),
}

impl LeafValue {
    pub fn as_account(&self) -> Option<&Account> {
        match self {
            LeafValue::Account(account) => Some(account),
            LeafValue::Raw(_) => None,
        }
    }

    /// A storage trie leaf holds the RLP encoding of the slot's word.
    pub fn storage_word(&self) -> Option<U256> {
        match self {
            LeafValue::Raw(raw) => decode_exact(raw).ok(),
            LeafValue::Account(_) => None,
        }
    }
}

/// Decode a leaf payload as an account, keeping the raw bytes when it is not one.
pub fn interpret(payload: &[u8]) -> LeafValue {
    match decode_exact::<Account>(payload) {
        Ok(account) => LeafValue::Account(account),
        Err(_) => LeafValue::Raw(payload.to_vec()),
    }
}
