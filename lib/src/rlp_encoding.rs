use rlp::{DecoderError, Rlp};
use sha3::{Digest, Keccak256};

use crate::types::H256;

/// Compute Keccak256 hash
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// One element of a decoded node list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RlpItem<'a> {
    /// Payload of a byte string.
    Data(&'a [u8]),
    /// Raw encoding of a nested list, header included.
    List(&'a [u8]),
}

impl<'a> RlpItem<'a> {
    /// The byte string payload, rejecting nested lists.
    pub fn data(&self) -> Result<&'a [u8], DecoderError> {
        match *self {
            RlpItem::Data(bytes) => Ok(bytes),
            RlpItem::List(_) => Err(DecoderError::RlpExpectedToBeData),
        }
    }
}

/// Decode an RLP list into its items.
///
/// The whole buffer must be exactly one list: trailing bytes after the list, or
/// items that do not add up to the declared payload length, are rejected.
pub fn decode_items(data: &[u8]) -> Result<Vec<RlpItem<'_>>, DecoderError> {
    let rlp = Rlp::new(data);
    let info = rlp.payload_info()?;
    if info.total() != data.len() {
        return Err(DecoderError::RlpInconsistentLengthAndData);
    }
    if !rlp.is_list() {
        return Err(DecoderError::RlpExpectedToBeList);
    }

    let mut items = Vec::new();
    let mut consumed = 0;
    for item in rlp.iter() {
        let raw = item.as_raw();
        consumed += raw.len();
        if item.is_list() {
            items.push(RlpItem::List(raw));
        } else {
            items.push(RlpItem::Data(item.data()?));
        }
    }
    if consumed != info.value_len {
        return Err(DecoderError::RlpInconsistentLengthAndData);
    }

    Ok(items)
}

/// Decode a value, requiring it to span the whole buffer.
pub fn decode_exact<T: rlp::Decodable>(data: &[u8]) -> Result<T, DecoderError> {
    let rlp = Rlp::new(data);
    if rlp.payload_info()?.total() != data.len() {
        return Err(DecoderError::RlpInconsistentLengthAndData);
    }
    rlp.as_val()
}
