use primitive_types::U256;

use crate::error::DecodeError;
use crate::rlp_encoding::keccak256;
use crate::types::Nibbles;

/// Encode path with compact encoding
/// First nibble contains: odd_flag (bit 0) and leaf_flag (bit 1)
pub fn encode_path(nibbles: &[u8], is_leaf: bool) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(nibbles.len() / 2 + 1);
    let odd_len = nibbles.len() % 2 == 1;

    // 0x0: extension, even length
    // 0x1: extension, odd length
    // 0x2: leaf, even length
    // 0x3: leaf, odd length
    let prefix = match (odd_len, is_leaf) {
        (true, true) => 0x3,
        (false, true) => 0x2,
        (true, false) => 0x1,
        (false, false) => 0x0,
    };

    let rest = if odd_len {
        encoded.push((prefix << 4) | nibbles[0]);
        &nibbles[1..]
    } else {
        encoded.push(prefix << 4);
        nibbles
    };
    for pair in rest.chunks_exact(2) {
        encoded.push((pair[0] << 4) | pair[1]);
    }

    encoded
}

/// Decode compact-encoded path
/// Returns (nibbles, is_leaf)
pub fn decode_path(encoded: &[u8]) -> Result<(Nibbles, bool), DecodeError> {
    let (&first, rest) = encoded.split_first().ok_or(DecodeError::MalformedPath)?;
    let flag = first >> 4;
    let is_leaf = flag & 0x2 != 0;
    let odd_len = flag & 0x1 != 0;

    let mut nibbles = Vec::with_capacity(rest.len() * 2 + 1);
    if odd_len {
        // First nibble is in the first byte
        nibbles.push(first & 0x0F);
    }
    nibbles.extend(to_nibbles(rest));

    Ok((nibbles, is_leaf))
}

/// Convert bytes to nibbles (hex digits)
pub fn to_nibbles(data: &[u8]) -> Nibbles {
    let mut nibbles = Vec::with_capacity(data.len() * 2);
    for &byte in data {
        nibbles.push(byte >> 4);
        nibbles.push(byte & 0x0F);
    }
    nibbles
}

/// Lower-case hex rendering of a nibble string, one character per nibble.
pub fn nibbles_to_hex(nibbles: &[u8]) -> String {
    nibbles.iter().map(|n| format!("{n:x}")).collect()
}

/// Path of an account in the state trie.
pub fn account_path(address: &[u8]) -> Nibbles {
    to_nibbles(&keccak256(address))
}

/// Path of a storage slot in an account's storage trie.
pub fn storage_path(slot: U256) -> Nibbles {
    let mut padded = [0u8; 32];
    slot.to_big_endian(&mut padded);
    to_nibbles(&keccak256(&padded))
}
