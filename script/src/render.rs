//! ASCII views of a proof and of the walk through it.

use std::io::{self, Write};

use trie_proof::{
    decode_path, interpret, keccak256, nibbles_to_hex, parse, LeafValue, Location, NodeRef,
    TrieNode, Walk, WalkError, U256,
};

const STEP: &str = "│   ";

/// Logical view: the nodes the walk visited from the root, each nested under
/// its parent, ending in the value or the error that stopped it.
pub fn logical_path<W: Write>(out: &mut W, target: &[u8], walk: &Walk<'_>) -> io::Result<()> {
    writeln!(out, "--- Logical Trie Path Visualization ---")?;
    writeln!(out, "Target Path: {}", nibbles_to_hex(target))?;

    let last = walk.hops.len().saturating_sub(1);
    for (i, hop) in walk.hops.iter().enumerate() {
        let indent = STEP.repeat(i);
        let followed = i != last
            || matches!(&walk.outcome, Err(err) if stopped_before_node(err));

        match &hop.location {
            Location::Digest(digest) => {
                writeln!(out, "{indent}├── KEY: 0x{}", hex::encode(digest))?
            }
            Location::Inline(_) => writeln!(out, "{indent}├── INLINE NODE (RLP < 32 bytes)")?,
        }
        writeln!(out, "{indent}│   Type: {}", hop.node.kind())?;

        match &*hop.node {
            TrieNode::Branch { value, .. } => {
                writeln!(out, "{indent}│   - Has Value: {}", value.is_some())?;
                if let Some(&nibble) = target.get(hop.depth) {
                    if nibble < 16 {
                        writeln!(
                            out,
                            "{indent}│   -> Branching: Following path nibble '{nibble:x}' (index {nibble})"
                        )?;
                    }
                } else if let Ok(terminal) = &walk.outcome {
                    writeln!(out, "{indent}└── Branch value reached. Final Value:")?;
                    final_value(out, &terminal.value, &format!("{indent}    "))?;
                }
            }
            TrieNode::Extension { path, .. } => {
                writeln!(out, "{indent}│   - Shared Path: '{}'", hp_nibbles(path))?;
                if followed {
                    writeln!(out, "{indent}│   -> Following Extension Node...")?;
                }
            }
            TrieNode::Leaf { path, .. } => {
                writeln!(out, "{indent}│   - Final Path: '{}'", hp_nibbles(path))?;
                if let Ok(terminal) = &walk.outcome {
                    writeln!(out, "{indent}└── Leaf Reached. Final Value:")?;
                    final_value(out, &terminal.value, &format!("{indent}    "))?;
                }
            }
        }
    }

    if let Err(err) = &walk.outcome {
        if stopped_before_node(err) {
            writeln!(out, "{}└── ERROR: {err}", STEP.repeat(walk.hops.len()))?;
        } else {
            writeln!(out, "{}│   └── ERROR: {err}", STEP.repeat(last))?;
        }
    }
    Ok(())
}

/// Flat view: every proof blob in the order it was supplied.
pub fn proof_nodes<W, B>(out: &mut W, proof: &[B]) -> io::Result<()>
where
    W: Write,
    B: AsRef<[u8]>,
{
    writeln!(out, "--- ASCII Trie Path Visualization ---")?;

    let indent = "  ";
    for (i, raw) in proof.iter().enumerate() {
        let raw = raw.as_ref();
        let prefix = if i + 1 == proof.len() { "└──" } else { "├──" };
        writeln!(
            out,
            "{indent}{prefix} [Node {i}] KEY: 0x{}",
            hex::encode(keccak256(raw))
        )?;

        let details = format!("{indent}│   ");
        let node = match parse(raw) {
            Ok(node) => node,
            Err(err) => {
                writeln!(out, "{details}   - ERROR: {err}")?;
                continue;
            }
        };
        writeln!(out, "{details}     Type: {}", node.kind())?;

        match &node {
            TrieNode::Leaf { value, .. } => match interpret(value) {
                LeafValue::Raw(raw) => {
                    writeln!(out, "{details}   - Raw Value: 0x{}", hex::encode(raw))?
                }
                account => final_value(out, &account, &format!("{details}   "))?,
            },
            TrieNode::Extension { next, .. } => {
                writeln!(out, "{details}   - Next Node: {}", describe_ref(next))?
            }
            TrieNode::Branch { value, .. } => {
                writeln!(out, "{details}   - Has Value: {}", value.is_some())?
            }
        }
    }
    Ok(())
}

/// Integer ether with six decimals, truncated.
pub fn format_ether(wei: U256) -> String {
    let (whole, rest) = wei.div_mod(U256::exp10(18));
    let micros = (rest / U256::exp10(12)).low_u64();
    format!("{whole}.{micros:06}")
}

fn final_value<W: Write>(out: &mut W, value: &LeafValue, indent: &str) -> io::Result<()> {
    match value {
        LeafValue::Account(account) => {
            writeln!(out, "{indent}- Nonce:       {}", account.nonce)?;
            writeln!(out, "{indent}- Balance:     {} ETH", format_ether(account.balance))?;
            writeln!(out, "{indent}- StorageRoot: 0x{}", hex::encode(account.storage_root))?;
            writeln!(out, "{indent}- CodeHash:    0x{}", hex::encode(account.code_hash))?;
        }
        LeafValue::Raw(raw) => {
            writeln!(out, "{indent}- Value: 0x{}", hex::encode(raw))?;
            if let Some(word) = value.storage_word() {
                writeln!(out, "{indent}- As Integer: {word}")?;
            }
        }
    }
    Ok(())
}

/// Errors raised while following a reference, before the next node existed.
fn stopped_before_node(err: &WalkError) -> bool {
    matches!(
        err,
        WalkError::MissingNode(_) | WalkError::InlineNode(_) | WalkError::EmptyChild
    )
}

fn hp_nibbles(path: &[u8]) -> String {
    match decode_path(path) {
        Ok((nibbles, _)) => nibbles_to_hex(&nibbles),
        Err(_) => "?".to_string(),
    }
}

fn describe_ref(node_ref: &NodeRef) -> String {
    match node_ref {
        NodeRef::Empty => "empty".to_string(),
        NodeRef::Digest(digest) => format!("0x{}", hex::encode(digest)),
        NodeRef::Inline(raw) => format!("inline 0x{}", hex::encode(raw)),
    }
}
