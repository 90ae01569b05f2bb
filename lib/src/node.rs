use crate::error::DecodeError;
use crate::path::decode_path;
use crate::rlp_encoding::{decode_items, RlpItem};
use crate::types::{NodeRef, TrieNode};

/// Decode a serialized trie node.
///
/// A 17-item list is a branch; a 2-item list is an extension or a leaf, told
/// apart by the flag nibble of its hex-prefix path. An extension must share at
/// least one nibble.
pub fn parse(raw: &[u8]) -> Result<TrieNode, DecodeError> {
    if raw.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let items = decode_items(raw)?;
    match items.len() {
        17 => {
            let mut children: [NodeRef; 16] = Default::default();
            for (slot, item) in children.iter_mut().zip(&items[..16]) {
                *slot = node_ref(item)?;
            }
            let value = items[16].data()?;

            Ok(TrieNode::Branch {
                children,
                value: (!value.is_empty()).then(|| value.to_vec()),
            })
        }
        2 => {
            let path = items[0].data()?;
            let first = *path.first().ok_or(DecodeError::EmptyPathField)?;

            match first >> 4 {
                0 | 1 => {
                    if decode_path(path)?.0.is_empty() {
                        return Err(DecodeError::EmptyExtensionPath);
                    }
                    Ok(TrieNode::Extension {
                        path: path.to_vec(),
                        next: node_ref(&items[1])?,
                    })
                }
                2 | 3 => Ok(TrieNode::Leaf {
                    path: path.to_vec(),
                    value: items[1].data()?.to_vec(),
                }),
                flag => Err(DecodeError::InvalidHexPrefixFlag(flag)),
            }
        }
        n => Err(DecodeError::InvalidItemCount(n)),
    }
}

/// Classify a child slot.
///
/// Embedded children appear either as a nested list or as a short byte string
/// holding the child's encoding; both become [`NodeRef::Inline`].
fn node_ref(item: &RlpItem<'_>) -> Result<NodeRef, DecodeError> {
    let bytes = match *item {
        RlpItem::Data([]) => return Ok(NodeRef::Empty),
        RlpItem::Data(bytes) | RlpItem::List(bytes) => bytes,
    };

    match bytes.len() {
        32 if matches!(item, RlpItem::Data(_)) => {
            let mut digest = [0u8; 32];
            digest.copy_from_slice(bytes);
            Ok(NodeRef::Digest(digest))
        }
        len if len < 32 => Ok(NodeRef::Inline(bytes.to_vec())),
        len => Err(DecodeError::InvalidReferenceLength(len)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::encode_path;
    use crate::test_utils::{branch, extension, leaf, nibs, Child};
    use proptest::prelude::*;
    use rlp::RlpStream;

    #[test]
    fn test_parse_leaf() {
        let raw = leaf(&nibs("ab12"), b"value");
        let node = parse(&raw).unwrap();
        assert_eq!(
            node,
            TrieNode::Leaf {
                path: encode_path(&nibs("ab12"), true),
                value: b"value".to_vec(),
            }
        );
        assert_eq!(node.kind(), "Leaf");
    }

    #[test]
    fn test_parse_extension_with_digest() {
        let raw = extension(&nibs("a"), Child::Digest([7u8; 32]));
        let node = parse(&raw).unwrap();
        assert_eq!(
            node,
            TrieNode::Extension {
                path: vec![0x1a],
                next: NodeRef::Digest([7u8; 32]),
            }
        );
    }

    #[test]
    fn test_parse_extension_with_inline_child() {
        let child = leaf(&nibs("bc"), b"v");
        let raw = extension(&nibs("a"), Child::Inline(child.clone()));
        match parse(&raw).unwrap() {
            TrieNode::Extension { next, .. } => assert_eq!(next, NodeRef::Inline(child)),
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn test_parse_short_string_child_is_inline() {
        let mut stream = RlpStream::new_list(2);
        stream.append(&vec![0x00u8, 0xab]);
        stream.append(&vec![0xc2u8, 0x01, 0x02]);
        let node = parse(&stream.out()).unwrap();
        assert_eq!(
            node,
            TrieNode::Extension {
                path: vec![0x00, 0xab],
                next: NodeRef::Inline(vec![0xc2, 0x01, 0x02]),
            }
        );
    }

    #[test]
    fn test_parse_branch() {
        let mut children: [Child; 16] = Default::default();
        children[3] = Child::Digest([1u8; 32]);
        children[0xf] = Child::Inline(leaf(&nibs("1"), b"x"));
        let raw = branch(children, Some(&b"here"[..]));

        match parse(&raw).unwrap() {
            TrieNode::Branch { children, value } => {
                assert_eq!(children[3], NodeRef::Digest([1u8; 32]));
                assert_eq!(children[0xf], NodeRef::Inline(leaf(&nibs("1"), b"x")));
                assert_eq!(children.iter().filter(|c| c.is_empty()).count(), 14);
                assert_eq!(value, Some(b"here".to_vec()));
            }
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn test_parse_branch_without_value() {
        let raw = branch(Default::default(), None);
        match parse(&raw).unwrap() {
            TrieNode::Branch { value, .. } => assert_eq!(value, None),
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse(&[]), Err(DecodeError::EmptyInput));
    }

    #[test]
    fn test_parse_not_a_list() {
        assert!(matches!(
            parse(&[0x83, b'd', b'o', b'g']),
            Err(DecodeError::WireDecode(_))
        ));
    }

    #[test]
    fn test_parse_nineteen_items() {
        let mut stream = RlpStream::new_list(19);
        for _ in 0..19 {
            stream.append_empty_data();
        }
        assert_eq!(parse(&stream.out()), Err(DecodeError::InvalidItemCount(19)));
    }

    #[test]
    fn test_parse_empty_path_field() {
        let mut stream = RlpStream::new_list(2);
        stream.append_empty_data();
        stream.append(&b"value".to_vec());
        assert_eq!(parse(&stream.out()), Err(DecodeError::EmptyPathField));
    }

    #[test]
    fn test_parse_invalid_flag() {
        let mut stream = RlpStream::new_list(2);
        stream.append(&vec![0x41u8, 0x23]);
        stream.append(&b"value".to_vec());
        assert_eq!(parse(&stream.out()), Err(DecodeError::InvalidHexPrefixFlag(4)));
    }

    #[test]
    fn test_parse_extension_without_shared_nibbles() {
        let raw = extension(&[], Child::Digest([3u8; 32]));
        assert_eq!(parse(&raw), Err(DecodeError::EmptyExtensionPath));

        // a leaf may have no path left to match
        let raw = leaf(&[], b"v");
        assert!(matches!(parse(&raw), Ok(TrieNode::Leaf { .. })));
    }

    #[test]
    fn test_parse_oversized_reference() {
        let mut stream = RlpStream::new_list(2);
        stream.append(&vec![0x00u8, 0xab]);
        stream.append(&vec![0u8; 33]);
        assert_eq!(parse(&stream.out()), Err(DecodeError::InvalidReferenceLength(33)));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let raw = extension(&nibs("a"), Child::Inline(leaf(&nibs("bcd"), b"0123456789abc")));
        assert_eq!(parse(&raw), parse(&raw));
    }

    proptest! {
        #[test]
        fn prop_branch_always_has_sixteen_slots(
            slots in proptest::collection::vec(any::<Option<[u8; 32]>>(), 16),
            value in proptest::option::of(proptest::collection::vec(any::<u8>(), 1..40)),
        ) {
            let mut children: [Child; 16] = Default::default();
            for (child, slot) in children.iter_mut().zip(&slots) {
                if let Some(digest) = slot {
                    *child = Child::Digest(*digest);
                }
            }
            let raw = branch(children, value.as_deref());

            match parse(&raw).unwrap() {
                TrieNode::Branch { children, value: parsed } => {
                    prop_assert_eq!(children.len(), 16);
                    for (parsed, slot) in children.iter().zip(&slots) {
                        match slot {
                            Some(digest) => prop_assert_eq!(parsed, &NodeRef::Digest(*digest)),
                            None => prop_assert!(parsed.is_empty()),
                        }
                    }
                    prop_assert_eq!(parsed, value);
                }
                other => prop_assert!(false, "unexpected node {:?}", other),
            }
        }
    }
}
