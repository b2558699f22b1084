use crate::*;
use proptest::prelude::*;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Strategy: a `(index_name, file_name, chunk_id)` triple.
///
/// Names draw from a small alphabet so that equal triples show up often
/// enough to exercise the equal-key paths.
fn arb_triple() -> impl Strategy<Value = (String, String, i32)> {
    (
        "[ab_]{0,3}",
        prop_oneof!["[ab.]{0,3}", "\\PC{0,8}"],
        prop_oneof![0i32..4, any::<i32>()],
    )
}

fn std_hash(key: &ChunkKey) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Plain recomputation of the contract, independent of `hash::*`.
fn reference_hash(index_name: &str, file_name: &str, chunk_id: i32) -> i32 {
    fn s(text: &str) -> i32 {
        let mut h: i32 = 0;
        for unit in text.encode_utf16() {
            h = h.wrapping_mul(31).wrapping_add(unit as i32);
        }
        h
    }

    let mut acc: i32 = 1;
    for part in [chunk_id, s(file_name), s(index_name)] {
        acc = acc.wrapping_mul(31).wrapping_add(part);
    }
    acc
}

// ===== Equality & hash =====

proptest! {
    #[test]
    fn same_fields_equal_and_hash_alike((index, file, id) in arb_triple()) {
        let a = ChunkKey::new(index.as_str(), file.as_str(), id);
        let b = ChunkKey::new(index, file, id);

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.hash_code(), b.hash_code());
        prop_assert_eq!(std_hash(&a), std_hash(&b));
    }

    #[test]
    fn equality_tracks_fields(a in arb_triple(), b in arb_triple()) {
        let ka = ChunkKey::new(a.0.as_str(), a.1.as_str(), a.2);
        let kb = ChunkKey::new(b.0.as_str(), b.1.as_str(), b.2);

        prop_assert_eq!(ka == kb, a == b);
        prop_assert_eq!(ka == kb, kb == ka);
        if ka == kb {
            prop_assert_eq!(ka.hash_code(), kb.hash_code());
        }
    }

    #[test]
    fn equality_is_transitive(a in arb_triple(), b in arb_triple(), c in arb_triple()) {
        let ka = ChunkKey::new(a.0, a.1, a.2);
        let kb = ChunkKey::new(b.0, b.1, b.2);
        let kc = ChunkKey::new(c.0, c.1, c.2);

        if ka == kb && kb == kc {
            prop_assert_eq!(&ka, &kc);
        }
    }

    #[test]
    fn hash_matches_contract((index, file, id) in arb_triple()) {
        let key = ChunkKey::new(index.as_str(), file.as_str(), id);
        prop_assert_eq!(key.hash_code(), reference_hash(&index, &file, id));
    }

    #[test]
    fn sibling_equals_fresh_key((index, file, id) in arb_triple(), other in any::<i32>()) {
        let key = ChunkKey::new(index.as_str(), file.as_str(), id);
        prop_assert_eq!(key.sibling(other), ChunkKey::new(index, file, other));
    }
}

// ===== Transport =====

proptest! {
    #[test]
    fn codec_preserves_identity((index, file, id) in arb_triple()) {
        let key = ChunkKey::new(index, file, id);
        let bytes = key.to_bytes().unwrap();

        prop_assert_eq!(bytes.len(), key.encoded_len());
        let decoded = ChunkKey::from_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded.hash_code(), key.hash_code());
        prop_assert_eq!(decoded, key);
    }

    #[test]
    fn bincode_preserves_identity((index, file, id) in arb_triple()) {
        let key = ChunkKey::new(index, file, id);
        let bytes = bincode::serialize(&key).unwrap();
        let decoded: ChunkKey = bincode::deserialize(&bytes).unwrap();

        prop_assert_eq!(decoded.hash_code(), key.hash_code());
        prop_assert_eq!(decoded, key);
    }

    #[test]
    fn decode_never_panics(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let _ = ChunkKey::decode(&data);
        let _ = ChunkKey::from_bytes(&data);
    }
}
