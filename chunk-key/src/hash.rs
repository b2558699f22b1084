//! Hash functions shared by every node that partitions chunk keys.
//!
//! All arithmetic wraps at 32 bits. Strings hash over their UTF-16 code
//! units, `s[0]*31^(n-1) + ... + s[n-1]`, so the empty string hashes to 0.

/// Multiplier used by both the string hash and the field combination.
pub const PRIME: i32 = 31;

/// Hash of a single string over its UTF-16 code units.
#[inline]
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |acc, unit| acc.wrapping_mul(PRIME).wrapping_add(i32::from(unit)))
}

/// Combined hash of a chunk key's fields.
///
/// The order (chunk id, file name, index name) is fixed.
#[inline]
pub fn chunk_key_hash(index_name: &str, file_name: &str, chunk_id: i32) -> i32 {
    let mut acc: i32 = 1;
    acc = acc.wrapping_mul(PRIME).wrapping_add(chunk_id);
    acc = acc.wrapping_mul(PRIME).wrapping_add(string_hash(file_name));
    acc = acc.wrapping_mul(PRIME).wrapping_add(string_hash(index_name));
    acc
}
