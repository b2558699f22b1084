//! Cache keys for chunked index files.
//!
//! A search index directory stored in a distributed cache splits every
//! segment file into fixed-size chunks, and each chunk lives under its own
//! cache entry. [`ChunkKey`] identifies one such entry by
//! `(index_name, file_name, chunk_id)`.
//!
//! The key's hash is part of its contract: cache partitioning on other nodes
//! relies on it, so [`ChunkKey::hash_code`] is bit-compatible with the
//! 31-multiplier string/field combination used by the rest of the cluster
//! (see [`hash`]). Keys that leave the process are encoded with the fixed
//! layout documented in [`codec`], or through their serde representation.

pub mod codec;
mod error;
pub mod hash;
mod key;

pub use error::{Error, Result};
pub use key::{ChunkKey, FileChunks};

#[cfg(test)]
mod tests_props;
