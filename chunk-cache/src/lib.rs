//! Chunk payload cache.
//!
//! Stores the chunks of index files under their [`ChunkKey`], either in a
//! foyer hybrid cache (memory tier spilling to disk) or in a plain map. The
//! crate does not split files into chunks; callers hand it one key and one
//! payload at a time.

pub mod cache;
pub mod chunk_cache;
pub mod config;
pub mod error;

pub use cache::Cache;
pub use chunk_cache::ChunkCache;
pub use config::{Backend, CacheConfig};
pub use error::{CacheError, Result};

pub use chunk_key::ChunkKey;
