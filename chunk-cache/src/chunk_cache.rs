//! Chunk cache integration types.
//!
//! Chunk payloads are cached under their [`ChunkKey`]. The key's hash is
//! computed once at construction, so probing either backend costs a single
//! hasher write per lookup.

use crate::cache::Cache;
use crate::config::{Backend, CacheConfig};
use crate::error::{CacheError, Result};
use chunk_key::ChunkKey;
use tracing::{debug, info};

/// Specialized cache for chunk payloads.
pub type ChunkCache = Cache<ChunkKey, Vec<u8>>;

impl Cache<ChunkKey, Vec<u8>> {
    /// Builds the backend selected by `config`.
    pub async fn open(config: &CacheConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| CacheError::Build(format!("{e:#}")))?;

        match config.backend {
            Backend::Memory => {
                info!("Opened in-memory chunk cache");
                Ok(Cache::memory())
            }
            Backend::Hybrid => {
                let cache = build_hybrid(config).await?;
                info!(
                    directory = %config.directory.display(),
                    memory_capacity = %config.memory_capacity,
                    disk_capacity = %config.disk_capacity,
                    "Opened hybrid chunk cache"
                );
                Ok(Cache::hybrid(cache))
            }
        }
    }

    /// Removes chunks `0..chunk_count` of one file.
    ///
    /// Chunks missing from the cache are skipped, as with [`Cache::remove`].
    pub fn remove_file(&self, index_name: &str, file_name: &str, chunk_count: i32) -> Result<()> {
        for key in ChunkKey::file_chunks(index_name, file_name, chunk_count) {
            self.remove(&key)?;
        }

        debug!(index_name, file_name, chunk_count, "Removed file chunks");
        Ok(())
    }
}

async fn build_hybrid(config: &CacheConfig) -> Result<foyer::HybridCache<ChunkKey, Vec<u8>>> {
    use foyer::{
        BlockEngineBuilder, Compression, DeviceBuilder, FsDeviceBuilder, HybridCacheBuilder,
    };

    std::fs::create_dir_all(&config.directory)?;

    let memory_capacity = to_usize(config.memory_capacity.as_u64(), "memory_capacity")?;
    let disk_capacity = to_usize(config.disk_capacity.as_u64(), "disk_capacity")?;
    let block_size = to_usize(config.block_size.as_u64(), "block_size")?;

    let device = FsDeviceBuilder::new(&config.directory)
        .with_capacity(disk_capacity)
        .build()
        .map_err(|e| CacheError::Build(e.to_string()))?;

    // Weigh entries by what they would occupy on the wire
    let weighter = |key: &ChunkKey, value: &Vec<u8>| -> usize { key.encoded_len() + value.len() };

    HybridCacheBuilder::new()
        .with_name("chunk-cache")
        .with_policy(foyer::HybridCachePolicy::WriteOnEviction)
        .memory(memory_capacity)
        .with_weighter(weighter)
        .with_shards(config.shards)
        .storage()
        .with_compression(Compression::Zstd)
        .with_engine_config(BlockEngineBuilder::new(device).with_block_size(block_size))
        .build()
        .await
        .map_err(|e| CacheError::Build(e.to_string()))
}

fn to_usize(value: u64, field: &str) -> Result<usize> {
    usize::try_from(value).map_err(|_| CacheError::Build(format!("{field} too large: {value}")))
}
