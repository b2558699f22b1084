//! Cache abstraction over an evicting hybrid store or a plain map.
//!
//! [`Cache`] is what the chunk layer talks to. The hybrid variant wraps a
//! foyer `HybridCache` (memory tier spilling to disk); the memory variant is
//! a shared `HashMap` that never evicts. Keys only need foyer's
//! `StorageKey`, which for serde types means `Hash + Eq + Serialize +
//! DeserializeOwned`, plus `Debug` for tracing.

use crate::config::Backend;
use crate::error::{CacheError, Result};
use foyer::{HybridCache, StorageKey, StorageValue};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

pub enum Cache<K, V>
where
    K: StorageKey,
    V: StorageValue,
{
    /// Evicting store, memory tier backed by a disk tier
    Hybrid(HybridCache<K, V>),
    /// Non-evicting in-memory store
    Memory(Arc<RwLock<HashMap<K, V>>>),
}

impl<K, V> Cache<K, V>
where
    K: StorageKey + Clone + Debug,
    V: StorageValue + Clone,
{
    pub fn hybrid(cache: HybridCache<K, V>) -> Self {
        Cache::Hybrid(cache)
    }

    /// An empty memory store.
    pub fn memory() -> Self {
        Self::from_map(HashMap::new())
    }

    /// A memory store seeded with `map`.
    pub fn from_map(map: HashMap<K, V>) -> Self {
        Cache::Memory(Arc::new(RwLock::new(map)))
    }

    pub fn backend(&self) -> Backend {
        match self {
            Cache::Hybrid(_) => Backend::Hybrid,
            Cache::Memory(_) => Backend::Memory,
        }
    }

    pub async fn get(&self, key: &K) -> Result<Option<V>> {
        let value = match self {
            Cache::Hybrid(cache) => cache.get(key).await?.map(|entry| entry.value().clone()),
            Cache::Memory(map) => read(map)?.get(key).cloned(),
        };

        trace!(?key, hit = value.is_some(), "cache get");
        Ok(value)
    }

    /// Synchronous lookup.
    ///
    /// Always `None` for the hybrid store: its disk tier is async only.
    pub fn get_sync(&self, key: &K) -> Result<Option<V>> {
        let value = match self {
            Cache::Hybrid(_) => None,
            Cache::Memory(map) => read(map)?.get(key).cloned(),
        };

        trace!(?key, hit = value.is_some(), "cache get_sync");
        Ok(value)
    }

    /// Inserts or replaces the value stored under `key`.
    pub fn insert(&self, key: K, value: V) -> Result<()> {
        trace!(?key, "cache insert");
        match self {
            Cache::Hybrid(cache) => {
                cache.insert(key, value);
            }
            Cache::Memory(map) => {
                write(map)?.insert(key, value);
            }
        }
        Ok(())
    }

    /// Removes `key`. Missing keys are not an error.
    pub fn remove(&self, key: &K) -> Result<()> {
        trace!(?key, "cache remove");
        match self {
            Cache::Hybrid(cache) => {
                cache.remove(key);
            }
            Cache::Memory(map) => {
                write(map)?.remove(key);
            }
        }
        Ok(())
    }

    pub fn contains(&self, key: &K) -> Result<bool> {
        match self {
            Cache::Hybrid(cache) => Ok(cache.contains(key)),
            Cache::Memory(map) => Ok(read(map)?.contains_key(key)),
        }
    }

    /// Flushes pending disk writes of the hybrid store.
    pub async fn close(&self) -> Result<()> {
        match self {
            Cache::Hybrid(cache) => cache
                .close()
                .await
                .map_err(|e| CacheError::Close(e.to_string())),
            Cache::Memory(_) => Ok(()),
        }
    }
}

fn read<K, V>(map: &RwLock<HashMap<K, V>>) -> Result<RwLockReadGuard<'_, HashMap<K, V>>> {
    map.read()
        .map_err(|e| CacheError::LockPoisoned(e.to_string()))
}

fn write<K, V>(map: &RwLock<HashMap<K, V>>) -> Result<RwLockWriteGuard<'_, HashMap<K, V>>> {
    map.write()
        .map_err(|e| CacheError::LockPoisoned(e.to_string()))
}

/// Clones share the underlying store.
impl<K, V> Clone for Cache<K, V>
where
    K: StorageKey,
    V: StorageValue,
{
    fn clone(&self) -> Self {
        match self {
            Cache::Hybrid(cache) => Cache::Hybrid(cache.clone()),
            Cache::Memory(map) => Cache::Memory(Arc::clone(map)),
        }
    }
}
