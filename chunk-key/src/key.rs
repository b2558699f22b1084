use crate::hash::chunk_key_hash;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::sync::Arc;

/// Identifies one chunk of a file inside an index.
///
/// Names are shared immutable strings, so cloning a key or deriving the key
/// of another chunk of the same file never copies text. The hash is computed
/// once at construction: [`Hash`] feeds only that value, and [`PartialEq`]
/// uses it to reject most unequal keys without touching the names.
///
/// No validation happens here. Empty names and negative chunk ids are
/// accepted; making sense of them is up to the chunking layer.
#[derive(Clone)]
pub struct ChunkKey {
    index_name: Arc<str>,
    file_name: Arc<str>,
    chunk_id: i32,
    precomputed_hash: i32,
}

impl ChunkKey {
    pub fn new(
        index_name: impl Into<Arc<str>>,
        file_name: impl Into<Arc<str>>,
        chunk_id: i32,
    ) -> Self {
        let index_name = index_name.into();
        let file_name = file_name.into();
        let precomputed_hash = chunk_key_hash(&index_name, &file_name, chunk_id);

        Self {
            index_name,
            file_name,
            chunk_id,
            precomputed_hash,
        }
    }

    /// Keys for chunks `0..chunk_count` of one file.
    ///
    /// Every key shares the same two name allocations. A non-positive count
    /// yields no keys.
    pub fn file_chunks(
        index_name: impl Into<Arc<str>>,
        file_name: impl Into<Arc<str>>,
        chunk_count: i32,
    ) -> FileChunks {
        FileChunks {
            index_name: index_name.into(),
            file_name: file_name.into(),
            next: 0,
            end: chunk_count.max(0),
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn chunk_id(&self) -> i32 {
        self.chunk_id
    }

    /// The hash cached at construction.
    ///
    /// Stable across processes: other nodes compute the same value for the
    /// same fields.
    #[inline]
    pub fn hash_code(&self) -> i32 {
        self.precomputed_hash
    }

    /// Key of another chunk in the same file.
    pub fn sibling(&self, chunk_id: i32) -> Self {
        Self::new(self.index_name.clone(), self.file_name.clone(), chunk_id)
    }

    /// Returns true if both keys name the same file of the same index.
    pub fn same_file(&self, other: &ChunkKey) -> bool {
        same_str(&self.file_name, &other.file_name)
            && same_str(&self.index_name, &other.index_name)
    }

    /// Compares against a value of any type.
    ///
    /// Anything that is not a `ChunkKey` compares unequal.
    pub fn eq_any(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<ChunkKey>()
            .is_some_and(|other| self == other)
    }
}

#[inline]
fn same_str(a: &Arc<str>, b: &Arc<str>) -> bool {
    Arc::ptr_eq(a, b) || a == b
}

impl Hash for ChunkKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.precomputed_hash);
    }
}

impl PartialEq for ChunkKey {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }

        if self.precomputed_hash != other.precomputed_hash {
            return false;
        }

        self.chunk_id == other.chunk_id && self.same_file(other)
    }
}

impl Eq for ChunkKey {}

/// Renders `ChunkKey{chunkId=.., fileName=.., indexName=..}`.
impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ChunkKey{{chunkId={}, fileName={}, indexName={}}}",
            self.chunk_id, self.file_name, self.index_name
        )
    }
}

impl fmt::Debug for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkKey")
            .field("index_name", &self.index_name)
            .field("file_name", &self.file_name)
            .field("chunk_id", &self.chunk_id)
            .field("hash", &self.precomputed_hash)
            .finish()
    }
}

// ── Serde ────────────────────────────────────────────────────────
//
// Only the three fields travel. The hash is rebuilt by `ChunkKey::new` on
// the receiving side.

#[derive(Serialize)]
#[serde(rename = "ChunkKey")]
struct FieldsRef<'a> {
    index_name: &'a str,
    file_name: &'a str,
    chunk_id: i32,
}

#[derive(Deserialize)]
#[serde(rename = "ChunkKey", deny_unknown_fields)]
struct Fields {
    index_name: String,
    file_name: String,
    chunk_id: i32,
}

impl Serialize for ChunkKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        FieldsRef {
            index_name: &self.index_name,
            file_name: &self.file_name,
            chunk_id: self.chunk_id,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChunkKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let fields = Fields::deserialize(deserializer)?;
        Ok(ChunkKey::new(
            fields.index_name,
            fields.file_name,
            fields.chunk_id,
        ))
    }
}

// ── FileChunks ───────────────────────────────────────────────────

/// Iterator returned by [`ChunkKey::file_chunks`].
#[derive(Debug, Clone)]
pub struct FileChunks {
    index_name: Arc<str>,
    file_name: Arc<str>,
    next: i32,
    end: i32,
}

impl Iterator for FileChunks {
    type Item = ChunkKey;

    fn next(&mut self) -> Option<ChunkKey> {
        if self.next >= self.end {
            return None;
        }

        let key = ChunkKey::new(self.index_name.clone(), self.file_name.clone(), self.next);
        self.next += 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FileChunks {}

impl FusedIterator for FileChunks {}
