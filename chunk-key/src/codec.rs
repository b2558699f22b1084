//! Fixed byte encoding of a [`ChunkKey`].
//!
//! Keys sent to other nodes must rebuild to an equal key with the same
//! [`ChunkKey::hash_code`], so the layout is fixed:
//!
//! ```text
//! offset      size  field
//! 0           4     index_name length N (u32)
//! 4           N     index_name, UTF-8
//! 4+N         4     file_name length M (u32)
//! 8+N         M     file_name, UTF-8
//! 8+N+M       4     chunk_id (i32, two's complement)
//! ```
//!
//! All integers are little-endian. The hash is not part of the encoding;
//! the decoder recomputes it.

use std::io::Write;

use tracing::debug;

use crate::{ChunkKey, Error, Result};

const LEN_SIZE: usize = size_of::<u32>();
const ID_SIZE: usize = size_of::<i32>();

impl ChunkKey {
    /// Exact number of bytes [`ChunkKey::encode_into`] writes.
    pub fn encoded_len(&self) -> usize {
        LEN_SIZE + self.index_name().len() + LEN_SIZE + self.file_name().len() + ID_SIZE
    }

    pub fn encode_into<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_name(writer, "index_name", self.index_name())?;
        write_name(writer, "file_name", self.file_name())?;
        writer.write_all(&self.chunk_id().to_le_bytes())?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut buf)?;
        Ok(buf)
    }

    /// Decode one key from the front of `data`.
    ///
    /// Returns the key and the number of bytes consumed, so a buffer holding
    /// several concatenated keys can be walked.
    pub fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let mut reader = Reader { data, pos: 0 };

        let result = reader.read_key().map(|key| (key, reader.pos));
        if let Err(e) = &result {
            debug!(len = data.len(), "failed to decode chunk key: {e}");
        }
        result
    }

    /// Decode a buffer that holds exactly one key.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let (key, consumed) = Self::decode(data)?;
        if consumed != data.len() {
            return Err(Error::TrailingBytes {
                extra: data.len() - consumed,
            });
        }
        Ok(key)
    }
}

fn write_name<W: Write>(writer: &mut W, field: &'static str, name: &str) -> Result<()> {
    let len = u32::try_from(name.len()).map_err(|_| Error::NameTooLong {
        field,
        len: name.len(),
    })?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(name.as_bytes())?;
    Ok(())
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn read_key(&mut self) -> Result<ChunkKey> {
        let index_name = self.read_name("index_name")?;
        let file_name = self.read_name("file_name")?;
        let chunk_id = i32::from_le_bytes(self.take_array::<ID_SIZE>()?);
        Ok(ChunkKey::new(index_name, file_name, chunk_id))
    }

    fn read_name(&mut self, field: &'static str) -> Result<&'a str> {
        let len = u32::from_le_bytes(self.take_array::<LEN_SIZE>()?) as usize;
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 { field })
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let data = self.data;
        let rest = &data[self.pos..];
        if n > rest.len() {
            return Err(self.truncated(n));
        }
        self.pos += n;
        Ok(&rest[..n])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let data = self.data;
        let (head, _) = data[self.pos..]
            .split_first_chunk::<N>()
            .ok_or_else(|| self.truncated(N))?;
        self.pos += N;
        Ok(*head)
    }

    fn truncated(&self, n: usize) -> Error {
        Error::Truncated {
            needed: self.pos.saturating_add(n),
            available: self.data.len(),
        }
    }
}
