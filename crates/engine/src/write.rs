//! Write path: `write()`, `delete()`, and the public `flush()`.

use crate::Engine;
use error::{Field, StoreResult};

impl Engine {
    /// Inserts or overwrites `key` with `value`.
    ///
    /// Validates both against the configured length and charset rules
    /// before touching the memtable — on rejection, state is unchanged. If
    /// the memtable's byte charge exceeds the configured flush threshold
    /// afterward, the memtable is flushed to a new SSTable automatically.
    pub fn write(&mut self, key: Vec<u8>, value: Vec<u8>) -> StoreResult<()> {
        self.validate(Field::Key, &key, self.config.max_key_len)?;
        self.validate(Field::Value, &value, self.config.max_value_len)?;
        tracing::debug!(key = %String::from_utf8_lossy(&key), "write");
        self.mem.insert(key, value);
        if self.mem.byte_count() > self.config.flush_threshold {
            self.flush()?;
        }
        Ok(())
    }

    /// Removes `key`.
    ///
    /// If the key is present in the memtable, it is removed in place — no
    /// on-disk evidence is needed, since the memtable is the freshest layer.
    /// Otherwise a tombstone is appended to the log, to be materialized
    /// against the SSTable set at the next [`Engine::compact`]. Deleting a
    /// key absent from both the memtable and every SSTable is a harmless
    /// no-op: the tombstone is still appended unconditionally.
    pub fn delete(&mut self, key: Vec<u8>) -> StoreResult<()> {
        self.validate(Field::Key, &key, self.config.max_key_len)?;
        tracing::debug!(key = %String::from_utf8_lossy(&key), "delete");
        if self.mem.remove(&key) {
            return Ok(());
        }
        self.tombstones.append(&key)
    }

    /// Serializes the memtable to a new SSTable and clears it. A no-op if
    /// the memtable is empty (no zero-line SSTable is created).
    pub fn flush(&mut self) -> StoreResult<()> {
        if self.mem.is_empty() {
            return Ok(());
        }
        let entries = self.mem.len();
        let path = sstable::write_from_memtable(&self.config.data_dir, &self.mem)?;
        self.mem.clear();
        if let Some(path) = path {
            tracing::info!(path = %path.display(), entries, "flushed memtable to sstable");
        }
        Ok(())
    }
}
