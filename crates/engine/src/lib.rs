//! # Engine
//!
//! The central orchestrator tying the [`memtable`], [`sstable`], and
//! [`tombstone`] crates into a complete LSM-tree key-value store.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   |
//!   v
//! ┌───────────────────────────────────────────────┐
//! │                   ENGINE                      │
//! │                                               │
//! │ write.rs → Memtable insert                    │
//! │              |                                │
//! │              |  (byte_count > flush_threshold?)│
//! │              v                                │
//! │           flush() → new SSTable, memtable clear│
//! │                                               │
//! │ read.rs → Memtable → tombstone log →          │
//! │           SSTables newest→oldest               │
//! │           (first match wins)                  │
//! │                                               │
//! │ compaction.rs → phase A: apply tombstones      │
//! │                 phase B: merge small files      │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Crash safety
//!
//! There is no write-ahead log: a crash between a write and the next flush
//! loses that write's effect on disk (it was never durable beyond the
//! in-process memtable). SSTables are written atomically via temp file +
//! rename, so a reader never observes a half-written file, and compaction's
//! tombstone-log truncation is deferred until every SSTable rewrite has
//! succeeded, so a crash mid-compaction never loses a pending delete.

mod compaction;
mod read;
mod write;

use config::StoreConfig;
use error::{Field, InvalidInputReason, StoreError, StoreResult};
use memtable::Memtable;
use std::path::PathBuf;
use tombstone::TombstoneLog;

/// The central storage engine: a memtable, a set of on-disk SSTables, and a
/// tombstone log, all rooted at one data directory.
///
/// An `Engine` owns its data directory exclusively — see the crate-level
/// docs for the single-writer assumption. Dropping an `Engine` does **not**
/// flush the memtable; callers that want a durable shutdown must call
/// [`Engine::flush`] explicitly first.
pub struct Engine {
    pub(crate) mem: Memtable,
    pub(crate) tombstones: TombstoneLog,
    pub(crate) config: StoreConfig,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("data_dir", &self.config.data_dir)
            .field("memtable_entries", &self.mem.len())
            .field("memtable_bytes", &self.mem.byte_count())
            .field("flush_threshold", &self.config.flush_threshold)
            .finish()
    }
}

impl Engine {
    /// Opens an engine rooted at `config.data_dir`, creating the directory
    /// and an empty tombstone log if they do not already exist.
    ///
    /// No recovery scan is performed: existing SSTable files are treated as
    /// valid and simply become visible to the read path. The memtable always
    /// starts empty — there is no WAL to replay.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        std::fs::create_dir_all(&config.data_dir)
            .map_err(|e| StoreError::io(&config.data_dir, e))?;
        let tombstones = TombstoneLog::new(config.data_dir.join(tombstone::TOMBSTONE_FILENAME));
        tombstones.ensure_exists()?;
        tracing::info!(data_dir = %config.data_dir.display(), "engine opened");
        Ok(Self {
            mem: Memtable::new(),
            tombstones,
            config,
        })
    }

    /// Returns the configuration this engine was opened with.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the memtable's current byte-charge total.
    #[must_use]
    pub fn byte_count(&self) -> usize {
        self.mem.byte_count()
    }

    /// Returns an in-order (ascending key) iterator over the memtable's
    /// current contents, for debugging and the `dump`/`print` CLI commands.
    pub fn enumerate_memtable(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.mem.iter()
    }

    /// Removes every regular file in the data directory and clears the
    /// memtable, returning the engine to a freshly-opened state. Recreates
    /// the (now-empty) tombstone log afterward.
    pub fn clear_all(&mut self) -> StoreResult<()> {
        let dir = &self.config.data_dir;
        for entry in std::fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))? {
            let entry = entry.map_err(|e| StoreError::io(dir, e))?;
            let path = entry.path();
            if path.is_file() {
                std::fs::remove_file(&path).map_err(|e| StoreError::io(&path, e))?;
            }
        }
        self.mem.clear();
        self.tombstones.ensure_exists()?;
        tracing::info!(data_dir = %dir.display(), "cleared data directory and memtable");
        Ok(())
    }

    /// Rejects `bytes` if empty, over `max_len`, or containing a space or
    /// newline (the on-disk format's delimiter and terminator bytes).
    pub(crate) fn validate(&self, field: Field, bytes: &[u8], max_len: usize) -> StoreResult<()> {
        if bytes.is_empty() {
            return Err(StoreError::InvalidInput {
                field,
                reason: InvalidInputReason::Empty,
            });
        }
        if bytes.len() > max_len {
            return Err(StoreError::InvalidInput {
                field,
                reason: InvalidInputReason::TooLong,
            });
        }
        if bytes.contains(&b' ') {
            return Err(StoreError::InvalidInput {
                field,
                reason: InvalidInputReason::ContainsSpace,
            });
        }
        if bytes.contains(&b'\n') {
            return Err(StoreError::InvalidInput {
                field,
                reason: InvalidInputReason::ContainsNewline,
            });
        }
        Ok(())
    }

    /// Lists every SSTable file in the data directory, in no particular
    /// order.
    pub(crate) fn sstable_paths(&self) -> StoreResult<Vec<PathBuf>> {
        let dir = &self.config.data_dir;
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))? {
            let entry = entry.map_err(|e| StoreError::io(dir, e))?;
            let path = entry.path();
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if sstable::is_sstable_filename(name) {
                    paths.push(path);
                }
            }
        }
        Ok(paths)
    }

    /// Lists every SSTable file sorted newest-first (descending lexical
    /// filename order), the order the read path scans in.
    pub(crate) fn sstable_paths_descending(&self) -> StoreResult<Vec<PathBuf>> {
        let mut paths = self.sstable_paths()?;
        paths.sort();
        paths.reverse();
        Ok(paths)
    }
}

#[cfg(test)]
mod tests;
