//! # Tombstone log
//!
//! An append-only, line-oriented file recording keys whose deletion has not
//! yet been absorbed into the SSTables.
//!
//! A tombstone is "pending" from the moment [`TombstoneLog::append`] writes
//! it until a compaction's phase A (see the `engine` crate) rewrites every
//! SSTable to drop the matching lines and then truncates the log. Order
//! within the file carries no meaning — correctness only depends on set
//! membership.

use error::{StoreError, StoreResult};
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// The tombstone log's fixed filename within the data directory.
pub const TOMBSTONE_FILENAME: &str = "tombstones.dat";

/// A handle to the on-disk tombstone log at a fixed path.
///
/// `TombstoneLog` does not cache file contents between calls — every method
/// opens the file fresh, matching the single-writer, single-reader use of
/// the rest of the engine.
#[derive(Debug, Clone)]
pub struct TombstoneLog {
    path: PathBuf,
}

impl TombstoneLog {
    /// Creates a handle for the tombstone log at `path`. Does not touch the
    /// filesystem; call [`ensure_exists`](Self::ensure_exists) to create it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty tombstone log if one does not already exist. Called
    /// once at engine startup.
    pub fn ensure_exists(&self) -> StoreResult<()> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }

    /// Appends `key` as a new pending tombstone. Order is not significant;
    /// duplicates are harmless (compaction treats the tombstone set as a
    /// `HashSet`, so repeats collapse to one entry).
    pub fn append(&self, key: &[u8]) -> StoreResult<()> {
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        f.write_all(key).map_err(|e| StoreError::io(&self.path, e))?;
        f.write_all(b"\n").map_err(|e| StoreError::io(&self.path, e))?;
        tracing::debug!(key = %String::from_utf8_lossy(key), "appended tombstone");
        Ok(())
    }

    /// Scans the log once, returning whether `key` appears in it.
    ///
    /// Used by the read path (§4.4): a single linear scan per read, which is
    /// acceptable because the log only grows between compactions and is
    /// expected to stay small. Splits on raw `\n` bytes rather than
    /// `BufRead::lines()`, since keys are arbitrary non-space, non-newline
    /// byte strings and need not be valid UTF-8.
    pub fn contains(&self, key: &[u8]) -> StoreResult<bool> {
        let file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        for line in BufReader::new(file).split(b'\n') {
            let line = line.map_err(|e| StoreError::io(&self.path, e))?;
            if line == key {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Loads the entire log into an in-memory set.
    ///
    /// Used only by compaction's phase A, which needs O(1) membership tests
    /// against every line of every SSTable. Does **not** truncate the file —
    /// callers must defer truncation until phase A has successfully rewritten
    /// every SSTable, so a crash mid-compaction cannot lose a pending delete.
    /// Splits on raw `\n` bytes rather than `BufRead::lines()`, since keys
    /// are arbitrary non-space, non-newline byte strings and need not be
    /// valid UTF-8.
    pub fn load(&self) -> StoreResult<HashSet<Vec<u8>>> {
        let mut set = HashSet::new();
        let file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(set),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        for line in BufReader::new(file).split(b'\n') {
            let line = line.map_err(|e| StoreError::io(&self.path, e))?;
            if !line.is_empty() {
                set.insert(line);
            }
        }
        Ok(set)
    }

    /// Empties the log. Called only after compaction's phase A has rewritten
    /// every SSTable; never called eagerly at load time (that ordering is a
    /// latent data-loss bug in the original reference this store descends
    /// from, and is deliberately not carried over).
    pub fn truncate(&self) -> StoreResult<()> {
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        tracing::debug!("tombstone log truncated");
        Ok(())
    }

    /// Returns `true` if the log exists and has zero bytes (or does not
    /// exist at all).
    pub fn is_empty(&self) -> StoreResult<bool> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}

#[cfg(test)]
mod tests;
