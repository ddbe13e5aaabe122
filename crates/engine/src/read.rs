//! Read path: `read()`.
//!
//! Resolution order, returning the first definitive answer: memtable, then
//! the tombstone log, then SSTables newest-to-oldest (descending lexical
//! filename order).

use crate::Engine;
use error::StoreResult;

impl Engine {
    /// Looks up `key`, returning its current value or `None` if absent.
    ///
    /// A tombstone for `key` shadows every SSTable but never the memtable:
    /// if `key` was deleted and then re-inserted, the memtable's fresher
    /// value wins (checked first, before the tombstone log is even opened).
    pub fn read(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        if let Some(value) = self.mem.lookup(key) {
            tracing::debug!(key = %String::from_utf8_lossy(key), "read: memtable hit");
            return Ok(Some(value));
        }

        if self.tombstones.contains(key)? {
            tracing::debug!(key = %String::from_utf8_lossy(key), "read: tombstoned");
            return Ok(None);
        }

        for path in self.sstable_paths_descending()? {
            if let Some(value) = sstable::get(&path, key)? {
                tracing::debug!(
                    key = %String::from_utf8_lossy(key),
                    path = %path.display(),
                    "read: sstable hit"
                );
                return Ok(Some(value));
            }
        }

        Ok(None)
    }
}
