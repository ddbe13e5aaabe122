//! # Memtable
//!
//! An in-memory, sorted, mutable write buffer for the LSM key-value store.
//!
//! The memtable is the first point of contact for every write operation. It
//! buffers recent inserts, overwrites, and local deletes in a sorted
//! structure (`BTreeMap`) before they are flushed to an immutable on-disk
//! SSTable.
//!
//! ## Key properties
//! - **Sorted order**: entries are always in ascending key order (required for SSTable flush).
//! - **No tombstones here**: deleting a key present in the memtable removes it outright.
//!   A tombstone is only needed when the delete must shadow a value that lives
//!   on disk — see the `tombstone` crate for that log.
//! - **Approximate size tracking**: tracks the byte charge of keys + values so the
//!   engine can decide when to flush.
//!
//! ## Example
//! ```rust
//! use memtable::Memtable;
//!
//! let mut m = Memtable::new();
//! m.insert(b"hello".to_vec(), b"world".to_vec());
//! assert_eq!(m.lookup(b"hello"), Some(b"world".to_vec()));
//!
//! assert!(m.remove(b"hello"));
//! assert_eq!(m.lookup(b"hello"), None);
//! ```

use std::collections::BTreeMap;

/// Per-entry bookkeeping overhead charged against the memtable's byte
/// counter, approximating the cost of a `BTreeMap` node. Chosen to match
/// the reference implementation's `sizeof(Node)` approximation; any
/// consistent constant works since the flush threshold is expressed in the
/// same units.
pub const ENTRY_OVERHEAD: usize = 32;

/// A single entry in the memtable: an owned value plus the byte charge it
/// (together with its key) contributes to the memtable's running total.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MemtableEntry {
    value: Vec<u8>,
    charge: usize,
}

fn charge_of(key: &[u8], value: &[u8]) -> usize {
    ENTRY_OVERHEAD + key.len() + value.len()
}

/// An ordered, in-memory write buffer backed by a `BTreeMap`.
///
/// Tracks an approximate byte size (key + value bytes, plus a fixed
/// per-entry overhead) so the engine can decide when to flush to an
/// SSTable. The invariant `byte_count() == sum of entry charges` holds at
/// all times; `clear()` re-establishes it trivially.
#[derive(Debug, Default)]
pub struct Memtable {
    map: BTreeMap<Vec<u8>, MemtableEntry>,
    byte_count: usize,
}

impl Memtable {
    /// Creates a new, empty memtable.
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
            byte_count: 0,
        }
    }

    /// Inserts a key-value pair, overwriting any existing value for `key`.
    ///
    /// If the key is new, the byte counter grows by the full entry charge.
    /// If the key already exists, the counter is adjusted by the delta
    /// between the old and new entry sizes (the overwrite is silent — there
    /// is no signal to the caller that a prior value existed).
    pub fn insert(&mut self, key: Vec<u8>, value: Vec<u8>) {
        let new_charge = charge_of(&key, &value);
        match self.map.get(&key) {
            Some(old) => {
                self.byte_count = self.byte_count - old.charge + new_charge;
            }
            None => {
                self.byte_count += new_charge;
            }
        }
        self.map.insert(
            key,
            MemtableEntry {
                value,
                charge: new_charge,
            },
        );
    }

    /// Returns the current value for `key`, if present.
    #[must_use]
    pub fn lookup(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.map.get(key).map(|e| e.value.clone())
    }

    /// Returns `true` if the memtable holds an entry for `key`.
    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        self.map.contains_key(key)
    }

    /// Removes the entry for `key` if present, returning whether it was
    /// found. The byte counter shrinks by the removed entry's charge.
    ///
    /// Callers use the returned `bool` to decide whether a tombstone must be
    /// appended instead: a local memtable delete needs no on-disk evidence,
    /// but deleting a key that lives only in an SSTable does.
    pub fn remove(&mut self, key: &[u8]) -> bool {
        match self.map.remove(key) {
            Some(entry) => {
                self.byte_count -= entry.charge;
                true
            }
            None => false,
        }
    }

    /// Returns an iterator over all entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.map
            .iter()
            .map(|(k, v)| (k.as_slice(), v.value.as_slice()))
    }

    /// Returns the number of entries currently buffered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the memtable holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the current byte-charge total.
    #[must_use]
    pub fn byte_count(&self) -> usize {
        self.byte_count
    }

    /// Removes every entry and resets the byte counter to zero.
    pub fn clear(&mut self) {
        self.map.clear();
        self.byte_count = 0;
        debug_assert_eq!(self.byte_count, 0, "byte_count must be zero after clear");
    }
}
