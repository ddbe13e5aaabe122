//! # SSTable - Sorted String Table
//!
//! Immutable, on-disk storage files for the LSM key-value store.
//!
//! When the in-memory [`memtable::Memtable`] exceeds its size threshold the
//! engine flushes it to disk as an SSTable. SSTables are *write-once,
//! read-many* — once created they are never modified in place except by
//! compaction's atomic temp-file-then-rename rewrite.
//!
//! ## File layout
//!
//! ```text
//! <key><SP><value><LF>
//! <key><SP><value><LF>
//! ...
//! ```
//!
//! Lines are sorted ascending by key, with unique keys within one file. The
//! format carries no header, footer, index, or checksum section: no
//! compression, no block index, no bloom filter. A lookup is a full
//! line-by-line scan; that is an accepted cost in exchange for a format
//! simple enough to read with `cat`. Corrupt lines (missing the `<SP>`
//! delimiter) are skipped with a logged warning rather than aborting the
//! whole scan.
//!
//! ## Filenames
//!
//! `sstable_<19-digit zero-padded nanoseconds>.dat`, so that
//! lexical-descending filename order equals temporal-descending creation
//! order (see [`format::fresh_path`]).

mod format;
mod reader;
mod writer;

pub use format::{
    format_filename, fresh_path, fresh_path_after, is_sstable_filename, parse_timestamp,
    split_line, SSTABLE_EXT, SSTABLE_PREFIX, TIMESTAMP_DIGITS,
};
pub use reader::{get, read_all, SSTableLines};
pub use writer::{rewrite_in_place, write_from_entries, write_from_memtable};
