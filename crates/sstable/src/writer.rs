//! Writing SSTable files: fresh flushes and atomic rewrites.

use crate::format::fresh_path;
use error::StoreResult;
use memtable::Memtable;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes one `<key><SP><value><LF>` line per entry of `entries` to `path`,
/// via a `.tmp` sibling that is renamed into place once every line has been
/// written and flushed. A reader can never observe a partially written file
/// under `path`.
pub fn write_from_entries<'a, I>(path: &Path, entries: I) -> StoreResult<()>
where
    I: IntoIterator<Item = (&'a [u8], &'a [u8])>,
{
    let tmp_path = path.with_extension("tmp");
    {
        let mut tmp = std::fs::File::create(&tmp_path).map_err(|e| error::StoreError::io(&tmp_path, e))?;
        for (key, value) in entries {
            tmp.write_all(key)
                .and_then(|_| tmp.write_all(b" "))
                .and_then(|_| tmp.write_all(value))
                .and_then(|_| tmp.write_all(b"\n"))
                .map_err(|e| error::StoreError::io(&tmp_path, e))?;
        }
        tmp.flush().map_err(|e| error::StoreError::io(&tmp_path, e))?;
    }
    std::fs::rename(&tmp_path, path).map_err(|e| error::StoreError::io(path, e))?;
    Ok(())
}

/// Serializes `mem`'s current contents, in key-ascending order, to a brand
/// new file in `dir` whose name is guaranteed to sort after every existing
/// SSTable in that directory (see [`fresh_path`]).
///
/// Returns `Ok(None)` without touching the filesystem if `mem` is empty —
/// flushing an empty memtable would produce a useless zero-line file.
pub fn write_from_memtable(dir: &Path, mem: &Memtable) -> StoreResult<Option<PathBuf>> {
    if mem.is_empty() {
        return Ok(None);
    }
    let path = fresh_path(dir)?;
    write_from_entries(&path, mem.iter())?;
    Ok(Some(path))
}

/// Atomically rewrites the file at `path` with `entries`, via the same
/// temp-then-rename sequence as [`write_from_entries`]. Used by compaction's
/// phase A (tombstone application) to replace a file's contents under its
/// existing name.
pub fn rewrite_in_place<'a, I>(path: &Path, entries: I) -> StoreResult<()>
where
    I: IntoIterator<Item = (&'a [u8], &'a [u8])>,
{
    write_from_entries(path, entries)
}
