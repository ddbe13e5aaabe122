//! Reading SSTable files: single-key lookup and full-file iteration.

use crate::format::split_line;
use error::{StoreError, StoreResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Scans `path` line by line looking for `key`, returning the first match
/// (files carry at most one line per key, so "first" and "only" coincide).
///
/// Lines that do not contain a `<SP>` delimiter are corrupt; they are
/// skipped with a logged warning rather than failing the whole scan, since a
/// single damaged line should not make the rest of the file unreadable.
pub fn get(path: &Path, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    for line in BufReader::new(file).split(b'\n') {
        let line = line.map_err(|e| StoreError::io(path, e))?;
        if line.is_empty() {
            continue;
        }
        match split_line(&line) {
            Some((k, v)) if k == key => return Ok(Some(v.to_vec())),
            Some(_) => continue,
            None => {
                tracing::warn!(
                    path = %path.display(),
                    "skipping corrupt line with no key/value delimiter"
                );
            }
        }
    }
    Ok(None)
}

/// An iterator over the `(key, value)` pairs of one SSTable file, in the
/// order they appear on disk (ascending by key, per the write-side
/// invariant). Corrupt lines are skipped with a logged warning, never
/// surfaced as an error.
pub struct SSTableLines {
    path: std::path::PathBuf,
    lines: std::io::Split<BufReader<File>>,
}

impl Iterator for SSTableLines {
    type Item = StoreResult<(Vec<u8>, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(l) => l,
                Err(e) => return Some(Err(StoreError::io(&self.path, e))),
            };
            if line.is_empty() {
                continue;
            }
            match split_line(&line) {
                Some((k, v)) => return Some(Ok((k.to_vec(), v.to_vec()))),
                None => {
                    tracing::warn!(
                        path = %self.path.display(),
                        "skipping corrupt line with no key/value delimiter"
                    );
                    continue;
                }
            }
        }
    }
}

/// Opens `path` for a full ascending scan, used by compaction to read every
/// input file one line at a time without loading it all into memory.
pub fn read_all(path: &Path) -> StoreResult<SSTableLines> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    Ok(SSTableLines {
        path: path.to_path_buf(),
        lines: BufReader::new(file).split(b'\n'),
    })
}
