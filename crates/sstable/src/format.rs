//! SSTable filename and line-format constants and helpers.
//!
//! ## File layout
//!
//! ```text
//! <key><SP><value><LF>
//! <key><SP><value><LF>
//! ...
//! ```
//!
//! Lines are sorted ascending by key. There is no header, footer, index, or
//! checksum section — the whole point of this format is that it is
//! inspectable with any text editor, at the cost of an O(n) full-file scan
//! per lookup.
//!
//! ## Filenames
//!
//! `sstable_<19-digit zero-padded nanoseconds since UNIX epoch>.dat`. The
//! fixed digit width guarantees that lexical-descending filename order
//! equals temporal-descending creation order even if the nanosecond counter
//! crosses a power-of-ten boundary between two flushes — the original
//! reference's `%lld` (no padding) does not have this guarantee and is a
//! known latent bug this implementation avoids.

use error::{StoreError, StoreResult};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Filename prefix for every SSTable file.
pub const SSTABLE_PREFIX: &str = "sstable_";
/// Filename extension for every SSTable file.
pub const SSTABLE_EXT: &str = "dat";
/// Width (in decimal digits) that the nanosecond timestamp is zero-padded to.
pub const TIMESTAMP_DIGITS: usize = 19;

/// Formats a nanosecond timestamp into an SSTable filename.
#[must_use]
pub fn format_filename(nanos: u128) -> String {
    format!(
        "{SSTABLE_PREFIX}{:0width$}.{SSTABLE_EXT}",
        nanos,
        width = TIMESTAMP_DIGITS
    )
}

/// Returns `true` if `name` looks like an SSTable filename (as opposed to
/// the tombstone log or a stray temp file).
#[must_use]
pub fn is_sstable_filename(name: &str) -> bool {
    name.starts_with(SSTABLE_PREFIX)
        && name.ends_with(&format!(".{SSTABLE_EXT}"))
        && !name.ends_with(".tmp")
}

/// Returns the current wall-clock time as nanoseconds since the UNIX epoch,
/// propagating a clock-before-epoch failure as a [`StoreError::Io`] instead
/// of panicking — `dir` is attached only to give the error a location.
fn now_nanos(dir: &Path) -> StoreResult<u128> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .map_err(|e| StoreError::io(dir, std::io::Error::new(std::io::ErrorKind::Other, e)))
}

/// Picks a filename for a new SSTable in `dir` that is guaranteed to sort
/// lexically after every existing SSTable filename in that directory.
///
/// Starts from the current wall-clock time at nanosecond resolution. If a
/// file with that name already exists (clock coarseness can produce two
/// flushes within the same tick), the candidate is bumped forward by one
/// nanosecond until a free name is found — this also guarantees the name is
/// strictly greater than any pre-existing file with a higher timestamp that
/// a coarse clock might otherwise tie with.
pub fn fresh_path(dir: &Path) -> StoreResult<PathBuf> {
    let nanos = now_nanos(dir)?;
    fresh_path_after(dir, nanos.saturating_sub(1))
}

/// Picks a fresh filename guaranteed to sort after `min_exclusive_nanos` as
/// well as after every existing file in `dir`. Used by compaction (§4.6) to
/// ensure a merged output's name post-dates every input it merges, even if
/// wall-clock time has not advanced past the newest input's encoded
/// timestamp.
pub fn fresh_path_after(dir: &Path, min_exclusive_nanos: u128) -> StoreResult<PathBuf> {
    let now = now_nanos(dir)?;
    let mut nanos = now.max(min_exclusive_nanos + 1);

    loop {
        let candidate = dir.join(format_filename(nanos));
        if !candidate.exists() {
            return Ok(candidate);
        }
        nanos += 1;
    }
}

/// Parses the nanosecond timestamp encoded in an SSTable filename.
///
/// Returns `None` if `name` does not match the expected shape. Used by
/// compaction to compute `min_exclusive_nanos` for [`fresh_path_after`].
#[must_use]
pub fn parse_timestamp(name: &str) -> Option<u128> {
    let stem = name
        .strip_prefix(SSTABLE_PREFIX)?
        .strip_suffix(&format!(".{SSTABLE_EXT}"))?;
    stem.parse().ok()
}

/// Splits one SSTable line into `(key, value)`, borrowing from `line`.
///
/// Splits at the *first* space, matching the reference `sscanf("%s %s", ...)`
/// behavior: neither key nor value may themselves contain a space (enforced
/// at the write surface), so the first space is unambiguously the
/// delimiter. Returns `None` if no space is found (a corrupt or truncated
/// line).
#[must_use]
pub fn split_line(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let pos = line.iter().position(|&b| b == b' ')?;
    Some((&line[..pos], &line[pos + 1..]))
}
