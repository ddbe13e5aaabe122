//! # Configuration
//!
//! Defaults and environment overlay for the LSM key-value store.
//!
//! [`StoreConfig::default`] returns the reference defaults from the original
//! design (100-byte keys/values, 1 MiB flush threshold, 200/400 KiB
//! compaction thresholds). [`StoreConfig::from_env`] overlays environment
//! variables on top of those defaults; a variable that is present but fails
//! to parse is ignored and the default for that field is kept, rather than
//! aborting startup over a typo'd env var.

use std::path::PathBuf;

/// Default data directory, relative to the process's current directory.
pub const DEFAULT_DATA_DIR: &str = "data";
/// Default maximum key length, in bytes.
pub const DEFAULT_MAX_KEY_LEN: usize = 100;
/// Default maximum value length, in bytes.
pub const DEFAULT_MAX_VALUE_LEN: usize = 100;
/// Default flush threshold: 1 MiB of memtable byte-charge.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 1024 * 1024;
/// Default small-file threshold for compaction: 200 KiB.
pub const DEFAULT_SMALL_FILE_THRESHOLD: usize = 200 * 1024;
/// Default upper bound for a merged file produced by compaction: 400 KiB.
pub const DEFAULT_UPPER_MERGE_THRESHOLD: usize = 400 * 1024;

/// Tunable parameters for an [`engine::Engine`](../engine/struct.Engine.html) instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding SSTable files and the tombstone log.
    pub data_dir: PathBuf,
    /// Maximum key length, in bytes, enforced at the write/delete surface.
    pub max_key_len: usize,
    /// Maximum value length, in bytes, enforced at the write surface.
    pub max_value_len: usize,
    /// Memtable byte-charge threshold that triggers an automatic flush.
    pub flush_threshold: usize,
    /// Files below this size are candidates for merging during compaction.
    pub small_file_threshold: usize,
    /// A merged output file will not grow past this size.
    pub upper_merge_threshold: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            max_key_len: DEFAULT_MAX_KEY_LEN,
            max_value_len: DEFAULT_MAX_VALUE_LEN,
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            small_file_threshold: DEFAULT_SMALL_FILE_THRESHOLD,
            upper_merge_threshold: DEFAULT_UPPER_MERGE_THRESHOLD,
        }
    }
}

/// Reads an environment variable and parses it as `T`, falling back to
/// `default` if the variable is unset or fails to parse.
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl StoreConfig {
    /// Builds a [`StoreConfig`] from the process environment, overlaying
    /// defaults with whichever of the following variables are set and parse
    /// successfully:
    ///
    /// ```text
    /// LSMKV_DATA_DIR               data directory            (default: "data")
    /// LSMKV_MAX_KEY_LEN            max key length in bytes    (default: 100)
    /// LSMKV_MAX_VALUE_LEN          max value length in bytes  (default: 100)
    /// LSMKV_FLUSH_THRESHOLD        flush threshold in bytes   (default: 1048576)
    /// LSMKV_SMALL_FILE_THRESHOLD   small-file threshold bytes (default: 204800)
    /// LSMKV_UPPER_MERGE_THRESHOLD  merge output cap in bytes  (default: 409600)
    /// ```
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: std::env::var("LSMKV_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            max_key_len: env_or("LSMKV_MAX_KEY_LEN", defaults.max_key_len),
            max_value_len: env_or("LSMKV_MAX_VALUE_LEN", defaults.max_value_len),
            flush_threshold: env_or("LSMKV_FLUSH_THRESHOLD", defaults.flush_threshold),
            small_file_threshold: env_or(
                "LSMKV_SMALL_FILE_THRESHOLD",
                defaults.small_file_threshold,
            ),
            upper_merge_threshold: env_or(
                "LSMKV_UPPER_MERGE_THRESHOLD",
                defaults.upper_merge_threshold,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.max_key_len, 100);
        assert_eq!(cfg.max_value_len, 100);
        assert_eq!(cfg.flush_threshold, 1024 * 1024);
        assert_eq!(cfg.small_file_threshold, 200 * 1024);
        assert_eq!(cfg.upper_merge_threshold, 400 * 1024);
    }

    #[test]
    fn from_env_falls_back_on_unset_vars() {
        // Use a key guaranteed not to be set.
        std::env::remove_var("LSMKV_MAX_KEY_LEN_TEST_PROBE");
        let cfg = StoreConfig::from_env();
        // Without any LSMKV_* vars set in the test environment, this should
        // equal the default.
        assert_eq!(cfg.max_key_len, StoreConfig::default().max_key_len);
    }
}
