//! Compaction: a synchronous, two-phase operation over the SSTable set.
//!
//! Phase A applies every pending tombstone against every SSTable, rewriting
//! each in place via temp+rename. Only once every file has been rewritten
//! successfully is the on-disk tombstone log truncated — a crash mid-phase-A
//! leaves the log intact and the next compaction simply retries.
//!
//! Phase B merges adjacent small files into packed files bounded by
//! `upper_merge_threshold`, deduplicating by key within each merged output
//! so the newest source's value survives.

use crate::Engine;
use error::{StoreError, StoreResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

impl Engine {
    /// Runs compaction phase A (tombstone application) followed by phase B
    /// (small-file merge).
    pub fn compact(&mut self) -> StoreResult<()> {
        self.compact_apply_tombstones()?;
        self.compact_merge_small_files()?;
        Ok(())
    }

    fn compact_apply_tombstones(&mut self) -> StoreResult<()> {
        let tombstones = self.tombstones.load()?;
        if tombstones.is_empty() {
            tracing::info!("compaction phase A: no pending tombstones");
            return Ok(());
        }

        let paths = self.sstable_paths()?;
        let mut lines_dropped = 0usize;
        let mut files_rewritten = 0usize;

        for path in &paths {
            let mut retained: Vec<(Vec<u8>, Vec<u8>)> = Vec::new();
            let mut dropped_here = 0usize;
            for entry in sstable::read_all(path)? {
                let (key, value) = entry?;
                if tombstones.contains(&key) {
                    dropped_here += 1;
                } else {
                    retained.push((key, value));
                }
            }
            if dropped_here > 0 {
                let refs: Vec<(&[u8], &[u8])> = retained
                    .iter()
                    .map(|(k, v)| (k.as_slice(), v.as_slice()))
                    .collect();
                sstable::rewrite_in_place(path, refs)?;
                lines_dropped += dropped_here;
                files_rewritten += 1;
            }
        }

        self.tombstones.truncate()?;
        tracing::info!(
            tombstones = tombstones.len(),
            lines_dropped,
            files_rewritten,
            files_scanned = paths.len(),
            "compaction phase A complete"
        );
        Ok(())
    }

    fn compact_merge_small_files(&mut self) -> StoreResult<()> {
        let dir = self.config.data_dir.clone();
        let small_threshold = self.config.small_file_threshold;
        let upper_threshold = self.config.upper_merge_threshold;

        let mut paths = self.sstable_paths()?;
        paths.sort();

        let mut small = Vec::new();
        for path in paths {
            let size = std::fs::metadata(&path)
                .map_err(|e| StoreError::io(&path, e))?
                .len() as usize;
            if size < small_threshold {
                small.push(path);
            }
        }

        if small.len() < 2 {
            tracing::info!(small_files = small.len(), "compaction phase B: nothing to merge");
            return Ok(());
        }

        let max_input_nanos = small
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .filter_map(sstable::parse_timestamp)
            .max()
            .unwrap_or(0);

        let mut merged_outputs = 0usize;
        let mut output_path = sstable::fresh_path_after(&dir, max_input_nanos)?;
        let mut buffer: HashMap<Vec<u8>, Vec<u8>> = HashMap::new();
        let mut running_size = 0usize;
        let mut sources: Vec<PathBuf> = Vec::new();

        for path in small {
            let size = std::fs::metadata(&path)
                .map_err(|e| StoreError::io(&path, e))?
                .len() as usize;

            if !sources.is_empty() && running_size + size > upper_threshold {
                Self::close_merge_output(&output_path, &buffer)?;
                Self::remove_sources(&sources)?;
                merged_outputs += 1;
                output_path = sstable::fresh_path_after(&dir, max_input_nanos)?;
                buffer = HashMap::new();
                running_size = 0;
                sources.clear();
            }

            for entry in sstable::read_all(&path)? {
                let (key, value) = entry?;
                buffer.insert(key, value);
            }
            running_size += size;
            sources.push(path);
        }

        if !sources.is_empty() {
            Self::close_merge_output(&output_path, &buffer)?;
            Self::remove_sources(&sources)?;
            merged_outputs += 1;
        }

        tracing::info!(output_files = merged_outputs, "compaction phase B complete");
        Ok(())
    }

    fn close_merge_output(path: &Path, buffer: &HashMap<Vec<u8>, Vec<u8>>) -> StoreResult<()> {
        let mut entries: Vec<(&[u8], &[u8])> = buffer
            .iter()
            .map(|(k, v)| (k.as_slice(), v.as_slice()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        sstable::write_from_entries(path, entries)
    }

    fn remove_sources(sources: &[PathBuf]) -> StoreResult<()> {
        for path in sources {
            std::fs::remove_file(path).map_err(|e| StoreError::io(path, e))?;
        }
        Ok(())
    }
}
