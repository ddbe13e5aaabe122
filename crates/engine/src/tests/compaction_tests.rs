use super::helpers::{count_sstable_files, open_engine, open_engine_with};
use tempfile::tempdir;

#[test]
fn compact_with_no_tombstones_and_no_small_files_is_noop() {
    let dir = tempdir().unwrap();
    let mut engine = open_engine(dir.path());

    engine.write(b"k".to_vec(), b"v".to_vec()).unwrap();
    engine.flush().unwrap();

    let before = count_sstable_files(dir.path());
    engine.compact().unwrap();
    assert_eq!(count_sstable_files(dir.path()), before);
    assert_eq!(engine.read(b"k").unwrap(), Some(b"v".to_vec()));
}

#[test]
fn compact_applies_pending_tombstone_and_empties_log() {
    let dir = tempdir().unwrap();
    let mut engine = open_engine(dir.path());

    engine.write(b"k".to_vec(), b"v".to_vec()).unwrap();
    engine.flush().unwrap();
    engine.delete(b"k".to_vec()).unwrap();

    assert!(engine.read(b"k").unwrap().is_none());

    engine.compact().unwrap();

    assert!(engine.read(b"k").unwrap().is_none());

    for path in std::fs::read_dir(dir.path()).unwrap() {
        let path = path.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        if sstable::is_sstable_filename(name) {
            let contents = std::fs::read_to_string(&path).unwrap();
            assert!(
                !contents.lines().any(|l| l.starts_with("k ")),
                "tombstoned key should not survive in any sstable line"
            );
        }
    }
}

#[test]
fn compact_preserves_tombstone_shadowed_by_later_reinsert() {
    let dir = tempdir().unwrap();
    let mut engine = open_engine(dir.path());

    engine.write(b"k".to_vec(), b"v1".to_vec()).unwrap();
    engine.flush().unwrap();
    engine.delete(b"k".to_vec()).unwrap();
    engine.write(b"k".to_vec(), b"v2".to_vec()).unwrap();

    assert_eq!(engine.read(b"k").unwrap(), Some(b"v2".to_vec()));

    engine.compact().unwrap();

    assert_eq!(engine.read(b"k").unwrap(), Some(b"v2".to_vec()));
}

#[test]
fn compact_merges_many_small_files_and_keeps_every_key_readable() {
    let dir = tempdir().unwrap();
    let mut engine = open_engine(dir.path());

    for i in 0..10u64 {
        engine
            .write(format!("k{i}").into_bytes(), b"v".to_vec())
            .unwrap();
        engine.flush().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
    }

    let before = count_sstable_files(dir.path());
    assert_eq!(before, 10);

    engine.compact().unwrap();

    let after = count_sstable_files(dir.path());
    assert!(after < before, "compaction should reduce file count");

    for i in 0..10u64 {
        let key = format!("k{i}").into_bytes();
        assert!(engine.read(&key).unwrap().is_some());
    }
}

#[test]
fn compact_merged_output_does_not_exceed_upper_threshold() {
    let dir = tempdir().unwrap();
    let mut engine = open_engine_with(dir.path(), |c| {
        c.small_file_threshold = 1024;
        c.upper_merge_threshold = 2048;
    });

    for i in 0..30u64 {
        engine
            .write(format!("key{i:04}").into_bytes(), vec![b'x'; 50])
            .unwrap();
        engine.flush().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(1));
    }

    engine.compact().unwrap();

    for path in std::fs::read_dir(dir.path()).unwrap() {
        let path = path.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        if sstable::is_sstable_filename(name) {
            let size = std::fs::metadata(&path).unwrap().len() as usize;
            assert!(size <= 2048 + 64, "merged file {name} exceeds upper bound: {size}");
        }
    }

    for i in 0..30u64 {
        let key = format!("key{i:04}").into_bytes();
        assert!(engine.read(&key).unwrap().is_some());
    }
}

#[test]
fn compact_dedup_keeps_newest_value_across_merged_files() {
    let dir = tempdir().unwrap();
    let mut engine = open_engine(dir.path());

    engine.write(b"k".to_vec(), b"v1".to_vec()).unwrap();
    engine.flush().unwrap();
    std::thread::sleep(std::time::Duration::from_millis(2));
    engine.write(b"k".to_vec(), b"v2".to_vec()).unwrap();
    engine.flush().unwrap();
    std::thread::sleep(std::time::Duration::from_millis(2));
    engine.write(b"other".to_vec(), b"x".to_vec()).unwrap();
    engine.flush().unwrap();

    engine.compact().unwrap();

    assert_eq!(engine.read(b"k").unwrap(), Some(b"v2".to_vec()));
    assert_eq!(engine.read(b"other").unwrap(), Some(b"x".to_vec()));
}

#[test]
fn compact_is_idempotent_on_contents() {
    let dir = tempdir().unwrap();
    let mut engine = open_engine(dir.path());

    for i in 0..10u64 {
        engine
            .write(format!("k{i}").into_bytes(), b"v".to_vec())
            .unwrap();
        engine.flush().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
    }

    engine.compact().unwrap();
    let after_first: Vec<_> = (0..10u64)
        .map(|i| engine.read(format!("k{i}").as_bytes()).unwrap())
        .collect();

    engine.compact().unwrap();
    let after_second: Vec<_> = (0..10u64)
        .map(|i| engine.read(format!("k{i}").as_bytes()).unwrap())
        .collect();

    assert_eq!(after_first, after_second);
}

#[test]
fn many_keys_with_interleaved_deletes_survive_compaction() {
    let dir = tempdir().unwrap();
    let mut engine = open_engine_with(dir.path(), |c| c.flush_threshold = 2048);

    for i in 0..200u64 {
        let key = format!("key{i:04}").into_bytes();
        engine.write(key, vec![b'v'; 32]).unwrap();
    }

    for i in (0..200u64).step_by(2) {
        let key = format!("key{i:04}").into_bytes();
        engine.delete(key).unwrap();
    }

    engine.flush().unwrap();
    engine.compact().unwrap();

    for i in 0..200u64 {
        let key = format!("key{i:04}").into_bytes();
        if i % 2 == 0 {
            assert!(engine.read(&key).unwrap().is_none());
        } else {
            assert!(engine.read(&key).unwrap().is_some());
        }
    }
}
