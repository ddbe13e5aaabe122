use super::*;
use tempfile::tempdir;

#[test]
fn ensure_exists_creates_empty_file() {
    let dir = tempdir().unwrap();
    let log = TombstoneLog::new(dir.path().join("tombstones.dat"));
    log.ensure_exists().unwrap();
    assert!(log.path().exists());
    assert!(log.is_empty().unwrap());
}

#[test]
fn append_then_contains() {
    let dir = tempdir().unwrap();
    let log = TombstoneLog::new(dir.path().join("tombstones.dat"));
    log.ensure_exists().unwrap();
    log.append(b"k1").unwrap();
    assert!(log.contains(b"k1").unwrap());
    assert!(!log.contains(b"k2").unwrap());
}

#[test]
fn contains_on_missing_file_is_false() {
    let dir = tempdir().unwrap();
    let log = TombstoneLog::new(dir.path().join("does-not-exist.dat"));
    assert!(!log.contains(b"anything").unwrap());
}

#[test]
fn load_collects_all_pending_keys() {
    let dir = tempdir().unwrap();
    let log = TombstoneLog::new(dir.path().join("tombstones.dat"));
    log.ensure_exists().unwrap();
    log.append(b"a").unwrap();
    log.append(b"b").unwrap();
    log.append(b"a").unwrap(); // duplicate collapses

    let set = log.load().unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.contains(b"a".as_slice()));
    assert!(set.contains(b"b".as_slice()));
}

#[test]
fn load_does_not_truncate() {
    let dir = tempdir().unwrap();
    let log = TombstoneLog::new(dir.path().join("tombstones.dat"));
    log.ensure_exists().unwrap();
    log.append(b"a").unwrap();

    let _ = log.load().unwrap();
    assert!(!log.is_empty().unwrap(), "load() must not truncate the log");
}

#[test]
fn truncate_empties_the_log() {
    let dir = tempdir().unwrap();
    let log = TombstoneLog::new(dir.path().join("tombstones.dat"));
    log.ensure_exists().unwrap();
    log.append(b"a").unwrap();
    log.truncate().unwrap();
    assert!(log.is_empty().unwrap());
    assert!(log.load().unwrap().is_empty());
}

#[test]
fn is_empty_true_for_missing_file() {
    let dir = tempdir().unwrap();
    let log = TombstoneLog::new(dir.path().join("nope.dat"));
    assert!(log.is_empty().unwrap());
}

#[test]
fn non_utf8_key_round_trips_through_contains_and_load() {
    let dir = tempdir().unwrap();
    let log = TombstoneLog::new(dir.path().join("tombstones.dat"));
    log.ensure_exists().unwrap();
    let key = vec![0xFF, 0x00, 0x80, 0xFE];
    log.append(&key).unwrap();

    assert!(log.contains(&key).unwrap());
    assert!(!log.contains(b"other").unwrap());

    let set = log.load().unwrap();
    assert!(set.contains(key.as_slice()));
}
