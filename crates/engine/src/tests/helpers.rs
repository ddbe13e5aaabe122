use crate::Engine;
use config::StoreConfig;
use std::path::Path;

pub fn open_engine(dir: &Path) -> Engine {
    let config = StoreConfig {
        data_dir: dir.to_path_buf(),
        ..StoreConfig::default()
    };
    Engine::open(config).unwrap()
}

pub fn open_engine_with(dir: &Path, f: impl FnOnce(&mut StoreConfig)) -> Engine {
    let mut config = StoreConfig {
        data_dir: dir.to_path_buf(),
        ..StoreConfig::default()
    };
    f(&mut config);
    Engine::open(config).unwrap()
}

pub fn count_sstable_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .file_name()
                .and_then(|n| n.to_str())
                .map(sstable::is_sstable_filename)
                .unwrap_or(false)
        })
        .count()
}
