#![allow(dead_code)]

use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use blotter::db::Store;

/// A store backed by a throwaway SQLite file, removed on drop.
pub struct TempStore {
    pub store: Store,
    path: PathBuf,
}

impl TempStore {
    pub async fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "blotter-{}-{}-{}.sqlite",
            prefix,
            std::process::id(),
            nanos
        ));

        let database_url = format!("sqlite:{}", path.display());
        let store = Store::open(&database_url)
            .await
            .expect("failed to open store");
        Self { store, path }
    }
}

impl Drop for TempStore {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
        for suffix in ["-wal", "-shm"] {
            let mut side = self.path.clone().into_os_string();
            side.push(suffix);
            let _ = fs::remove_file(side);
        }
    }
}
