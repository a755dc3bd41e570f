use crate::cache::StatsCache;
use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// The workout log plus a version counter that changes on every edit, so
/// cached stats can tell when they are stale.
#[derive(Debug, Default)]
pub struct Store {
    pub data: AppData,
    pub version: u64,
}

impl Store {
    pub fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub store: Arc<Mutex<Store>>,
    pub stats_cache: Arc<Mutex<StatsCache>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            store: Arc::new(Mutex::new(Store { data, version: 0 })),
            stats_cache: Arc::new(Mutex::new(StatsCache::default())),
        }
    }
}
