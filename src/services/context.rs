use crate::config::Config;
use crate::error::Result;
use crate::model::ProfileStore;
use crate::services::process::ProcessTable;
use crate::services::window_manager::WindowManager;
use std::path::PathBuf;
use std::sync::Arc;

/// Всё, что нужно исполнителям: настройки, оконный менеджер, процессы и файл профилей
#[derive(Clone)]
pub struct LauncherContext {
    pub config: Arc<Config>,
    pub wm: Arc<dyn WindowManager>,
    pub processes: Arc<dyn ProcessTable>,
    pub store_path: PathBuf,
}

impl LauncherContext {
    pub fn new(
        config: Arc<Config>,
        wm: Arc<dyn WindowManager>,
        processes: Arc<dyn ProcessTable>,
    ) -> Self {
        let store_path = config.store_path();
        Self {
            config,
            wm,
            processes,
            store_path,
        }
    }

    pub fn with_store_path(mut self, store_path: PathBuf) -> Self {
        self.store_path = store_path;
        self
    }

    pub fn load_store(&self) -> Result<ProfileStore> {
        ProfileStore::load(&self.store_path)
    }

    pub fn save_store(&self, store: &ProfileStore) -> Result<()> {
        store.save(&self.store_path)
    }
}
