pub mod capture;
pub mod context;
pub mod launcher;
pub mod matcher;
pub mod process;
pub mod watcher;
pub mod window_manager;

#[cfg(test)]
pub mod testing;

pub use capture::{CaptureExecutor, CaptureTarget};
pub use context::LauncherContext;
pub use launcher::LaunchExecutor;
pub use process::SystemProcessTable;
pub use watcher::StoreWatcher;
pub use window_manager::create_window_manager;
