//! WindowManager service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for talking to the window
//! manager over its IPC (`i3-msg` / `swaymsg`): reading the workspace list and the
//! container tree, and sending textual commands. Profile matching, capture and launch
//! decisions live in the executors.

mod dry_run;
mod ipc;
mod r#trait;

pub use self::r#trait::{create_window_manager, WindowManager};
