use crate::config::Config;
use crate::error::Result;
use crate::model::{LiveWorkspace, Node, WorkspaceReply};
use std::sync::Arc;

/// Trait for window manager backends (real IPC or dry-run)
#[async_trait::async_trait]
pub trait WindowManager: Send + Sync {
    /// Full container tree (`get_tree`)
    async fn get_tree(&self) -> Result<Node>;

    /// Workspace list with numbers (`get_workspaces`)
    async fn get_workspaces(&self) -> Result<Vec<WorkspaceReply>>;

    /// Send one textual command, e.g. `layout splitv`
    async fn command(&self, command: &str) -> Result<()>;

    /// Все рабочие пространства вместе с окнами, свежим запросом дерева
    async fn live_workspaces(&self) -> Result<Vec<LiveWorkspace>> {
        let tree = self.get_tree().await?;
        Ok(tree
            .workspaces()
            .into_iter()
            .map(LiveWorkspace::from_node)
            .collect())
    }

    /// Рабочее пространство со сфокусированным контейнером
    async fn focused_workspace(&self) -> Result<Option<LiveWorkspace>> {
        let tree = self.get_tree().await?;
        Ok(tree.focused_workspace().map(LiveWorkspace::from_node))
    }
}

/// Factory function to create an appropriate window manager backend based on the dry_run flag
pub fn create_window_manager(config: &Config, dry_run: bool) -> Arc<dyn WindowManager> {
    let ipc = super::ipc::IpcWindowManager::new(config.msg_binary());
    if dry_run {
        Arc::new(super::dry_run::DryRunWindowManager::new(ipc))
    } else {
        Arc::new(ipc)
    }
}
