use crate::error::Result;
use crate::model::{Node, WorkspaceReply};
use tracing::info;

use super::ipc::IpcWindowManager;
use super::r#trait::WindowManager;

/// Читает реальное состояние, но команды только логирует
pub struct DryRunWindowManager {
    inner: IpcWindowManager,
}

impl DryRunWindowManager {
    pub fn new(inner: IpcWindowManager) -> Self {
        info!("Dry-run режим - команды оконному менеджеру не отправляются");
        Self { inner }
    }
}

#[async_trait::async_trait]
impl WindowManager for DryRunWindowManager {
    async fn get_tree(&self) -> Result<Node> {
        self.inner.get_tree().await
    }

    async fn get_workspaces(&self) -> Result<Vec<WorkspaceReply>> {
        self.inner.get_workspaces().await
    }

    async fn command(&self, command: &str) -> Result<()> {
        info!("Dry-run: {}", command);
        Ok(())
    }
}
