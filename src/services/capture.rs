use crate::error::{LauncherError, Result};
use crate::model::LiveWorkspace;
use crate::services::context::LauncherContext;
use crate::services::process::WindowCommandResolver;
use crate::utils::normalize;
use tracing::{info, warn};

/// Какие рабочие пространства сохранять
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CaptureTarget {
    All,
    Current,
}

/// Итог сохранения одного рабочего пространства
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedProfile {
    pub name: String,
    pub commands: usize,
    pub unresolved: usize,
}

/// Записывает команды окон живых рабочих пространств в профили
pub struct CaptureExecutor {
    ctx: LauncherContext,
    resolver: WindowCommandResolver,
}

impl CaptureExecutor {
    pub fn new(ctx: LauncherContext) -> Self {
        let resolver = WindowCommandResolver::new(ctx.processes.clone());
        Self { ctx, resolver }
    }

    /// Рабочие пространства для сохранения, свежим запросом дерева
    pub async fn targets(&self, target: CaptureTarget) -> Result<Vec<LiveWorkspace>> {
        match target {
            CaptureTarget::All => self.ctx.wm.live_workspaces().await,
            CaptureTarget::Current => Ok(self.ctx.wm.focused_workspace().await?.into_iter().collect()),
        }
    }

    /// Перезаписать `on_start_exec` профилей по текущим окнам и сохранить файл один раз
    pub async fn capture(&self, targets: &[LiveWorkspace]) -> Result<Vec<CapturedProfile>> {
        if targets.is_empty() {
            return Err(LauncherError::NoWorkspacesFound);
        }

        let mut store = self.ctx.load_store()?;
        let mut captured = Vec::with_capacity(targets.len());

        for workspace in targets {
            let name = normalize(&workspace.raw_name);
            if name.trim().is_empty() {
                warn!("Рабочее пространство {} без имени пропущено", workspace);
                continue;
            }

            let mut commands = Vec::with_capacity(workspace.windows.len());
            for window in &workspace.windows {
                commands.push(self.resolver.resolve_command(window).await);
            }

            let unresolved = commands.iter().filter(|c| c.is_empty()).count();
            if unresolved > 0 {
                warn!("{}: не удалось определить команды {} окон", workspace, unresolved);
            }

            let profile = store.upsert(&name);
            profile.on_start_exec = commands;

            info!("Профиль '{}': сохранено {} команд", name, profile.on_start_exec.len());
            captured.push(CapturedProfile {
                name,
                commands: profile.on_start_exec.len(),
                unresolved,
            });
        }

        self.ctx.save_store(&store)?;
        Ok(captured)
    }
}
