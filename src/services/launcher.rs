use crate::error::{LauncherError, Result};
use crate::model::{Profile, ProfileStore};
use crate::services::context::LauncherContext;
use crate::services::matcher::WorkspaceMatcher;
use crate::utils::expand::expand_command;
use crate::utils::normalize;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Профиль, который не удалось запустить в `launch_all`
#[derive(Debug)]
pub struct LaunchFailure {
    pub profile: String,
    pub error: LauncherError,
}

/// Воссоздаёт рабочие пространства по сохранённым профилям
pub struct LaunchExecutor {
    ctx: LauncherContext,
    matcher: WorkspaceMatcher,
}

impl LaunchExecutor {
    pub fn new(ctx: LauncherContext) -> Self {
        let matcher = WorkspaceMatcher::new(ctx.wm.clone(), ctx.config.launch.max_slot);
        Self { ctx, matcher }
    }

    /// Запустить один профиль: фокус, layout, exec всех команд, переименование
    pub async fn launch(&self, store: &ProfileStore, requested: &str) -> Result<()> {
        let name = normalize(requested);
        let profile = store
            .get(&name)
            .ok_or_else(|| LauncherError::ProfileNotFound(name.clone()))?;

        self.run(profile).await
    }

    /// Запустить все профили по порядку; ошибка одного не мешает остальным
    pub async fn launch_all(&self, store: &ProfileStore) -> Vec<LaunchFailure> {
        let mut failures = Vec::new();

        // имена из хранилища уже канонические, поиск по ним не нужен
        for profile in &store.profiles {
            if let Err(e) = self.run(profile).await {
                error!("Не удалось запустить профиль '{}': {}", profile.name, e);
                failures.push(LaunchFailure {
                    profile: profile.name.clone(),
                    error: e,
                });
            }
        }

        failures
    }

    async fn run(&self, profile: &Profile) -> Result<()> {
        info!("Запуск профиля {}", profile);

        self.ensure_focused(&profile.name).await?;
        self.apply_layout(profile).await?;
        self.replay(profile).await?;

        if self.ctx.config.launch.rename_workspace {
            self.label(&profile.name).await?;
        }

        Ok(())
    }

    async fn ensure_focused(&self, name: &str) -> Result<()> {
        match self.matcher.find_live_workspace_for(name).await? {
            Some(ws) if ws.focused => {
                info!("Рабочее пространство {} уже в фокусе", ws);
            }
            Some(ws) => {
                info!("Переключаемся на существующее рабочее пространство {}", ws);
                self.ctx
                    .wm
                    .command(&format!("workspace \"{}\"", ws.raw_name))
                    .await?;
            }
            None => {
                let slot = self.matcher.next_free_slot().await?;
                info!("Создаём рабочее пространство \"{} {}\"", slot, name);
                self.ctx
                    .wm
                    .command(&format!("workspace \"{} {}\"", slot, name))
                    .await?;
            }
        }

        Ok(())
    }

    async fn apply_layout(&self, profile: &Profile) -> Result<()> {
        if let Some(split) = profile.split {
            self.ctx.wm.command(split.layout_command()).await?;
        }
        Ok(())
    }

    async fn replay(&self, profile: &Profile) -> Result<()> {
        let delay = self.ctx.config.exec_delay();

        for cmd in &profile.on_start_exec {
            if cmd.trim().is_empty() {
                warn!("Профиль '{}': пустая команда пропущена", profile.name);
                continue;
            }

            let cmd = expand_command(cmd);
            info!("Выполняем: {}", cmd);
            self.ctx.wm.command(&format!("exec {}", cmd)).await?;

            // окно должно успеть появиться, пока этот workspace в фокусе
            sleep(delay).await;
        }

        Ok(())
    }

    /// Вернуть отображаемое имя вида "N name"
    async fn label(&self, name: &str) -> Result<()> {
        let slot = self
            .matcher
            .focused_workspace()
            .await?
            .and_then(|ws| ws.numeric_slot);

        match slot {
            Some(slot) => {
                self.ctx
                    .wm
                    .command(&format!("rename workspace to \"{} {}\"", slot, name))
                    .await
            }
            None => {
                warn!("У сфокусированного рабочего пространства нет номера, переименование пропущено");
                Ok(())
            }
        }
    }
}
