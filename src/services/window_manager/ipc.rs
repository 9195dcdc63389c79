use crate::error::Result;
use crate::launcher_error;
use crate::model::{Node, WorkspaceReply};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::process::Command;
use tracing::debug;

use super::r#trait::WindowManager;

/// Оконный менеджер через утилиту `i3-msg` или `swaymsg`
pub struct IpcWindowManager {
    binary: String,
}

/// Ответ на `RUN_COMMAND`: по одному элементу на каждую команду в строке
#[derive(Debug, Deserialize)]
struct CommandOutcome {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

impl IpcWindowManager {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        debug!("{} {:?}", self.binary, args);

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|e| launcher_error!(ipc, "{} не найден: {}", self.binary, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        // i3-msg при ошибке команды тоже пишет JSON в stdout, разбираем его ниже
        if !output.status.success() && stdout.trim().is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(launcher_error!(ipc, "{} вернул ошибку: {}", self.binary, stderr.trim()));
        }

        Ok(stdout)
    }

    fn query<T: DeserializeOwned>(&self, message_type: &str) -> Result<T> {
        let stdout = self.run(&["-t", message_type])?;
        serde_json::from_str(&stdout).map_err(|e| {
            launcher_error!(ipc, "Некорректный ответ {} на {}: {}", self.binary, message_type, e)
        })
    }
}

fn check_outcomes(command: &str, stdout: &str) -> Result<()> {
    let outcomes: Vec<CommandOutcome> = serde_json::from_str(stdout)
        .map_err(|e| launcher_error!(ipc, "Некорректный ответ на команду '{}': {}", command, e))?;

    if let Some(failed) = outcomes.iter().find(|o| !o.success) {
        return Err(launcher_error!(
            ipc,
            "Команда '{}' не выполнена: {}",
            command,
            failed.error.as_deref().unwrap_or("неизвестная ошибка")
        ));
    }

    Ok(())
}

#[async_trait::async_trait]
impl WindowManager for IpcWindowManager {
    async fn get_tree(&self) -> Result<Node> {
        self.query("get_tree")
    }

    async fn get_workspaces(&self) -> Result<Vec<WorkspaceReply>> {
        self.query("get_workspaces")
    }

    async fn command(&self, command: &str) -> Result<()> {
        debug!("Команда оконному менеджеру: {}", command);
        let stdout = self.run(&[command])?;
        check_outcomes(command, &stdout)
    }
}
