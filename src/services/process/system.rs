use crate::error::Result;
use crate::launcher_error;
use std::process::Command;
use tracing::debug;

use super::r#trait::ProcessTable;

/// Таблица процессов через `xprop` и `ps`
pub struct SystemProcessTable;

impl SystemProcessTable {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Значение из строки вида `_NET_WM_PID(CARDINAL) = 12345`
fn parse_xprop_pid(stdout: &str) -> Option<u32> {
    let (_, value) = stdout.trim().rsplit_once("= ")?;
    value.trim().parse().ok()
}

#[async_trait::async_trait]
impl ProcessTable for SystemProcessTable {
    async fn window_pid(&self, native_id: u64) -> Result<u32> {
        let window_id = format!("0x{:x}", native_id);
        let output = Command::new("xprop")
            .args(["-id", window_id.as_str(), "_NET_WM_PID"])
            .output()
            .map_err(|e| launcher_error!(internal, "xprop не найден: {}", e))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("xprop {}: '{}'", window_id, stdout.trim());

        if !output.status.success() {
            return Err(launcher_error!(internal, "xprop вернул ошибку для окна {}", window_id));
        }

        parse_xprop_pid(&stdout)
            .ok_or_else(|| launcher_error!(internal, "у окна {} нет _NET_WM_PID", window_id))
    }

    async fn command_line(&self, pid: u32) -> Result<String> {
        let pid_arg = pid.to_string();
        let output = Command::new("ps")
            .args(["-hp", pid_arg.as_str(), "-o", "command"])
            .output()
            .map_err(|e| launcher_error!(internal, "ps не найден: {}", e))?;

        if !output.status.success() {
            return Err(launcher_error!(internal, "процесс {} не найден", pid));
        }

        let command = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("ps {}: '{}'", pid, command);
        Ok(command)
    }
}
