use crate::error::Result;

/// Сведения о процессах ОС, нужные для восстановления команды окна
#[async_trait::async_trait]
pub trait ProcessTable: Send + Sync {
    /// pid процесса-владельца X11-окна (свойство `_NET_WM_PID`)
    async fn window_pid(&self, native_id: u64) -> Result<u32>;

    /// Полная командная строка процесса
    async fn command_line(&self, pid: u32) -> Result<String>;
}
