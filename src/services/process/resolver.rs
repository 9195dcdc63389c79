use crate::model::LiveWindow;
use std::sync::Arc;
use crate::debug_if_enabled;

use super::r#trait::ProcessTable;

/// Восстанавливает команду, которой было запущено окно
pub struct WindowCommandResolver {
    processes: Arc<dyn ProcessTable>,
}

impl WindowCommandResolver {
    pub fn new(processes: Arc<dyn ProcessTable>) -> Self {
        Self { processes }
    }

    /// Командная строка процесса-владельца окна или пустая строка, если её не узнать.
    ///
    /// sway сам сообщает pid окна; для X11-окон pid берётся из `_NET_WM_PID`.
    pub async fn resolve_command(&self, window: &LiveWindow) -> String {
        let pid = match (window.pid, window.native_id) {
            (Some(pid), _) => pid,
            (None, Some(native_id)) => match self.processes.window_pid(native_id).await {
                Ok(pid) => pid,
                Err(e) => {
                    debug_if_enabled!("Не удалось определить pid окна {}: {}", window, e);
                    return String::new();
                }
            },
            (None, None) => {
                debug_if_enabled!("У окна {} нет ни pid, ни X11 id", window);
                return String::new();
            }
        };

        match self.processes.command_line(pid).await {
            Ok(command) => command.trim().to_string(),
            Err(e) => {
                debug_if_enabled!("Не удалось получить команду процесса {} (окно {}): {}", pid, window, e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::FakeProcessTable;

    fn resolver() -> WindowCommandResolver {
        let processes = FakeProcessTable::new()
            .with_window(0x400003, 100)
            .with_window(0x400004, 200)
            .with_process(100, "  firefox --new-window \n")
            .with_process(300, "mpv movie.mkv");
        WindowCommandResolver::new(Arc::new(processes))
    }

    #[tokio::test]
    async fn test_resolves_through_window_property() {
        let window = LiveWindow::new(1).with_native_id(0x400003);
        assert_eq!(resolver().resolve_command(&window).await, "firefox --new-window");
    }

    #[tokio::test]
    async fn test_known_pid_skips_window_property() {
        let window = LiveWindow::new(2).with_pid(300);
        assert_eq!(resolver().resolve_command(&window).await, "mpv movie.mkv");
    }

    #[tokio::test]
    async fn test_failures_give_empty_command() {
        let resolver = resolver();

        // нет _NET_WM_PID
        let unknown_window = LiveWindow::new(3).with_native_id(0xdead);
        assert_eq!(resolver.resolve_command(&unknown_window).await, "");

        // процесс уже завершился
        let gone_process = LiveWindow::new(4).with_native_id(0x400004);
        assert_eq!(resolver.resolve_command(&gone_process).await, "");

        assert_eq!(resolver.resolve_command(&LiveWindow::new(5)).await, "");
    }
}
