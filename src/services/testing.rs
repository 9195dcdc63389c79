//! Фейковые оконный менеджер и таблица процессов для тестов исполнителей

use crate::error::Result;
use crate::launcher_error;
use crate::model::{LiveWindow, Node, WorkspaceReply};
use crate::services::process::ProcessTable;
use crate::services::window_manager::WindowManager;
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct FakeWorkspace {
    name: String,
    num: i32,
    windows: Vec<LiveWindow>,
}

#[derive(Debug, Default)]
struct FakeState {
    workspaces: Vec<FakeWorkspace>,
    focused: Option<usize>,
    commands: Vec<String>,
}

/// Оконный менеджер в памяти: запоминает команды и понимает `workspace` и `rename`
#[derive(Debug, Default)]
pub struct FakeWindowManager {
    state: Mutex<FakeState>,
    fail_commands: bool,
}

/// Номер из начала имени, как его вычисляет i3
fn leading_num(name: &str) -> i32 {
    let digits: String = name.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(-1)
}

fn unquote(s: &str) -> &str {
    s.trim().trim_matches('"')
}

impl FakeWindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workspace(self, name: &str, windows: Vec<LiveWindow>) -> Self {
        self.state.lock().workspaces.push(FakeWorkspace {
            name: name.to_string(),
            num: leading_num(name),
            windows,
        });
        self
    }

    pub fn with_focus(self, name: &str) -> Self {
        {
            let mut state = self.state.lock();
            state.focused = state.workspaces.iter().position(|ws| ws.name == name);
        }
        self
    }

    /// Любая команда завершается ошибкой IPC (запросы работают)
    pub fn failing_commands(mut self) -> Self {
        self.fail_commands = true;
        self
    }

    pub fn set_windows(&self, name: &str, windows: Vec<LiveWindow>) {
        let mut state = self.state.lock();
        if let Some(ws) = state.workspaces.iter_mut().find(|ws| ws.name == name) {
            ws.windows = windows;
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.state.lock().commands.clone()
    }

    pub fn focused_name(&self) -> Option<String> {
        let state = self.state.lock();
        state.focused.map(|i| state.workspaces[i].name.clone())
    }

    fn apply(state: &mut FakeState, command: &str) {
        if let Some(name) = command.strip_prefix("rename workspace to ") {
            if let Some(i) = state.focused {
                let name = unquote(name).to_string();
                state.workspaces[i].num = leading_num(&name);
                state.workspaces[i].name = name;
            }
        } else if let Some(name) = command.strip_prefix("workspace ") {
            let name = unquote(name).to_string();
            let index = match state.workspaces.iter().position(|ws| ws.name == name) {
                Some(i) => i,
                None => {
                    state.workspaces.push(FakeWorkspace {
                        num: leading_num(&name),
                        name,
                        windows: Vec::new(),
                    });
                    state.workspaces.len() - 1
                }
            };
            state.focused = Some(index);
        }
    }
}

#[async_trait::async_trait]
impl WindowManager for FakeWindowManager {
    async fn get_tree(&self) -> Result<Node> {
        let state = self.state.lock();
        let workspaces = state
            .workspaces
            .iter()
            .enumerate()
            .map(|(i, ws)| Node {
                id: 1000 + i as i64,
                node_type: "workspace".to_string(),
                name: Some(ws.name.clone()),
                num: Some(ws.num),
                focused: state.focused == Some(i) && ws.windows.is_empty(),
                nodes: ws
                    .windows
                    .iter()
                    .enumerate()
                    .map(|(j, w)| Node {
                        id: w.con_id,
                        node_type: "con".to_string(),
                        name: w.title.clone(),
                        window: w.native_id,
                        pid: w.pid,
                        focused: state.focused == Some(i) && j == 0,
                        ..Node::default()
                    })
                    .collect(),
                ..Node::default()
            })
            .collect();

        Ok(Node {
            id: 1,
            node_type: "root".to_string(),
            nodes: vec![Node {
                id: 2,
                node_type: "output".to_string(),
                name: Some("eDP-1".to_string()),
                nodes: workspaces,
                ..Node::default()
            }],
            ..Node::default()
        })
    }

    async fn get_workspaces(&self) -> Result<Vec<WorkspaceReply>> {
        let state = self.state.lock();
        Ok(state
            .workspaces
            .iter()
            .enumerate()
            .map(|(i, ws)| WorkspaceReply {
                num: ws.num,
                name: ws.name.clone(),
                focused: state.focused == Some(i),
            })
            .collect())
    }

    async fn command(&self, command: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.commands.push(command.to_string());
        if self.fail_commands {
            return Err(launcher_error!(ipc, "команда отклонена: {}", command));
        }
        Self::apply(&mut state, command);
        Ok(())
    }
}

/// Таблица процессов из заранее заданных соответствий
#[derive(Debug, Default)]
pub struct FakeProcessTable {
    windows: HashMap<u64, u32>,
    processes: HashMap<u32, String>,
}

impl FakeProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(mut self, native_id: u64, pid: u32) -> Self {
        self.windows.insert(native_id, pid);
        self
    }

    pub fn with_process(mut self, pid: u32, command: &str) -> Self {
        self.processes.insert(pid, command.to_string());
        self
    }
}

#[async_trait::async_trait]
impl ProcessTable for FakeProcessTable {
    async fn window_pid(&self, native_id: u64) -> Result<u32> {
        self.windows
            .get(&native_id)
            .copied()
            .ok_or_else(|| launcher_error!(internal, "нет _NET_WM_PID у 0x{:x}", native_id))
    }

    async fn command_line(&self, pid: u32) -> Result<String> {
        self.processes
            .get(&pid)
            .cloned()
            .ok_or_else(|| launcher_error!(internal, "процесс {} не найден", pid))
    }
}
