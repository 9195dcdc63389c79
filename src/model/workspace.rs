use serde::{Deserialize, Serialize};
use std::fmt;

/// Ответ `get_workspaces` (i3 и sway используют одинаковый формат)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceReply {
    /// -1 для рабочих пространств без номера
    #[serde(default = "no_slot")]
    pub num: i32,
    pub name: String,
    #[serde(default)]
    pub focused: bool,
}

fn no_slot() -> i32 {
    -1
}

impl WorkspaceReply {
    pub fn slot(&self) -> Option<u32> {
        u32::try_from(self.num).ok()
    }
}

/// Узел дерева контейнеров из `get_tree`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub num: Option<i32>,
    /// X11 id окна (у нативных Wayland-окон sway отсутствует)
    #[serde(default)]
    pub window: Option<u64>,
    /// pid владельца окна (заполняет только sway)
    #[serde(default)]
    pub pid: Option<u32>,
    #[serde(default)]
    pub focused: bool,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub floating_nodes: Vec<Node>,
}

impl Node {
    fn children(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().chain(self.floating_nodes.iter())
    }

    fn is_window_leaf(&self) -> bool {
        self.nodes.is_empty()
            && (self.node_type == "con" || self.node_type == "floating_con")
    }

    /// Все рабочие пространства дерева, кроме служебных (`__i3_scratch`)
    pub fn workspaces(&self) -> Vec<&Node> {
        let mut result = Vec::new();
        self.collect_workspaces(&mut result);
        result
    }

    fn collect_workspaces<'a>(&'a self, acc: &mut Vec<&'a Node>) {
        if self.node_type == "workspace" {
            if !self.name.as_deref().unwrap_or_default().starts_with("__") {
                acc.push(self);
            }
            return;
        }
        for child in self.children() {
            child.collect_workspaces(acc);
        }
    }

    /// Окна-листья в порядке обхода дерева (сначала тайловые, затем плавающие)
    pub fn leaves(&self) -> Vec<&Node> {
        let mut result = Vec::new();
        for child in self.children() {
            child.collect_leaves(&mut result);
        }
        result
    }

    fn collect_leaves<'a>(&'a self, acc: &mut Vec<&'a Node>) {
        if self.is_window_leaf() {
            acc.push(self);
            return;
        }
        for child in self.children() {
            child.collect_leaves(acc);
        }
    }

    pub fn contains_focused(&self) -> bool {
        self.focused || self.children().any(Node::contains_focused)
    }

    /// Рабочее пространство, содержащее сфокусированный контейнер
    pub fn focused_workspace(&self) -> Option<&Node> {
        self.workspaces().into_iter().find(|ws| ws.contains_focused())
    }
}

/// Живое рабочее пространство оконного менеджера; не кэшируется между операциями
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveWorkspace {
    pub raw_name: String,
    pub numeric_slot: Option<u32>,
    pub focused: bool,
    pub windows: Vec<LiveWindow>,
}

impl LiveWorkspace {
    #[allow(dead_code)]
    pub fn new(raw_name: impl Into<String>) -> Self {
        Self {
            raw_name: raw_name.into(),
            numeric_slot: None,
            focused: false,
            windows: Vec::new(),
        }
    }

    #[allow(dead_code)]
    pub fn with_slot(mut self, slot: u32) -> Self {
        self.numeric_slot = Some(slot);
        self
    }

    #[allow(dead_code)]
    pub fn with_windows(mut self, windows: Vec<LiveWindow>) -> Self {
        self.windows = windows;
        self
    }

    pub fn from_node(node: &Node) -> Self {
        Self {
            raw_name: node.name.clone().unwrap_or_default(),
            numeric_slot: node.num.and_then(|n| u32::try_from(n).ok()),
            focused: node.contains_focused(),
            windows: node.leaves().into_iter().map(LiveWindow::from_node).collect(),
        }
    }
}

impl fmt::Display for LiveWorkspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.numeric_slot {
            Some(slot) => write!(f, "\"{}\" (#{})", self.raw_name, slot),
            None => write!(f, "\"{}\"", self.raw_name),
        }
    }
}

/// Окно внутри рабочего пространства
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiveWindow {
    pub con_id: i64,
    pub native_id: Option<u64>,
    pub pid: Option<u32>,
    pub title: Option<String>,
}

impl LiveWindow {
    pub fn new(con_id: i64) -> Self {
        Self {
            con_id,
            native_id: None,
            pid: None,
            title: None,
        }
    }

    #[allow(dead_code)]
    pub fn with_native_id(mut self, native_id: u64) -> Self {
        self.native_id = Some(native_id);
        self
    }

    #[allow(dead_code)]
    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }

    pub fn from_node(node: &Node) -> Self {
        Self {
            con_id: node.id,
            native_id: node.window,
            pid: node.pid,
            title: node.name.clone(),
        }
    }
}

impl fmt::Display for LiveWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.title, self.native_id) {
            (Some(title), Some(id)) => write!(f, "\"{}\" (0x{:x})", title, id),
            (Some(title), None) => write!(f, "\"{}\" (con {})", title, self.con_id),
            (None, Some(id)) => write!(f, "0x{:x}", id),
            (None, None) => write!(f, "con {}", self.con_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = r#"{
        "id": 1, "type": "root", "name": "root",
        "nodes": [
            {"id": 2, "type": "output", "name": "__i3", "nodes": [
                {"id": 3, "type": "con", "name": "content", "nodes": [
                    {"id": 4, "type": "workspace", "name": "__i3_scratch", "num": -1, "nodes": []}
                ]}
            ]},
            {"id": 10, "type": "output", "name": "eDP-1", "nodes": [
                {"id": 11, "type": "dockarea", "name": "topdock", "nodes": []},
                {"id": 12, "type": "con", "name": "content", "nodes": [
                    {"id": 20, "type": "workspace", "name": "1:www", "num": 1, "nodes": [
                        {"id": 21, "type": "con", "name": "Firefox", "window": 4194307, "nodes": []},
                        {"id": 22, "type": "con", "name": null, "layout": "splitv", "nodes": [
                            {"id": 23, "type": "con", "name": "htop", "window": 6291459, "focused": true, "nodes": []}
                        ]}
                    ], "floating_nodes": [
                        {"id": 24, "type": "floating_con", "name": "mpv", "pid": 777, "nodes": []}
                    ]},
                    {"id": 30, "type": "workspace", "name": "mail", "num": -1, "nodes": []}
                ]}
            ]}
        ]
    }"#;

    fn tree() -> Node {
        serde_json::from_str(TREE).unwrap()
    }

    #[test]
    fn test_workspaces_skip_scratchpad() {
        let tree = tree();
        let names: Vec<_> = tree
            .workspaces()
            .iter()
            .map(|ws| ws.name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["1:www", "mail"]);
    }

    #[test]
    fn test_live_workspace_from_node() {
        let tree = tree();
        let ws = LiveWorkspace::from_node(tree.focused_workspace().unwrap());

        assert_eq!(ws.raw_name, "1:www");
        assert_eq!(ws.numeric_slot, Some(1));
        assert!(ws.focused);

        let ids: Vec<_> = ws.windows.iter().map(|w| w.con_id).collect();
        assert_eq!(ids, vec![21, 23, 24]);
        assert_eq!(ws.windows[0].native_id, Some(4194307));
        assert_eq!(ws.windows[2].pid, Some(777));
    }

    #[test]
    fn test_unnumbered_workspace_has_no_slot() {
        let tree = tree();
        let mail = LiveWorkspace::from_node(tree.workspaces()[1]);
        assert_eq!(mail.numeric_slot, None);
        assert!(!mail.focused);
        assert!(mail.windows.is_empty());

        let reply: WorkspaceReply =
            serde_json::from_str(r#"{"num": -1, "name": "mail", "focused": false}"#).unwrap();
        assert_eq!(reply.slot(), None);
    }

    #[test]
    fn test_window_display() {
        let window = LiveWindow::new(5).with_native_id(0x40_0003);
        assert_eq!(window.to_string(), "0x400003");
    }
}
