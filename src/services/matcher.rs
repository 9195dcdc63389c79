use crate::error::{LauncherError, Result};
use crate::model::LiveWorkspace;
use crate::services::window_manager::WindowManager;
use crate::utils::normalize;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::debug;

/// Сопоставляет профили с живыми рабочими пространствами и выделяет номера
pub struct WorkspaceMatcher {
    wm: Arc<dyn WindowManager>,
    max_slot: u32,
}

/// Наименьший свободный номер в диапазоне 1..=max_slot
pub fn smallest_free_slot(occupied: &[u32], max_slot: u32) -> Option<u32> {
    (1..=max_slot).find(|slot| !occupied.contains(slot))
}

impl WorkspaceMatcher {
    pub fn new(wm: Arc<dyn WindowManager>, max_slot: u32) -> Self {
        Self { wm, max_slot }
    }

    /// Первое живое рабочее пространство, чьё каноническое имя совпадает с профилем
    pub async fn find_live_workspace_for(&self, profile_name: &str) -> Result<Option<LiveWorkspace>> {
        let found = self
            .wm
            .live_workspaces()
            .await?
            .into_iter()
            .find(|ws| normalize(&ws.raw_name) == profile_name);

        debug!("Профиль '{}' -> {:?}", profile_name, found.as_ref().map(|ws| &ws.raw_name));
        Ok(found)
    }

    pub async fn focused_workspace(&self) -> Result<Option<LiveWorkspace>> {
        self.wm.focused_workspace().await
    }

    pub async fn next_free_slot(&self) -> Result<u32> {
        let occupied: SmallVec<[u32; 16]> = self
            .wm
            .get_workspaces()
            .await?
            .iter()
            .filter_map(|ws| ws.slot())
            .collect();

        smallest_free_slot(&occupied, self.max_slot).ok_or(LauncherError::NoFreeSlot {
            max: self.max_slot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::FakeWindowManager;

    #[test]
    fn test_smallest_free_slot() {
        assert_eq!(smallest_free_slot(&[1, 2, 4], 9), Some(3));
        assert_eq!(smallest_free_slot(&[], 9), Some(1));
        assert_eq!(smallest_free_slot(&[2, 3], 9), Some(1));
        assert_eq!(smallest_free_slot(&[1, 2, 3, 4, 5, 6, 7, 8, 9], 9), None);
        assert_eq!(smallest_free_slot(&[1, 2, 3, 4, 5, 6, 7, 8, 9], 12), Some(10));
    }

    #[tokio::test]
    async fn test_next_free_slot_over_live_workspaces() {
        let wm = FakeWindowManager::new()
            .with_workspace("1:www", vec![])
            .with_workspace("2 mail", vec![])
            .with_workspace("4-dev", vec![])
            .with_workspace("chat", vec![]);

        let matcher = WorkspaceMatcher::new(Arc::new(wm), 9);
        assert_eq!(matcher.next_free_slot().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_all_slots_taken() {
        let mut wm = FakeWindowManager::new();
        for slot in 1..=9 {
            wm = wm.with_workspace(&slot.to_string(), vec![]);
        }

        let matcher = WorkspaceMatcher::new(Arc::new(wm), 9);
        assert!(matches!(
            matcher.next_free_slot().await,
            Err(LauncherError::NoFreeSlot { max: 9 })
        ));
    }

    #[tokio::test]
    async fn test_find_by_canonical_name() {
        let wm = FakeWindowManager::new()
            .with_workspace("1:mail", vec![])
            .with_workspace("3 www", vec![])
            .with_workspace("5:www", vec![]);

        let matcher = WorkspaceMatcher::new(Arc::new(wm), 9);

        let found = matcher.find_live_workspace_for("www").await.unwrap().unwrap();
        assert_eq!(found.raw_name, "3 www");
        assert_eq!(found.numeric_slot, Some(3));

        assert!(matcher.find_live_workspace_for("chat").await.unwrap().is_none());
    }
}
