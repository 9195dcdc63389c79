use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Профиль не найден: {0}")]
    ProfileNotFound(String),

    #[error("Не найдено ни одного рабочего пространства для сохранения")]
    NoWorkspacesFound,

    #[error("Нет свободных номеров рабочих пространств (1..={max})")]
    NoFreeSlot { max: u32 },

    #[error("Не удалось загрузить профили из {path:?}: {reason}")]
    StoreLoad { path: PathBuf, reason: String },

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка IPC оконного менеджера: {0}")]
    Ipc(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl LauncherError {
    pub fn store_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        LauncherError::StoreLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Код завершения процесса для данной ошибки
    pub fn exit_code(&self) -> u8 {
        match self {
            LauncherError::ProfileNotFound(_) => 2,
            LauncherError::NoWorkspacesFound => 3,
            LauncherError::NoFreeSlot { .. } => 4,
            LauncherError::StoreLoad { .. } => 5,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! launcher_error {
    (ipc, $($arg:tt)*) => {
        $crate::error::LauncherError::Ipc(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::LauncherError::Internal(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_for_user_errors() {
        let codes = [
            LauncherError::ProfileNotFound("www".into()).exit_code(),
            LauncherError::NoWorkspacesFound.exit_code(),
            LauncherError::NoFreeSlot { max: 9 }.exit_code(),
            LauncherError::store_load("/tmp/x.yaml", "bad yaml").exit_code(),
        ];

        assert_eq!(codes, [2, 3, 4, 5]);
        assert_eq!(launcher_error!(ipc, "boom {}", 1).exit_code(), 1);
    }
}
