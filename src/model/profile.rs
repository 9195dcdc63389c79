use crate::error::{LauncherError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Текущая версия формата файла профилей
pub const STORE_VERSION: u32 = 1;

/// Направление разбиения контейнера при запуске профиля
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    Horizontal,
    Vertical,
}

impl SplitDirection {
    /// Команда layout оконного менеджера
    pub fn layout_command(self) -> &'static str {
        match self {
            SplitDirection::Horizontal => "layout splith",
            SplitDirection::Vertical => "layout splitv",
        }
    }
}

/// Сохранённый профиль рабочего пространства
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_start_exec: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitDirection>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on_start_exec: Vec::new(),
            split: None,
        }
    }

    #[allow(dead_code)]
    pub fn with_commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.on_start_exec = commands.into_iter().map(Into::into).collect();
        self
    }

    #[allow(dead_code)]
    pub fn with_split(mut self, split: SplitDirection) -> Self {
        self.split = Some(split);
        self
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} команд", self.name, self.on_start_exec.len())?;
        if let Some(split) = self.split {
            write!(f, ", {:?}", split)?;
        }
        write!(f, ")")
    }
}

/// Все сохранённые профили в порядке добавления
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileStore {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, rename = "workspaces")]
    pub profiles: Vec<Profile>,
}

fn default_version() -> u32 {
    STORE_VERSION
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            profiles: Vec::new(),
        }
    }
}

impl ProfileStore {
    /// Загрузить профили из файла. Отсутствующий файл даёт пустое хранилище.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Файл профилей {:?} не найден, используется пустое хранилище", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(LauncherError::store_load(path, e)),
        };

        Self::parse(&contents).map_err(|reason| LauncherError::store_load(path, reason))
    }

    /// Разобрать и проверить документ профилей
    pub fn parse(contents: &str) -> std::result::Result<Self, String> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let store: ProfileStore = serde_yaml::from_str(contents).map_err(|e| e.to_string())?;
        store.validate()?;
        Ok(store)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.version != STORE_VERSION {
            return Err(format!(
                "неподдерживаемая версия формата {} (ожидается {})",
                self.version, STORE_VERSION
            ));
        }

        // имена в файле уже канонические и повторно не нормализуются
        let mut seen = HashSet::new();
        for (i, profile) in self.profiles.iter().enumerate() {
            if profile.name.trim().is_empty() {
                return Err(format!("пустое имя профиля #{}", i + 1));
            }

            if !seen.insert(profile.name.clone()) {
                return Err(format!("повторяющееся имя профиля '{}'", profile.name));
            }
        }

        Ok(())
    }

    /// Сохранить профили: запись во временный файл рядом и переименование поверх
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| LauncherError::Internal(format!("Не удалось сериализовать профили: {}", e)))?;

        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        fs::write(&tmp_path, yaml)?;
        fs::rename(&tmp_path, path)?;

        info!("Профили сохранены в {:?} ({} шт.)", path, self.profiles.len());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Существующий профиль или новый пустой, добавленный в конец
    pub fn upsert(&mut self, name: &str) -> &mut Profile {
        let index = match self.profiles.iter().position(|p| p.name == name) {
            Some(index) => index,
            None => {
                debug!("Создаём новый профиль '{}'", name);
                self.profiles.push(Profile::new(name));
                self.profiles.len() - 1
            }
        };

        &mut self.profiles[index]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
