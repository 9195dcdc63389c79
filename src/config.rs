use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub wm: WmConfig,
    pub store: StoreConfig,
    pub launch: LaunchConfig,
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WmConfig {
    /// "i3" или "sway"
    pub backend: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Путь к файлу профилей; по умолчанию ~/.config/i3/i3-launcher.yaml
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LaunchConfig {
    /// Пауза после каждой команды exec, чтобы окно успело появиться в нужном workspace
    pub exec_delay_ms: u64,
    pub rename_workspace: bool,
    pub max_slot: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchConfig {
    pub polling_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "compact".to_string(),
            },
            wm: WmConfig {
                backend: "i3".to_string(),
            },
            store: StoreConfig { path: None },
            launch: LaunchConfig {
                exec_delay_ms: 200,
                rename_workspace: true,
                max_slot: 9,
            },
            watch: WatchConfig {
                polling_interval_ms: 2000,
            },
        }
    }
}

impl Config {
    /// Путь к файлу настроек по умолчанию: ~/.config/i3-launcher/config.toml
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("i3-launcher")
            .join("config.toml")
    }

    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("I3_LAUNCHER_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "compact" | "full" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        match self.wm.backend.as_str() {
            "i3" | "sway" => {}
            _ => anyhow::bail!("Неизвестный оконный менеджер: {}", self.wm.backend),
        }

        if !(1..=99).contains(&self.launch.max_slot) {
            anyhow::bail!("max_slot должно быть в диапазоне 1..=99");
        }

        if self.watch.polling_interval_ms < 100 {
            anyhow::bail!("polling_interval_ms должно быть минимум 100");
        }

        Ok(())
    }

    /// Файл профилей: явно заданный или ~/.config/i3/i3-launcher.yaml
    pub fn store_path(&self) -> PathBuf {
        match &self.store.path {
            Some(path) => expand_path(path),
            None => dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("i3")
                .join("i3-launcher.yaml"),
        }
    }

    pub fn exec_delay(&self) -> Duration {
        Duration::from_millis(self.launch.exec_delay_ms)
    }

    pub fn polling_interval(&self) -> Duration {
        Duration::from_millis(self.watch.polling_interval_ms)
    }

    /// Имя утилиты IPC для выбранного оконного менеджера
    pub fn msg_binary(&self) -> &'static str {
        match self.wm.backend.as_str() {
            "sway" => "swaymsg",
            _ => "i3-msg",
        }
    }
}

fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(raw) => PathBuf::from(crate::utils::expand::expand_command(raw)),
        None => path.to_path_buf(),
    }
}
