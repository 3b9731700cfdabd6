use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub xinput: XinputConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Файл журнала; терминал занят интерфейсом, поэтому в stderr не пишем
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct XinputConfig {
    pub binary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub hide_prop_ids: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                file: None,
            },
            xinput: XinputConfig {
                binary: "xinput".to_string(),
            },
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        // Отсутствующий файл не ошибка: берём значения по умолчанию
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("XINPUT_TUI_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    /// Путь к xinput из командной строки важнее файла и переменных окружения
    pub fn override_binary(&mut self, binary: Option<&str>) {
        if let Some(binary) = binary {
            debug!("xinput.binary переопределён аргументом: {}", binary);
            self.xinput.binary = binary.to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        if self.xinput.binary.trim().is_empty() {
            anyhow::bail!("xinput.binary не может быть пустым");
        }

        Ok(())
    }

    /// Путь к файлу журнала: из конфигурации, иначе `$XDG_STATE_HOME`, иначе временный каталог
    pub fn log_file(&self) -> PathBuf {
        if let Some(file) = &self.logging.file {
            return file.clone();
        }

        let dir = std::env::var_os("XDG_STATE_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/state")))
            .filter(|dir| dir.is_dir())
            .unwrap_or_else(std::env::temp_dir);

        dir.join("xinput-tui.log")
    }

    /// Сохранить секцию `display` в файл, не трогая остальное содержимое
    pub fn save_display<P: AsRef<Path>>(&self, config_path: P) -> Result<()> {
        let config_path = config_path.as_ref();

        let mut document: toml::Table = if config_path.exists() {
            let raw = fs::read_to_string(config_path)
                .with_context(|| format!("Не удалось прочитать {:?}", config_path))?;
            raw.parse()
                .with_context(|| format!("Файл {:?} не является корректным TOML", config_path))?
        } else {
            toml::Table::new()
        };

        let display = toml::Value::try_from(&self.display)
            .context("Не удалось сериализовать настройки отображения")?;
        document.insert("display".to_string(), display);

        let serialized = toml::to_string_pretty(&document)
            .context("Не удалось сериализовать конфигурацию")?;

        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Не удалось создать каталог {:?}", parent))?;
        }

        fs::write(config_path, serialized)
            .with_context(|| format!("Не удалось записать {:?}", config_path))?;

        debug!("Секция display записана: {:?}", self.display);
        info!("Настройки сохранены в {:?}", config_path);
        Ok(())
    }
}
