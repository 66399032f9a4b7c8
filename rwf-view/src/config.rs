//! View configuration.
//!
//! Loaded once from `rwf.toml` in the working directory, if present:
//!
//! ```toml
//! [view]
//! templates = "templates"
//! extension = "html"
//! cache_templates = true
//! ```
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use thiserror::Error;

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Error, Debug)]
pub enum Error {
    #[error("config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config file not found")]
    Io(#[from] std::io::Error),

    #[error("config not found")]
    NoConfig,
}

/// Global configuration.
#[derive(Debug, Clone)]
pub struct Config {
    path: Option<PathBuf>,
    pub tty: bool,
    pub view: View,
}

/// Where templates live and how they are executed.
#[derive(Debug, Clone)]
pub struct View {
    pub templates: PathBuf,
    pub extension: String,
    pub cache_templates: bool,
}

impl Default for View {
    fn default() -> Self {
        Self {
            templates: PathBuf::from(ViewConfig::default_templates()),
            extension: ViewConfig::default_extension(),
            cache_templates: ViewConfig::default_cache_templates(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: None,
            tty: std::io::stderr().is_terminal(),
            view: View::default(),
        }
    }
}

impl Config {
    /// Load configuration from `rwf.toml` or `Rwf.toml`, whichever is found first.
    pub fn load() -> Result<Config, Error> {
        for name in ["rwf.toml", "Rwf.toml"] {
            let path = PathBuf::from(name);
            if path.is_file() {
                return Config::from_file(&path);
            }
        }

        Err(Error::NoConfig)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config, Error> {
        let text = read_to_string(path.as_ref())?;
        let mut config = Config::from_str(&text)?;
        config.path = Some(path.as_ref().to_owned());

        Ok(config)
    }

    /// Parse configuration text.
    pub fn from_str(text: &str) -> Result<Config, Error> {
        let file: ConfigFile = toml::from_str(text)?;
        let mut config = Config::default();

        if let Some(view) = file.view {
            config.view = View {
                templates: PathBuf::from(view.templates),
                extension: view.extension,
                cache_templates: view.cache_templates,
            };
        }

        Ok(config)
    }

    /// The file this configuration was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get() -> &'static Config {
        get_config()
    }

    /// Log where the configuration came from.
    pub fn log_info(&self) {
        match self.path() {
            Some(path) => tracing::info!("Configuration loaded from \"{}\"", path.display()),
            None => tracing::info!("Configuration not found, using defaults"),
        }
    }
}

pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| Config::load().unwrap_or_default())
}

#[derive(Serialize, Deserialize)]
struct ConfigFile {
    view: Option<ViewConfig>,
}

#[derive(Serialize, Deserialize)]
struct ViewConfig {
    #[serde(default = "ViewConfig::default_templates")]
    templates: String,
    #[serde(default = "ViewConfig::default_extension")]
    extension: String,
    #[serde(default = "ViewConfig::default_cache_templates")]
    cache_templates: bool,
}

impl ViewConfig {
    fn default_templates() -> String {
        "templates".into()
    }

    fn default_extension() -> String {
        "html".into()
    }

    fn default_cache_templates() -> bool {
        #[cfg(debug_assertions)]
        return false;
        #[cfg(not(debug_assertions))]
        return true;
    }
}
