use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::layout::DEFAULT_MAX_LINE_WIDTH;
use crate::theme::ThemeChoice;

pub const DEFAULT_NUMBER_OF_WORDS: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub number_of_words: usize,
    pub theme: ThemeChoice,
    /// external newline-separated word list; the bundled list when unset
    pub word_list: Option<PathBuf>,
    pub max_line_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            number_of_words: DEFAULT_NUMBER_OF_WORDS,
            theme: ThemeChoice::Monokai,
            word_list: None,
            max_line_width: DEFAULT_MAX_LINE_WIDTH,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("typer_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let mut cfg = match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice::<Config>(&bytes).unwrap_or_else(|e| {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "ignoring malformed config"
                );
                Config::default()
            }),
            Err(_) => Config::default(),
        };
        if cfg.number_of_words == 0 {
            tracing::warn!(
                path = %self.path.display(),
                default = DEFAULT_NUMBER_OF_WORDS,
                "number_of_words must be positive, using default"
            );
            cfg.number_of_words = DEFAULT_NUMBER_OF_WORDS;
        }
        cfg
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
