use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "typer").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file, `$HOME/.local/state/typer` when HOME is set.
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("typer");
            Some(state_dir)
        } else {
            ProjectDirs::from("", "", "typer").map(|dirs| dirs.data_local_dir().to_path_buf())
        }
    }
}
