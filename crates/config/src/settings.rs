// Application settings
// Loaded from ~/.config/csvedit/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// UI language preference. Unknown values read back as English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Language {
    #[default]
    En,
    Ko,
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        match code.as_str() {
            "ko" => Language::Ko,
            _ => Language::En,
        }
    }
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ko => "ko",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "language")]
    pub language: Language,

    // Undo depth
    #[serde(rename = "history.limit")]
    pub history_limit: usize,

    // Pagination
    #[serde(rename = "view.rowsPerPage")]
    pub rows_per_page: usize,

    // Delay before comparing against the loaded file
    #[serde(rename = "editor.dirtyCheckDelayMs")]
    pub dirty_check_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::En,
            history_limit: 50,
            rows_per_page: 1000,
            dirty_check_delay_ms: 500,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("csvedit");
        config_dir.join("settings.json")
    }

    /// Load settings from the platform config dir, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`. A missing or unreadable file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                // Strip comments (lines starting with //)
                let cleaned: String = contents
                    .lines()
                    .filter(|line| !line.trim().starts_with("//"))
                    .collect::<Vec<_>>()
                    .join("\n");

                match serde_json::from_str(&cleaned) {
                    Ok(settings) => settings,
                    Err(e) => {
                        log::warn!("Error parsing {}: {}; using default settings", path.display(), e);
                        Self::default()
                    }
                }
            }
            Err(e) => {
                log::warn!("Error reading {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save current settings to the platform config dir
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Change the language and persist immediately.
    pub fn set_language(&mut self, language: Language, path: &Path) -> Result<(), String> {
        if self.language == language {
            return Ok(());
        }
        self.language = language;
        self.save_to(path)
    }
}
