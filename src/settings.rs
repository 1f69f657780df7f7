use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::panel::{PanelConfig, store::write_atomically};

const DEFAULT_STORAGE_KEY: &str = "task-panel-width";
const MIN_MIN_WIDTH: u32 = 10;
const MAX_MIN_WIDTH: u32 = 200;
const DEFAULT_MIN_WIDTH: u32 = 30;
const MAX_DEFAULT_WIDTH: u32 = 400;
const DEFAULT_DEFAULT_WIDTH: u32 = 60;
const MIN_SIDE_BY_SIDE_WIDTH: u16 = 40;
const MAX_SIDE_BY_SIDE_WIDTH: u16 = 1_000;
const DEFAULT_SIDE_BY_SIDE_WIDTH: u16 = 80;

/// Host settings. Widths are terminal cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub min_width: u32,
    pub default_width: u32,
    pub storage_key: String,
    pub side_by_side_min_width: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            default_width: DEFAULT_DEFAULT_WIDTH,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            side_by_side_min_width: DEFAULT_SIDE_BY_SIDE_WIDTH,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("kanban-panel");
        path.push("settings.toml");
        Some(path)
    }

    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(mut settings) => {
                    settings.validate();
                    settings
                }
                Err(error) => {
                    warn!(
                        "failed to parse settings config '{}': {}",
                        path.display(),
                        error
                    );
                    Self::default()
                }
            },
            Err(error) => {
                warn!(
                    "failed to read settings config '{}': {}",
                    path.display(),
                    error
                );
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = Self::config_path().ok_or_else(|| anyhow!("unable to determine config path"))?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> anyhow::Result<()> {
        let contents = self.to_toml()?;
        write_atomically(path, &contents)
            .with_context(|| format!("failed to save settings to '{}'", path.display()))
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        let mut validated = self.clone();
        validated.validate();
        toml::to_string_pretty(&validated).context("failed to serialize settings to TOML")
    }

    pub fn panel_config(&self) -> PanelConfig {
        PanelConfig {
            min_width: self.min_width,
            default_width: self.default_width,
            storage_key: self.storage_key.clone(),
        }
    }

    fn validate(&mut self) {
        self.min_width = self.min_width.clamp(MIN_MIN_WIDTH, MAX_MIN_WIDTH);
        self.default_width = self.default_width.clamp(self.min_width, MAX_DEFAULT_WIDTH);
        self.side_by_side_min_width = self
            .side_by_side_min_width
            .clamp(MIN_SIDE_BY_SIDE_WIDTH, MAX_SIDE_BY_SIDE_WIDTH);

        let key = self.storage_key.trim();
        if key.is_empty() {
            warn!("empty storage_key in settings config; falling back to default");
            self.storage_key = DEFAULT_STORAGE_KEY.to_string();
        } else if key.len() != self.storage_key.len() {
            self.storage_key = key.to_string();
        }
    }
}
