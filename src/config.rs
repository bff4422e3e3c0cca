use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::analytics::DEFAULT_GOOD_SCORE_THRESHOLD;
use crate::quiz::choices::{DEFAULT_CHOICE_COUNT, MAX_CHOICE_COUNT, MIN_CHOICE_COUNT};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_choice_count")]
    pub choice_count: usize,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub word_list_path: Option<String>,
    #[serde(default = "default_good_score_threshold")]
    pub good_score_threshold: f64,
}

fn default_choice_count() -> usize {
    DEFAULT_CHOICE_COUNT
}
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vocabquiz")
        .to_string_lossy()
        .to_string()
}
fn default_good_score_threshold() -> f64 {
    DEFAULT_GOOD_SCORE_THRESHOLD
}

impl Default for Config {
    fn default() -> Self {
        Self {
            choice_count: default_choice_count(),
            data_dir: default_data_dir(),
            word_list_path: None,
            good_score_threshold: default_good_score_threshold(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.validate();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocabquiz")
            .join("config.toml")
    }

    /// Clamp values edited by hand into usable ranges.
    pub fn validate(&mut self) {
        self.choice_count = self.choice_count.clamp(MIN_CHOICE_COUNT, MAX_CHOICE_COUNT);
        if !self.good_score_threshold.is_finite() {
            self.good_score_threshold = default_good_score_threshold();
        }
        self.good_score_threshold = self.good_score_threshold.clamp(0.0, 100.0);
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}
