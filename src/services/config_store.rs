// Configuration Storage Service
// Handles config file read/write and version backup

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::DEFAULT_MAX_INPUT_CHARS;
use crate::services::detection::classifier::{
    WeightProfile, DEFAULT_LINGUISTIC_WEIGHT, DEFAULT_PATTERN_WEIGHT, DEFAULT_STRUCTURAL_WEIGHT,
};
use crate::services::detection::sensitivity::DetectionSensitivity;

const BACKUPS_TO_KEEP: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

fn io_err<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(std::io::Error) -> ConfigError + 'a {
    move |source| ConfigError::Io {
        action,
        path: path.to_path_buf(),
        source,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub detection: DetectionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            detection: DetectionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionConfig {
    #[serde(default)]
    pub sensitivity: DetectionSensitivity,
    #[serde(default = "default_pattern_weight")]
    pub pattern_weight: f64,
    #[serde(default = "default_linguistic_weight")]
    pub linguistic_weight: f64,
    #[serde(default = "default_structural_weight")]
    pub structural_weight: f64,
    /// Overrides the sensitivity threshold when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            sensitivity: DetectionSensitivity::Medium,
            pattern_weight: DEFAULT_PATTERN_WEIGHT,
            linguistic_weight: DEFAULT_LINGUISTIC_WEIGHT,
            structural_weight: DEFAULT_STRUCTURAL_WEIGHT,
            threshold: None,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

impl DetectionConfig {
    pub fn weight_profile(&self) -> WeightProfile {
        WeightProfile {
            pattern: self.pattern_weight,
            linguistic: self.linguistic_weight,
            structural: self.structural_weight,
            threshold: self
                .threshold
                .unwrap_or_else(|| self.sensitivity.decision_threshold()),
        }
    }
}

fn default_version() -> String { env!("CARGO_PKG_VERSION").to_string() }
fn default_pattern_weight() -> f64 { DEFAULT_PATTERN_WEIGHT }
fn default_linguistic_weight() -> f64 { DEFAULT_LINGUISTIC_WEIGHT }
fn default_structural_weight() -> f64 { DEFAULT_STRUCTURAL_WEIGHT }
fn default_max_input_chars() -> usize { DEFAULT_MAX_INPUT_CHARS }

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("aidetect"))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_dir).map_err(io_err("create", &self.config_dir))
    }

    /// Load configuration; a missing file yields the defaults.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file).map_err(io_err("read", &self.config_file))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        self.ensure_dir()?;

        // Create backup if file exists
        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_file, content).map_err(io_err("write", &self.config_file))
    }

    fn create_backup(&self) -> Result<(), ConfigError> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir).map_err(io_err("create", &backup_dir))?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S%.3f");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file).map_err(io_err("back up", &self.config_file))?;

        self.cleanup_old_backups(&backup_dir, BACKUPS_TO_KEEP)
    }

    /// Remove old backups, keeping only the most recent N
    fn cleanup_old_backups(&self, backup_dir: &Path, keep: usize) -> Result<(), ConfigError> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)
            .map_err(io_err("read", backup_dir))?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Names carry the timestamp, so lexical order is chronological.
        entries.sort_by_key(|e| e.file_name());

        for entry in entries.iter().take(entries.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (ConfigStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("aidetect-config-{}", uuid::Uuid::new_v4()));
        (ConfigStore::new(dir.clone()), dir)
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.detection.sensitivity, DetectionSensitivity::Medium);
        assert_eq!(config.detection.max_input_chars, 50_000);
        assert_eq!(config.detection.weight_profile(), WeightProfile::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{"detection": {"sensitivity": "high", "patternWeight": 0.5}}"#).unwrap();
        let profile = parsed.detection.weight_profile();
        assert_eq!(profile.pattern, 0.5);
        assert_eq!(profile.linguistic, DEFAULT_LINGUISTIC_WEIGHT);
        assert_eq!(profile.threshold, 0.5);
    }

    #[test]
    fn test_threshold_override_wins() {
        let config = DetectionConfig {
            sensitivity: DetectionSensitivity::Low,
            threshold: Some(0.65),
            ..DetectionConfig::default()
        };
        assert_eq!(config.weight_profile().threshold, 0.65);
    }

    #[test]
    fn test_load_missing_returns_default() {
        let (store, _dir) = temp_store();
        let config = store.load().unwrap();
        assert_eq!(config.detection.max_input_chars, DEFAULT_MAX_INPUT_CHARS);
    }

    #[test]
    fn test_save_roundtrip_and_backup() {
        let (store, dir) = temp_store();
        let mut config = AppConfig::default();
        config.detection.threshold = Some(0.7);
        store.save(&config).unwrap();
        config.detection.max_input_chars = 1000;
        store.save(&config).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.detection.threshold, Some(0.7));
        assert_eq!(loaded.detection.max_input_chars, 1000);
        assert_eq!(fs::read_dir(dir.join("backups")).unwrap().count(), 1);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_unreadable_config_is_an_io_error() {
        let (store, dir) = temp_store();
        // A directory where the file should be cannot be read as text.
        fs::create_dir_all(store.config_file()).unwrap();
        match store.load() {
            Err(ConfigError::Io { action, path, .. }) => {
                assert_eq!(action, "read");
                assert_eq!(path, store.config_file());
            }
            other => panic!("expected io error, got {other:?}"),
        }
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let (store, dir) = temp_store();
        store.ensure_dir().unwrap();
        fs::write(store.config_file(), "{not json").unwrap();
        assert!(matches!(store.load(), Err(ConfigError::Parse(_))));
        let _ = fs::remove_dir_all(dir);
    }
}
