//! TOML-based editor configuration.
//!
//! Stores editor preferences including:
//! - Grid resolution, visible span and window-size policy
//! - Start of week and day header labels
//! - Lane layout
//!
//! Configuration is read from `~/.config/openhours/config.toml`. The core
//! never writes it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::engine::{EngineConfig, IntervalEngine};
use crate::error::ConfigError;
use crate::lane::{LaneGeometry, LaneLayout};
use crate::slots::SlotConfig;
use crate::week::{DayLabels, DayOfWeek};

/// Week presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekConfig {
    #[serde(default = "default_start_of_week")]
    pub start_of_week: DayOfWeek,
    #[serde(default)]
    pub day_labels: DayLabels,
}

fn default_start_of_week() -> DayOfWeek {
    DayOfWeek::Monday
}

impl Default for WeekConfig {
    fn default() -> Self {
        Self {
            start_of_week: default_start_of_week(),
            day_labels: DayLabels::default(),
        }
    }
}

impl WeekConfig {
    /// Days in display order.
    pub fn display_order(&self) -> [DayOfWeek; 7] {
        DayOfWeek::rotated(self.start_of_week)
    }
}

/// Editor configuration.
///
/// Serialized to/from TOML at `~/.config/openhours/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub grid: EngineConfig,
    #[serde(default)]
    pub week: WeekConfig,
    #[serde(default)]
    pub layout: LaneLayout,
}

/// Returns `~/.config/openhours[-dev]/` based on OPENHOURS_ENV.
///
/// Set OPENHOURS_ENV=dev to use the development directory.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?.join(".config");

    let env = std::env::var("OPENHOURS_ENV").unwrap_or_else(|_| "production".to_string());

    Ok(if env == "dev" {
        base_dir.join("openhours-dev")
    } else {
        base_dir.join("openhours")
    })
}

impl EditorConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::MissingKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        if let Some(parent) = parent {
            for part in parent.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let new_value = match obj.get(leaf) {
            Some(serde_json::Value::Bool(_)) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            Some(serde_json::Value::Number(_)) => {
                if let Ok(n) = value.parse::<u64>() {
                    serde_json::Value::Number(n.into())
                } else if let Ok(n) = value.parse::<f64>() {
                    serde_json::Number::from_f64(n)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                } else {
                    return Err(invalid(format!("cannot parse '{value}' as number")));
                }
            }
            Some(serde_json::Value::Object(_)) | Some(serde_json::Value::Array(_)) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            Some(_) => serde_json::Value::String(value.into()),
            // Free-form maps such as week.day_labels accept new keys.
            None if parent.is_some() && leaf_is_open_map(key) => {
                serde_json::Value::String(value.into())
            }
            None => return Err(unknown()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the default location, or defaults if there is no file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// holds values that fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate the file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let cfg: EditorConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        if let Some(key) = self.week.day_labels.unknown_keys().first() {
            return Err(ConfigError::InvalidValue {
                key: format!("week.day_labels.{key}"),
                message: "not a day of the week".to_string(),
            });
        }
        if !(self.layout.px_per_minute.is_finite() && self.layout.px_per_minute > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "layout.px_per_minute".to_string(),
                message: "must be a positive number".to_string(),
            });
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting configuration fails validation. On error `self` is
    /// left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let next: EditorConfig = serde_json::from_value(json).map_err(|e| {
            ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;
        next.validate()?;
        *self = next;
        Ok(())
    }

    pub fn engine(&self) -> IntervalEngine {
        IntervalEngine::new(self.grid)
    }

    pub fn slot_config(&self) -> SlotConfig {
        self.grid.into()
    }

    pub fn lane(&self) -> LaneGeometry {
        LaneGeometry::new(self.layout, &self.grid)
    }
}

fn leaf_is_open_map(key: &str) -> bool {
    key.starts_with("week.day_labels.")
}
