use crate::core::rates::{BASE_RATE, DEFAULT_DEDUCTION, OVERTIME_MULTIPLIER, REGULAR_HOURS};
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Where the calibration history lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Sqlite,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_storage")]
    pub storage: StorageKind,
    #[serde(default = "default_history_file")]
    pub history_file: String,
    #[serde(default = "default_base_rate")]
    pub base_rate: f64,
    #[serde(default = "default_overtime_multiplier")]
    pub overtime_multiplier: f64,
    #[serde(default = "default_regular_hours")]
    pub regular_hours: f64,
    #[serde(default = "default_deduction")]
    pub default_deduction: f64,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_storage() -> StorageKind {
    StorageKind::Sqlite
}
fn default_history_file() -> String {
    Config::history_file().to_string_lossy().to_string()
}
fn default_base_rate() -> f64 {
    BASE_RATE
}
fn default_overtime_multiplier() -> f64 {
    OVERTIME_MULTIPLIER
}
fn default_regular_hours() -> f64 {
    REGULAR_HOURS
}
fn default_deduction() -> f64 {
    DEFAULT_DEDUCTION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            storage: default_storage(),
            history_file: default_history_file(),
            base_rate: default_base_rate(),
            overtime_multiplier: default_overtime_multiplier(),
            regular_hours: default_regular_hours(),
            default_deduction: default_deduction(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rpaycheck")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rpaycheck")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rpaycheck.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rpaycheck.sqlite")
    }

    /// Return the default path of the JSON history record
    pub fn history_file() -> PathBuf {
        Self::config_dir().join("deduction_history.json")
    }

    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn history_file_path(&self) -> PathBuf {
        expand_tilde(&self.history_file)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {}", path.display(), e)))?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject pay constants that would make every estimate meaningless.
    pub fn validate(&self) -> AppResult<()> {
        let checks = [
            ("base_rate", self.base_rate),
            ("overtime_multiplier", self.overtime_multiplier),
            ("regular_hours", self.regular_hours),
            ("default_deduction", self.default_deduction),
        ];

        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::Config(format!(
                    "'{}' must be a non-negative number (found {})",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Initialize the configuration file.
    ///
    /// Returns the configuration that was written (or would have been, in
    /// test mode).
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let mut config = Config::default();

        // DB name: user provided or default, relative names live in the config dir
        if let Some(name) = custom_db {
            let p = expand_tilde(&name);
            let db_path = if p.is_absolute() { p } else { dir.join(p) };
            config.database = db_path.to_string_lossy().to_string();
        }

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("storage: json\nbase_rate: 15.0\n").unwrap();
        assert_eq!(cfg.storage, StorageKind::Json);
        assert_eq!(cfg.base_rate, 15.0);
        assert_eq!(cfg.overtime_multiplier, 1.5);
        assert_eq!(cfg.regular_hours, 80.0);
        assert_eq!(cfg.default_deduction, 0.8858);
        assert!(cfg.database.ends_with("rpaycheck.sqlite"));
    }

    #[test]
    fn negative_rates_are_rejected() {
        let cfg = Config {
            base_rate: -1.0,
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(AppError::Config(_))));
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn yaml_round_trip_keeps_storage_kind() {
        let cfg = Config {
            storage: StorageKind::Json,
            ..Config::default()
        };
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        assert!(yaml.contains("storage: json"));
    }
}
