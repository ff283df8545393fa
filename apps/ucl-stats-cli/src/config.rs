use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use ucl_stats_csvs::{ReadOptions, DEFAULT_NULL_MARKERS};

/// Looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "ucl-stats.yaml";

/// Application configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Directory scanned for `*.csv` files
    #[serde(default = "default_csv_dir")]
    pub csv_dir: PathBuf,

    /// Directory receiving query extracts and charts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Rows shown per file by `preview`
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,

    /// Field values loaded as NULL
    #[serde(default = "default_null_markers")]
    pub null_markers: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            csv_dir: default_csv_dir(),
            output_dir: default_output_dir(),
            database_path: default_database_path(),
            log_level: default_log_level(),
            preview_rows: default_preview_rows(),
            null_markers: default_null_markers(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if present, else defaults
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Err(CliError::InvalidConfig(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> CliResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.preview_rows == 0 {
            return Err(CliError::InvalidConfig(
                "preview_rows must be at least 1".to_string(),
            ));
        }
        if self.database_path.as_os_str().is_empty() {
            return Err(CliError::InvalidConfig(
                "database_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            null_markers: self.null_markers.clone(),
        }
    }

    /// Apply command-line overrides on top of file values
    pub fn override_with(
        &mut self,
        csv_dir: Option<PathBuf>,
        database: Option<PathBuf>,
        output_dir: Option<PathBuf>,
    ) {
        if let Some(csv_dir) = csv_dir {
            self.csv_dir = csv_dir;
        }
        if let Some(database) = database {
            self.database_path = database;
        }
        if let Some(output_dir) = output_dir {
            self.output_dir = output_dir;
        }
    }
}

fn default_csv_dir() -> PathBuf {
    PathBuf::from("csv")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("charts")
}

fn default_database_path() -> PathBuf {
    PathBuf::from("uefa_champions_league_2025.db")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_preview_rows() -> usize {
    5
}

fn default_null_markers() -> Vec<String> {
    DEFAULT_NULL_MARKERS.iter().map(|m| m.to_string()).collect()
}
