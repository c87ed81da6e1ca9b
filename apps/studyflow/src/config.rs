//! Runtime configuration read from the environment (and `.env`).
//!
//! - `STUDYFLOW_STORAGE`: `sqlite` (default), `file` or `memory`
//! - `STUDYFLOW_DATA_PATH`: database or JSON file location
//! - `STUDYFLOW_ALGORITHM`: scheduling algorithm, `sm2` (default)

use std::path::PathBuf;
use std::str::FromStr;
use studyflow_core::get_algorithm;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown storage backend: {0}")]
    UnknownBackend(String),

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Where the card snapshot lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    File,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "file" | "json" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub storage: StorageBackend,
    pub data_path: PathBuf,
    pub algorithm: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage = match lookup("STUDYFLOW_STORAGE") {
            Some(value) => value.parse()?,
            None => StorageBackend::Sqlite,
        };

        let data_path = lookup("STUDYFLOW_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_data_path(storage));

        let algorithm = lookup("STUDYFLOW_ALGORITHM").unwrap_or_else(|| "sm2".to_string());
        if get_algorithm(&algorithm).is_none() {
            return Err(ConfigError::UnknownAlgorithm(algorithm));
        }

        Ok(Self {
            storage,
            data_path,
            algorithm,
        })
    }
}

fn default_data_path(storage: StorageBackend) -> PathBuf {
    let file_name = match storage {
        StorageBackend::File => "flashcards.json",
        StorageBackend::Sqlite | StorageBackend::Memory => "studyflow.db",
    };
    // Use app data directory for production, fallback to current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("studyflow")
        .join(file_name)
}
