//! Application state.

use crate::commands::CommandError;
use crate::config::{Config, StorageBackend};
use crate::db::{DbError, SqliteStorage};
use std::sync::{Mutex, MutexGuard};
use studyflow_core::{get_algorithm, CardStore, FileStorage, MemoryStorage, SystemClock};

/// Global application state.
pub struct AppState {
    store: Mutex<CardStore>,
}

impl AppState {
    pub fn new(store: CardStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Open the configured storage backend and load the card store.
    pub fn from_config(config: &Config) -> Result<Self, DbError> {
        let algorithm = get_algorithm(&config.algorithm)
            .ok_or_else(|| DbError::InvalidData(format!("unknown algorithm {}", config.algorithm)))?;

        let store = match config.storage {
            StorageBackend::Sqlite => {
                if let Some(parent) = config.data_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let storage = SqliteStorage::open(&config.data_path)?;
                CardStore::open_with(storage, SystemClock, algorithm)
            }
            StorageBackend::File => {
                CardStore::open_with(FileStorage::new(&config.data_path), SystemClock, algorithm)
            }
            StorageBackend::Memory => CardStore::open_with(MemoryStorage::new(), SystemClock, algorithm),
        };
        Ok(Self::new(store))
    }

    pub fn store(&self) -> Result<MutexGuard<'_, CardStore>, CommandError> {
        self.store.lock().map_err(|_| CommandError {
            message: "card store lock poisoned".to_string(),
        })
    }
}
