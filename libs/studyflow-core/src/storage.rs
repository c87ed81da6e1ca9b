//! Persistence of the card collection.
//!
//! The whole collection is stored as one JSON array under a fixed key and
//! rewritten after every mutation:
//! ```text
//! [{"id": "...", "front": "...", "back": "...", "deck": "...",
//!   "nextReview": 1700000000000, "interval": 1, "easeFactor": 2.5,
//!   "repetitions": 0, "createdAt": 1700000000000}]
//! ```

use crate::error::{Result, StorageError};
use crate::types::Card;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Key the card snapshot is stored under.
pub const STORAGE_KEY: &str = "studyflow_flashcards";

/// Byte store holding the serialized card snapshot.
pub trait Storage: Send {
    /// Read the stored snapshot, `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Overwrite the stored snapshot.
    fn save(&self, bytes: &[u8]) -> Result<()>;
}

/// Serialize a collection into the persisted layout.
pub fn encode_cards(cards: &[Card]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(cards)?)
}

/// Parse a persisted snapshot.
pub fn decode_cards(bytes: &[u8]) -> Result<Vec<Card>> {
    Ok(serde_json::from_slice(bytes)?)
}

#[derive(Debug, Default)]
struct MemorySlot {
    value: Option<Vec<u8>>,
    failing: bool,
    writes: usize,
}

/// In-memory storage. Clones share one slot, so a test can keep a handle
/// while the store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<MemorySlot>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with raw bytes.
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let storage = Self::default();
        storage.lock().value = Some(bytes.into());
        storage
    }

    /// Make every subsequent load and save fail.
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Raw stored bytes.
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.lock().value.clone()
    }

    /// Number of successful saves.
    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemorySlot> {
        // A poisoned slot still holds valid bytes.
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        let slot = self.lock();
        if slot.failing {
            return Err(StorageError::Unavailable("memory storage offline".to_string()));
        }
        Ok(slot.value.clone())
    }

    fn save(&self, bytes: &[u8]) -> Result<()> {
        let mut slot = self.lock();
        if slot.failing {
            return Err(StorageError::Unavailable("memory storage offline".to_string()));
        }
        slot.value = Some(bytes.to_vec());
        slot.writes += 1;
        Ok(())
    }
}

/// Snapshot kept in a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CardId;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn sample_cards() -> Vec<Card> {
        let t = Utc.timestamp_millis_opt(1_712_345_678_901).unwrap();
        vec![
            Card {
                id: CardId::from("a1b2c3d"),
                front: "H2O".to_string(),
                back: "Water".to_string(),
                deck: "Chemistry".to_string(),
                next_review: t,
                interval: 1,
                ease_factor: 2.5,
                repetitions: 0,
                created_at: t,
            },
            Card {
                id: CardId::generate(),
                front: "NaCl".to_string(),
                back: "Salt".to_string(),
                deck: "General".to_string(),
                next_review: t + chrono::Duration::days(16),
                interval: 16,
                ease_factor: 2.36,
                repetitions: 3,
                created_at: t,
            },
        ]
    }

    #[test]
    fn snapshot_round_trips_field_for_field() {
        let cards = sample_cards();
        let bytes = encode_cards(&cards).unwrap();
        assert_eq!(decode_cards(&bytes).unwrap(), cards);
    }

    #[test]
    fn decodes_snapshot_written_by_web_client() {
        let raw = r#"[{"id":"x7k2m9q","front":"Q","back":"A","deck":"General",
            "nextReview":1700000000000,"interval":6,"easeFactor":2.36,
            "repetitions":2,"createdAt":1699000000000}]"#;
        let cards = decode_cards(raw.as_bytes()).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id.as_str(), "x7k2m9q");
        assert_eq!(cards[0].interval, 6);
        assert_eq!(cards[0].next_review.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn decode_rejects_malformed_bytes() {
        assert!(matches!(decode_cards(b"{not json"), Err(StorageError::Json(_))));
    }

    #[test]
    fn memory_storage_clones_share_slot() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        assert_eq!(storage.load().unwrap(), None);
        storage.save(b"[]").unwrap();
        assert_eq!(handle.bytes(), Some(b"[]".to_vec()));
        assert_eq!(handle.writes(), 1);
    }

    #[test]
    fn failing_memory_storage_errors() {
        let storage = MemoryStorage::with_bytes("[]");
        storage.set_failing(true);
        assert!(matches!(storage.load(), Err(StorageError::Unavailable(_))));
        assert!(storage.save(b"[]").is_err());
        assert_eq!(storage.writes(), 0);
    }

    #[test]
    fn file_storage_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("cards.json"));
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn file_storage_creates_parent_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("cards.json"));
        storage.save(b"[1]").unwrap();
        storage.save(b"[]").unwrap();
        assert_eq!(storage.load().unwrap(), Some(b"[]".to_vec()));
    }
}
