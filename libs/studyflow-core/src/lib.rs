//! Flashcard scheduling core for StudyFlow.
//!
//! Provides:
//! - Card, deck and quality types with the persisted JSON layout
//! - SM-2 spaced repetition scheduling
//! - The card store with due queues, stats and the study session
//! - Storage abstraction with in-memory and file backends

pub mod algorithm;
pub mod clock;
pub mod error;
pub mod session;
pub mod storage;
pub mod store;
pub mod types;

pub use algorithm::{get_algorithm, SchedulingResult, SpacedRepetitionAlgorithm};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, StorageError};
pub use session::StudySession;
pub use storage::{decode_cards, encode_cards, FileStorage, MemoryStorage, Storage, STORAGE_KEY};
pub use store::CardStore;
pub use types::{
    normalize_deck, Card, CardId, Deck, Quality, ReviewState, TotalStats, DEFAULT_DECK,
    MASTERY_INTERVAL_DAYS,
};
