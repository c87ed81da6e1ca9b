//! Core types for the flashcard scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Deck assigned to cards created or edited without one.
pub const DEFAULT_DECK: &str = "General";

/// Interval (in days) at which a card counts as mastered.
pub const MASTERY_INTERVAL_DAYS: u32 = 21;

/// Opaque card identifier.
///
/// New ids are random UUIDs. Ids loaded from storage are kept verbatim, so
/// snapshots written by older clients with shorter ids still resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Self-assessed recall quality, 0 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// No recall at all.
    Blackout,
    /// Wrong, but the answer was recognized once shown.
    Incorrect,
    /// Wrong, but the answer felt familiar.
    Familiar,
    /// Correct with serious difficulty.
    Difficult,
    /// Correct after hesitation.
    Hesitant,
    /// Perfect recall.
    Perfect,
}

impl Quality {
    /// Numeric grade (0-5).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Blackout => 0,
            Self::Incorrect => 1,
            Self::Familiar => 2,
            Self::Difficult => 3,
            Self::Hesitant => 4,
            Self::Perfect => 5,
        }
    }

    /// Create from a numeric grade. Values above 5 are rejected.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Blackout),
            1 => Some(Self::Incorrect),
            2 => Some(Self::Familiar),
            3 => Some(Self::Difficult),
            4 => Some(Self::Hesitant),
            5 => Some(Self::Perfect),
            _ => None,
        }
    }

    /// Grades of 3 and above count as a successful recall.
    pub fn is_pass(self) -> bool {
        self.to_value() >= 3
    }
}

/// Scheduling fields of a card, as consumed and produced by an algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewState {
    pub interval: u32,
    pub ease_factor: f64,
    pub repetitions: u32,
}

/// A single question/answer pair with its review schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub front: String,
    pub back: String,
    pub deck: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub next_review: DateTime<Utc>,
    pub interval: u32,
    pub ease_factor: f64,
    pub repetitions: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Card {
    pub fn review_state(&self) -> ReviewState {
        ReviewState {
            interval: self.interval,
            ease_factor: self.ease_factor,
            repetitions: self.repetitions,
        }
    }

    /// Due once `next_review` is at or before `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }

    pub fn is_mastered(&self) -> bool {
        self.interval >= MASTERY_INTERVAL_DAYS
    }
}

/// Deck with card counts. Derived from the cards, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub name: String,
    pub card_count: usize,
    pub due_count: usize,
}

/// Collection-wide counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalStats {
    pub total_cards: usize,
    pub due_cards: usize,
    pub mastered_cards: usize,
}

/// Trim a deck name, falling back to [`DEFAULT_DECK`] when blank.
pub fn normalize_deck(deck: Option<&str>) -> String {
    match deck.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_DECK.to_string(),
    }
}
