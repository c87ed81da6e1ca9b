//! Ephemeral study session state.

use crate::types::CardId;
use serde::Serialize;

/// A run through one deck's due cards.
///
/// Holds the current card by id only; the store re-resolves it against the
/// live collection on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    deck: String,
    current: Option<CardId>,
    answer_shown: bool,
}

impl StudySession {
    pub fn new(deck: impl Into<String>, first: Option<CardId>) -> Self {
        Self {
            deck: deck.into(),
            current: first,
            answer_shown: false,
        }
    }

    pub fn deck(&self) -> &str {
        &self.deck
    }

    pub fn current(&self) -> Option<&CardId> {
        self.current.as_ref()
    }

    pub fn answer_shown(&self) -> bool {
        self.answer_shown
    }

    /// No current card left: the deck is caught up.
    pub fn is_complete(&self) -> bool {
        self.current.is_none()
    }

    pub fn is_presenting(&self, id: &CardId) -> bool {
        self.current.as_ref() == Some(id)
    }

    /// Show the answer of the current card. Returns whether anything changed.
    pub fn reveal(&mut self) -> bool {
        if self.current.is_none() || self.answer_shown {
            return false;
        }
        self.answer_shown = true;
        true
    }

    /// Move to `next` with its answer hidden.
    pub fn advance(&mut self, next: Option<CardId>) {
        self.current = next;
        self.answer_shown = false;
    }
}
