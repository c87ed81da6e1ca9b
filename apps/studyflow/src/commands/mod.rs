//! Commands exposed to the presentation layer.
//!
//! The commands are the caller the core trusts: they reject blank card text
//! and out-of-range grades before touching the store.

pub mod card;
pub mod deck;
pub mod stats;
pub mod study;

pub use card::{add_card, begin_edit, cancel_edit, delete_card, editing_card, update_card};
pub use deck::{cards_by_deck, delete_deck, list_decks};
pub use stats::{due_cards, total_stats};
pub use study::{current_card, end_study, grade_card, reveal_answer, start_study};

#[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
