//! Deck-related commands.

use super::CommandError;
use crate::state::AppState;
use studyflow_core::{Card, Deck};

#[derive(Debug, serde::Serialize)]
pub struct DeleteDeckResult {
    pub deck: String,
    pub removed: usize,
}

/// List all decks with card and due counts.
pub fn list_decks(state: &AppState) -> Result<Vec<Deck>, CommandError> {
    Ok(state.store()?.decks())
}

pub fn cards_by_deck(deck: String, state: &AppState) -> Result<Vec<Card>, CommandError> {
    let store = state.store()?;
    Ok(store.cards_by_deck(&deck).into_iter().cloned().collect())
}

/// Delete a deck and every card in it.
pub fn delete_deck(deck: String, state: &AppState) -> Result<DeleteDeckResult, CommandError> {
    let removed = state.store()?.delete_deck(&deck);
    tracing::info!(deck = %deck, removed, "deck deleted");
    Ok(DeleteDeckResult { deck, removed })
}
