//! Card editing commands.

use super::CommandError;
use crate::state::AppState;
use studyflow_core::{Card, CardId};

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CardInput {
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub deck: Option<String>,
}

impl CardInput {
    fn validate(&self) -> Result<(), CommandError> {
        if self.front.trim().is_empty() || self.back.trim().is_empty() {
            return Err(CommandError::invalid("front and back are required"));
        }
        Ok(())
    }
}

/// Create a card in the given deck (or "General").
pub fn add_card(input: CardInput, state: &AppState) -> Result<Card, CommandError> {
    input.validate()?;
    let mut store = state.store()?;
    Ok(store.add_card(&input.front, &input.back, input.deck.as_deref()))
}

/// Save an edit. Returns false when the card no longer exists.
pub fn update_card(id: String, input: CardInput, state: &AppState) -> Result<bool, CommandError> {
    input.validate()?;
    let mut store = state.store()?;
    Ok(store.update_card(&CardId::from(id), &input.front, &input.back, input.deck.as_deref()))
}

pub fn delete_card(id: String, state: &AppState) -> Result<bool, CommandError> {
    let mut store = state.store()?;
    Ok(store.delete_card(&CardId::from(id)))
}

/// Open the edit form on a card.
pub fn begin_edit(id: String, state: &AppState) -> Result<Option<Card>, CommandError> {
    let mut store = state.store()?;
    let id = CardId::from(id);
    if !store.begin_edit(&id) {
        return Ok(None);
    }
    Ok(store.editing_card().cloned())
}

pub fn cancel_edit(state: &AppState) -> Result<(), CommandError> {
    state.store()?.cancel_edit();
    Ok(())
}

pub fn editing_card(state: &AppState) -> Result<Option<Card>, CommandError> {
    Ok(state.store()?.editing_card().cloned())
}
