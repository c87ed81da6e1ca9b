//! Statistics commands.

use super::CommandError;
use crate::state::AppState;
use studyflow_core::{Card, TotalStats};

pub fn total_stats(state: &AppState) -> Result<TotalStats, CommandError> {
    Ok(state.store()?.total_stats())
}

/// Due cards, earliest first, optionally for one deck.
pub fn due_cards(deck: Option<String>, state: &AppState) -> Result<Vec<Card>, CommandError> {
    let store = state.store()?;
    Ok(store.due_cards(deck.as_deref()).into_iter().cloned().collect())
}
