//! Study session commands.

use super::CommandError;
use crate::state::AppState;
use studyflow_core::{Card, CardId, CardStore, Quality};

/// What the study screen shows.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StudyView {
    /// Deck being studied, `None` when no session is open.
    pub deck: Option<String>,
    pub card: Option<Card>,
    pub answer_shown: bool,
    /// Session open but nothing left to review.
    pub caught_up: bool,
    /// Cards still due in the session deck, the current one included.
    pub remaining: usize,
}

impl StudyView {
    fn of(store: &CardStore) -> Self {
        match store.session() {
            Some(session) => Self {
                deck: Some(session.deck().to_string()),
                card: store.current_card().cloned(),
                answer_shown: session.answer_shown(),
                caught_up: session.is_complete(),
                remaining: store.due_cards(Some(session.deck())).len(),
            },
            None => Self {
                deck: None,
                card: None,
                answer_shown: false,
                caught_up: false,
                remaining: 0,
            },
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct GradeRequest {
    /// Card to grade; defaults to the card the session is presenting.
    #[serde(default)]
    pub card_id: Option<String>,
    pub quality: u8,
}

#[derive(Debug, serde::Serialize)]
pub struct GradeResponse {
    pub card: Card,
    pub study: StudyView,
}

pub fn start_study(deck: String, state: &AppState) -> Result<StudyView, CommandError> {
    let mut store = state.store()?;
    store.start_study(&deck);
    Ok(StudyView::of(&store))
}

pub fn end_study(state: &AppState) -> Result<StudyView, CommandError> {
    let mut store = state.store()?;
    store.end_study();
    Ok(StudyView::of(&store))
}

pub fn reveal_answer(state: &AppState) -> Result<StudyView, CommandError> {
    let mut store = state.store()?;
    store.reveal_answer();
    Ok(StudyView::of(&store))
}

pub fn current_card(state: &AppState) -> Result<StudyView, CommandError> {
    let store = state.store()?;
    Ok(StudyView::of(&store))
}

/// Submit a review. Returns `None` when there is no such card to grade.
pub fn grade_card(request: GradeRequest, state: &AppState) -> Result<Option<GradeResponse>, CommandError> {
    let quality = Quality::from_value(request.quality)
        .ok_or_else(|| CommandError::invalid(format!("quality must be 0-5, got {}", request.quality)))?;

    let mut store = state.store()?;
    let graded = match request.card_id {
        Some(id) => store.grade_card(&CardId::from(id), quality),
        None => store.grade_current(quality),
    };

    Ok(graded.map(|card| GradeResponse {
        card,
        study: StudyView::of(&store),
    }))
}
