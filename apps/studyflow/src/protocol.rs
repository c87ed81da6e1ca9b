//! Line-delimited JSON command protocol.
//!
//! Each input line is one request tagged by `"command"`; each output line is
//! `{"ok": <value>}` or `{"error": "<message>"}`.

use crate::commands::{self, card::CardInput, study::GradeRequest, CommandError};
use crate::state::AppState;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Request {
    AddCard {
        #[serde(flatten)]
        input: CardInput,
    },
    UpdateCard {
        id: String,
        #[serde(flatten)]
        input: CardInput,
    },
    DeleteCard {
        id: String,
    },
    DeleteDeck {
        deck: String,
    },
    ListDecks,
    CardsByDeck {
        deck: String,
    },
    DueCards {
        #[serde(default)]
        deck: Option<String>,
    },
    TotalStats,
    StartStudy {
        deck: String,
    },
    EndStudy,
    RevealAnswer,
    CurrentCard,
    GradeCard {
        #[serde(flatten)]
        request: GradeRequest,
    },
    BeginEdit {
        id: String,
    },
    CancelEdit,
    EditingCard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    Ok(serde_json::Value),
    Error(String),
}

impl<T: Serialize> From<Result<T, CommandError>> for Response {
    fn from(result: Result<T, CommandError>) -> Self {
        match result.and_then(|value| {
            serde_json::to_value(value).map_err(|e| CommandError::invalid(e.to_string()))
        }) {
            Ok(value) => Response::Ok(value),
            Err(e) => Response::Error(e.message),
        }
    }
}

/// Run one request against the store.
pub fn dispatch(request: Request, state: &AppState) -> Response {
    match request {
        Request::AddCard { input } => commands::add_card(input, state).into(),
        Request::UpdateCard { id, input } => commands::update_card(id, input, state).into(),
        Request::DeleteCard { id } => commands::delete_card(id, state).into(),
        Request::DeleteDeck { deck } => commands::delete_deck(deck, state).into(),
        Request::ListDecks => commands::list_decks(state).into(),
        Request::CardsByDeck { deck } => commands::cards_by_deck(deck, state).into(),
        Request::DueCards { deck } => commands::due_cards(deck, state).into(),
        Request::TotalStats => commands::total_stats(state).into(),
        Request::StartStudy { deck } => commands::start_study(deck, state).into(),
        Request::EndStudy => commands::end_study(state).into(),
        Request::RevealAnswer => commands::reveal_answer(state).into(),
        Request::CurrentCard => commands::current_card(state).into(),
        Request::GradeCard { request } => commands::grade_card(request, state).into(),
        Request::BeginEdit { id } => commands::begin_edit(id, state).into(),
        Request::CancelEdit => commands::cancel_edit(state).into(),
        Request::EditingCard => commands::editing_card(state).into(),
    }
}

/// Parse and run one input line.
pub fn handle_line(line: &str, state: &AppState) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => dispatch(request, state),
        Err(e) => {
            tracing::warn!(error = %e, "rejected malformed request");
            Response::Error(format!("invalid request: {e}"))
        }
    }
}

/// Answer requests from `input` until it is exhausted.
pub fn serve(state: &AppState, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(&line, state);
        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_tagged_requests() {
        let request: Request =
            serde_json::from_str(r#"{"command":"add_card","front":"Q","back":"A"}"#).unwrap();
        match request {
            Request::AddCard { input } => {
                assert_eq!(input.front, "Q");
                assert_eq!(input.deck, None);
            }
            other => panic!("unexpected request {other:?}"),
        }

        let request: Request =
            serde_json::from_str(r#"{"command":"grade_card","quality":4}"#).unwrap();
        assert!(matches!(
            request,
            Request::GradeCard { request: GradeRequest { card_id: None, quality: 4 } }
        ));
    }

    #[test]
    fn test_response_shapes() {
        let ok: Response = Ok::<_, CommandError>(3usize).into();
        assert_eq!(serde_json::to_value(ok).unwrap(), json!({"ok": 3}));

        let err: Response = Err::<usize, _>(CommandError::invalid("nope")).into();
        assert_eq!(serde_json::to_value(err).unwrap(), json!({"error": "nope"}));
    }
}
