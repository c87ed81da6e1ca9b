//! The card store: authoritative collection, due queues, grading and the
//! in-memory study session.
//!
//! Every mutation rewrites the full snapshot through the injected
//! [`Storage`]. Storage failures are logged and swallowed; the in-memory
//! collection stays the source of truth for the rest of the process.
//!
//! Operations addressing an id that is not in the collection do nothing and
//! report it through their return value (`false` / `None`).

use crate::algorithm::sm2::Sm2;
use crate::algorithm::SpacedRepetitionAlgorithm;
use crate::clock::{Clock, SystemClock};
use crate::session::StudySession;
use crate::storage::{decode_cards, encode_cards, Storage};
use crate::types::{normalize_deck, Card, CardId, Deck, Quality, TotalStats};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

pub struct CardStore {
    cards: Vec<Card>,
    storage: Box<dyn Storage>,
    clock: Box<dyn Clock>,
    algorithm: Box<dyn SpacedRepetitionAlgorithm>,
    session: Option<StudySession>,
    editing: Option<CardId>,
}

impl CardStore {
    /// Open the store on `storage` with the wall clock and default SM-2.
    pub fn open(storage: impl Storage + 'static) -> Self {
        Self::open_with(storage, SystemClock, Box::new(Sm2::default()))
    }

    pub fn open_with(
        storage: impl Storage + 'static,
        clock: impl Clock + 'static,
        algorithm: Box<dyn SpacedRepetitionAlgorithm>,
    ) -> Self {
        let cards = load_cards(&storage);
        info!(cards = cards.len(), algorithm = algorithm.name(), "flashcards loaded");
        Self {
            cards,
            storage: Box::new(storage),
            clock: Box::new(clock),
            algorithm,
            session: None,
            editing: None,
        }
    }

    // ==================== Card Operations ====================

    /// Create a card due immediately. Text is trimmed but not validated.
    pub fn add_card(&mut self, front: &str, back: &str, deck: Option<&str>) -> Card {
        let now = self.clock.now();
        let state = self.algorithm.initial_state();
        let card = Card {
            id: CardId::generate(),
            front: front.trim().to_string(),
            back: back.trim().to_string(),
            deck: normalize_deck(deck),
            next_review: now,
            interval: state.interval,
            ease_factor: state.ease_factor,
            repetitions: state.repetitions,
            created_at: now,
        };
        debug!(id = %card.id, deck = %card.deck, "card added");
        self.cards.push(card.clone());
        self.persist();
        card
    }

    /// Replace the text fields of a card and close the edit form.
    /// Scheduling fields are left untouched.
    pub fn update_card(&mut self, id: &CardId, front: &str, back: &str, deck: Option<&str>) -> bool {
        self.editing = None;
        let Some(card) = self.cards.iter_mut().find(|c| &c.id == id) else {
            debug!(%id, "update of unknown card ignored");
            return false;
        };
        card.front = front.trim().to_string();
        card.back = back.trim().to_string();
        card.deck = normalize_deck(deck);
        self.persist();
        true
    }

    /// Remove a card, cancelling a session or edit form that points at it.
    pub fn delete_card(&mut self, id: &CardId) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| &c.id != id);
        if self.cards.len() == before {
            debug!(%id, "delete of unknown card ignored");
            return false;
        }
        if self.session.as_ref().is_some_and(|s| s.is_presenting(id)) {
            self.session = None;
        }
        if self.editing.as_ref() == Some(id) {
            self.editing = None;
        }
        debug!(%id, "card deleted");
        self.persist();
        true
    }

    /// Remove every card of a deck. Ends a session studying that deck.
    /// Returns the number of cards removed.
    pub fn delete_deck(&mut self, name: &str) -> usize {
        let before = self.cards.len();
        self.cards.retain(|c| c.deck != name);
        let removed = before - self.cards.len();

        if self.session.as_ref().is_some_and(|s| s.deck() == name) {
            self.end_study();
        }
        if self.editing_card().is_none() {
            self.editing = None;
        }
        if removed > 0 {
            debug!(deck = name, removed, "deck deleted");
            self.persist();
        }
        removed
    }

    /// Apply one review to a card and reschedule it.
    ///
    /// When the graded card is the one the session is presenting, the session
    /// moves on to the earliest-due remaining card of its deck, or to the
    /// caught-up state when none is left.
    pub fn grade_card(&mut self, id: &CardId, quality: Quality) -> Option<Card> {
        let now = self.clock.now();
        let Some(card) = self.cards.iter_mut().find(|c| &c.id == id) else {
            debug!(%id, "grade of unknown card ignored");
            return None;
        };

        let result = self.algorithm.schedule(&card.review_state(), quality, now);
        card.interval = result.new_state.interval;
        card.ease_factor = result.new_state.ease_factor;
        card.repetitions = result.new_state.repetitions;
        card.next_review = result.next_review;
        let graded = card.clone();

        debug!(
            %id,
            quality = quality.to_value(),
            interval = graded.interval,
            ease_factor = graded.ease_factor,
            "card graded"
        );
        self.persist();

        let study_deck = self
            .session
            .as_ref()
            .filter(|s| s.is_presenting(id))
            .map(|s| s.deck().to_string());
        if let Some(deck) = study_deck {
            let next = self
                .due_at(Some(&deck), now)
                .into_iter()
                .find(|c| c.id != graded.id)
                .map(|c| c.id.clone());
            if let Some(session) = self.session.as_mut() {
                session.advance(next);
            }
        }

        Some(graded)
    }

    /// Grade whatever card the session is presenting.
    pub fn grade_current(&mut self, quality: Quality) -> Option<Card> {
        let id = self.session.as_ref()?.current()?.clone();
        self.grade_card(&id, quality)
    }

    // ==================== Queries ====================

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// One entry per deck name, in order of first appearance.
    pub fn decks(&self) -> Vec<Deck> {
        let now = self.clock.now();
        let mut decks: Vec<Deck> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for card in &self.cards {
            let slot = *index.entry(card.deck.as_str()).or_insert_with(|| {
                decks.push(Deck {
                    name: card.deck.clone(),
                    card_count: 0,
                    due_count: 0,
                });
                decks.len() - 1
            });
            let deck = &mut decks[slot];
            deck.card_count += 1;
            if card.is_due(now) {
                deck.due_count += 1;
            }
        }
        decks
    }

    /// Due cards, earliest first, optionally limited to one deck. An empty
    /// deck name means every deck.
    pub fn due_cards(&self, deck: Option<&str>) -> Vec<&Card> {
        self.due_at(deck, self.clock.now())
    }

    pub fn cards_by_deck(&self, deck: &str) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.deck == deck).collect()
    }

    pub fn total_stats(&self) -> TotalStats {
        let now = self.clock.now();
        TotalStats {
            total_cards: self.cards.len(),
            due_cards: self.cards.iter().filter(|c| c.is_due(now)).count(),
            mastered_cards: self.cards.iter().filter(|c| c.is_mastered()).count(),
        }
    }

    fn due_at(&self, deck: Option<&str>, now: DateTime<Utc>) -> Vec<&Card> {
        let deck = deck.filter(|d| !d.is_empty());
        let mut due: Vec<&Card> = self
            .cards
            .iter()
            .filter(|c| c.is_due(now) && deck.map_or(true, |d| c.deck == d))
            .collect();
        due.sort_by_key(|c| c.next_review);
        due
    }

    // ==================== Study Session ====================

    /// Open a session on the deck's earliest-due card. With nothing due the
    /// session opens already caught up.
    pub fn start_study(&mut self, deck: &str) {
        let first = self.due_cards(Some(deck)).first().map(|c| c.id.clone());
        debug!(deck, caught_up = first.is_none(), "study started");
        self.session = Some(StudySession::new(deck, first));
    }

    pub fn end_study(&mut self) {
        self.session = None;
    }

    pub fn reveal_answer(&mut self) -> bool {
        self.session.as_mut().is_some_and(StudySession::reveal)
    }

    pub fn session(&self) -> Option<&StudySession> {
        self.session.as_ref()
    }

    pub fn current_card(&self) -> Option<&Card> {
        let id = self.session.as_ref()?.current()?;
        self.card(id)
    }

    // ==================== Edit Form ====================

    pub fn begin_edit(&mut self, id: &CardId) -> bool {
        if self.card(id).is_none() {
            return false;
        }
        self.editing = Some(id.clone());
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing_card(&self) -> Option<&Card> {
        self.card(self.editing.as_ref()?)
    }

    fn persist(&self) {
        let saved = encode_cards(&self.cards).and_then(|bytes| self.storage.save(&bytes));
        if let Err(e) = saved {
            error!(error = %e, cards = self.cards.len(), "failed to save flashcards");
        }
    }
}

fn load_cards(storage: &dyn Storage) -> Vec<Card> {
    match storage.load() {
        Ok(Some(bytes)) => decode_cards(&bytes).unwrap_or_else(|e| {
            warn!(error = %e, "stored flashcards unreadable, starting empty");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "failed to load flashcards, starting empty");
            Vec::new()
        }
    }
}
