//! Common test utilities for command-level integration tests.
//!
//! `TestContext` runs requests through the same JSON protocol the binary
//! serves, against an in-memory store driven by a manual clock.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;
use studyflow::protocol::{handle_line, Response};
use studyflow::state::AppState;
use studyflow_core::algorithm::sm2::Sm2;
use studyflow_core::{CardStore, ManualClock, MemoryStorage};

pub struct TestContext {
    pub state: AppState,
    pub storage: MemoryStorage,
    pub clock: ManualClock,
}

impl TestContext {
    pub fn new() -> Self {
        let storage = MemoryStorage::new();
        let clock = ManualClock::new(start_time());
        let store = CardStore::open_with(storage.clone(), clock.clone(), Box::new(Sm2::default()));
        Self {
            state: AppState::new(store),
            storage,
            clock,
        }
    }

    /// Send a request and return the raw response.
    pub fn send(&self, request: Value) -> Response {
        handle_line(&request.to_string(), &self.state)
    }

    /// Send a request that must succeed; returns the `ok` payload.
    pub fn ok(&self, request: Value) -> Value {
        match self.send(request.clone()) {
            Response::Ok(value) => value,
            Response::Error(message) => panic!("request {request} failed: {message}"),
        }
    }

    /// Send a request that must fail; returns the error message.
    pub fn err(&self, request: Value) -> String {
        match self.send(request.clone()) {
            Response::Error(message) => message,
            Response::Ok(value) => panic!("request {request} unexpectedly returned {value}"),
        }
    }

    pub fn advance_days(&self, days: i64) {
        self.clock.advance(Duration::days(days));
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_704_067_200_000).unwrap()
}
