//! Local host for the StudyFlow flashcard scheduler.
//!
//! Wires the scheduling core to a persistent store chosen by configuration
//! and answers JSON commands on stdin, one per line.

pub mod commands;
pub mod config;
pub mod db;
pub mod protocol;
pub mod state;

use crate::config::Config;
use crate::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries responses, logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        storage = ?config.storage,
        path = %config.data_path.display(),
        algorithm = %config.algorithm,
        "Opening flashcard store..."
    );
    let state = AppState::from_config(&config)?;

    tracing::info!("Ready for commands on stdin");
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    protocol::serve(&state, stdin.lock(), stdout.lock())?;

    Ok(())
}
