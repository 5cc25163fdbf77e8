//! Core library surface for the flipdeck flashcard reviewer.
//!
//! The binary only wires configuration and logging to these pieces, so tests
//! and other tooling can drive the store and review session directly.
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod session;
pub mod store;
pub mod ui;

pub use config::{Cli, Config};
pub use models::{Card, DeckError};
pub use session::{CardView, Cursor, ReviewSession};
pub use store::FlashcardStore;
pub use ui::{run_app, App};
