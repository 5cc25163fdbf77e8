//! Persistence module split across logical submodules.

mod cards;
mod connection;

pub use cards::{fetch_cards, replace_cards};
pub use connection::{is_unreadable, open_read_only, open_store};
