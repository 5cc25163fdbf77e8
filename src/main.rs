//! Binary entry point: resolve configuration, start logging, load the deck,
//! and hand the review session to the Ratatui event loop until the user exits.
use clap::Parser;
use flipdeck::{logging, run_app, App, Cli, Config, FlashcardStore, ReviewSession};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::from_cli(Cli::parse())?;
    logging::init(&config)?;
    info!(deck = %config.deck_path.display(), "starting flipdeck");

    let store = FlashcardStore::load(&config.deck_path);
    let mut app = App::new(ReviewSession::new(store));
    let result = run_app(&mut app);

    info!("exiting flipdeck");
    result
}
