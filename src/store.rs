//! The flashcard store: the in-memory deck plus the file it mirrors. Every
//! mutation is written through immediately, and a failed write rolls the
//! mutation back so the deck on screen is always the deck on disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::db::{fetch_cards, is_unreadable, open_read_only, open_store, replace_cards};
use crate::models::{Card, DeckError};

pub struct FlashcardStore {
    path: PathBuf,
    cards: Vec<Card>,
}

impl FlashcardStore {
    /// Load the deck stored at `path`. A missing file yields an empty deck, and
    /// so does a file that cannot be read or holds malformed rows; the problem
    /// is logged and the next save replaces the file.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cards = read_deck(&path);
        Self { path, cards }
    }

    /// Discard in-memory state and read the file again.
    pub fn reload(&mut self) {
        self.cards = read_deck(&self.path);
    }

    /// Overwrite the file with the current deck. A file that exists but is not
    /// a readable database is removed and written from scratch.
    pub fn save(&self) -> Result<()> {
        match self.write_deck() {
            Err(err) if is_unreadable(&err) => {
                warn!(
                    path = %self.path.display(),
                    error = %surface(&err),
                    "deck file is unreadable, replacing it"
                );
                fs::remove_file(&self.path).context("failed to remove unreadable deck file")?;
                self.write_deck()
            }
            other => other,
        }?;

        debug!(path = %self.path.display(), count = self.cards.len(), "saved deck");
        Ok(())
    }

    /// Append a card and persist. Returns the index of the new card.
    pub fn add(&mut self, question: &str, answer: &str) -> Result<usize> {
        let card = Card::new(question, answer)?;
        self.cards.push(card);

        if let Err(err) = self.save() {
            self.cards.pop();
            return Err(err);
        }

        let index = self.cards.len() - 1;
        info!(index, "added card");
        Ok(index)
    }

    /// Replace the text of the card at `index` and persist.
    pub fn edit(&mut self, index: usize, question: &str, answer: &str) -> Result<()> {
        self.check_index(index)?;
        let card = Card::new(question, answer)?;
        let previous = std::mem::replace(&mut self.cards[index], card);

        if let Err(err) = self.save() {
            self.cards[index] = previous;
            return Err(err);
        }

        info!(index, "edited card");
        Ok(())
    }

    /// Delete the card at `index` and persist, handing the removed card back.
    pub fn remove(&mut self, index: usize) -> Result<Card> {
        self.check_index(index)?;
        let card = self.cards.remove(index);

        if let Err(err) = self.save() {
            self.cards.insert(index, card);
            return Err(err);
        }

        info!(index, "removed card");
        Ok(card)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_index(&self, index: usize) -> Result<(), DeckError> {
        if index < self.cards.len() {
            Ok(())
        } else {
            Err(DeckError::OutOfRange {
                index,
                len: self.cards.len(),
            })
        }
    }

    fn write_deck(&self) -> Result<()> {
        let mut conn = open_store(&self.path)?;
        replace_cards(&mut conn, &self.cards)
    }
}

fn read_deck(path: &Path) -> Vec<Card> {
    if !path.exists() {
        info!(path = %path.display(), "no deck file yet, starting empty");
        return Vec::new();
    }

    let loaded = open_read_only(path).and_then(|conn| fetch_cards(&conn));
    match loaded {
        Ok(cards) => {
            info!(path = %path.display(), count = cards.len(), "loaded deck");
            cards
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %surface(&err),
                "deck file is damaged, starting empty"
            );
            Vec::new()
        }
    }
}

fn surface(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn deck_path(dir: &TempDir) -> PathBuf {
        dir.path().join("deck.sqlite")
    }

    #[test]
    fn missing_file_loads_empty_without_creating_it() {
        let dir = TempDir::new().unwrap();
        let store = FlashcardStore::load(deck_path(&dir));
        assert!(store.is_empty());
        assert!(!deck_path(&dir).exists());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = FlashcardStore::load(deck_path(&dir));
        store.add("What is 2 + 2?", "4").unwrap();
        store.add("Largest planet?", "Jupiter").unwrap();
        store.add("Unicode ✓", "naïve café").unwrap();

        let reloaded = FlashcardStore::load(deck_path(&dir));
        assert_eq!(reloaded.cards(), store.cards());
    }

    #[test]
    fn add_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("deck.sqlite");
        let mut store = FlashcardStore::load(&path);
        store.add("q", "a").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn empty_question_is_rejected_without_mutation() {
        let dir = TempDir::new().unwrap();
        let mut store = FlashcardStore::load(deck_path(&dir));
        store.add("kept", "yes").unwrap();

        let err = store.add("   ", "orphan answer").unwrap_err();
        assert_eq!(
            err.downcast_ref::<DeckError>(),
            Some(&DeckError::EmptyQuestion)
        );
        assert_eq!(store.len(), 1);
        assert_eq!(FlashcardStore::load(deck_path(&dir)).len(), 1);
    }

    #[test]
    fn remove_out_of_range_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut store = FlashcardStore::load(deck_path(&dir));
        store.add("only", "one").unwrap();

        let err = store.remove(3).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DeckError>(),
            Some(&DeckError::OutOfRange { index: 3, len: 1 })
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_persists_and_returns_card() {
        let dir = TempDir::new().unwrap();
        let mut store = FlashcardStore::load(deck_path(&dir));
        store.add("first", "1").unwrap();
        store.add("second", "2").unwrap();

        let removed = store.remove(0).unwrap();
        assert_eq!(removed.question(), "first");

        let reloaded = FlashcardStore::load(deck_path(&dir));
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.cards()[0].question(), "second");
    }

    #[test]
    fn edit_replaces_text_in_place() {
        let dir = TempDir::new().unwrap();
        let mut store = FlashcardStore::load(deck_path(&dir));
        store.add("a", "1").unwrap();
        store.add("b", "2").unwrap();

        store.edit(1, " B ", " two ").unwrap();
        let reloaded = FlashcardStore::load(deck_path(&dir));
        assert_eq!(reloaded.cards()[1].question(), "B");
        assert_eq!(reloaded.cards()[1].answer(), "two");
        assert_eq!(reloaded.cards()[0].question(), "a");
    }

    #[test]
    fn edit_with_blank_question_keeps_original() {
        let dir = TempDir::new().unwrap();
        let mut store = FlashcardStore::load(deck_path(&dir));
        store.add("a", "1").unwrap();
        assert!(store.edit(0, "", "x").is_err());
        assert_eq!(store.cards()[0].question(), "a");
    }

    #[test]
    fn corrupt_file_loads_empty_and_is_replaced_on_save() {
        let dir = TempDir::new().unwrap();
        let path = deck_path(&dir);
        fs::write(&path, "question,answer\nnot,a database\n".repeat(400)).unwrap();

        let mut store = FlashcardStore::load(&path);
        assert!(store.is_empty());

        store.add("recovered", "yes").unwrap();
        let reloaded = FlashcardStore::load(&path);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.cards()[0].question(), "recovered");
    }

    #[test]
    fn failed_save_rolls_back_add() {
        let dir = TempDir::new().unwrap();
        // A directory where the deck file should be makes every write fail.
        let path = deck_path(&dir);
        fs::create_dir(&path).unwrap();

        let mut store = FlashcardStore::load(&path);
        assert!(store.add("q", "a").is_err());
        assert!(store.is_empty());
    }

    /// Swap the saved deck file for a directory so the next write fails.
    fn break_deck_file(path: &Path) {
        fs::remove_file(path).unwrap();
        fs::create_dir(path).unwrap();
    }

    #[test]
    fn failed_save_rolls_back_remove() {
        let dir = TempDir::new().unwrap();
        let path = deck_path(&dir);
        let mut store = FlashcardStore::load(&path);
        store.add("a", "1").unwrap();
        store.add("b", "2").unwrap();
        break_deck_file(&path);

        assert!(store.remove(0).is_err());
        let questions: Vec<_> = store.cards().iter().map(Card::question).collect();
        assert_eq!(questions, ["a", "b"]);
    }

    #[test]
    fn failed_save_rolls_back_edit() {
        let dir = TempDir::new().unwrap();
        let path = deck_path(&dir);
        let mut store = FlashcardStore::load(&path);
        store.add("a", "1").unwrap();
        store.add("b", "2").unwrap();
        break_deck_file(&path);

        assert!(store.edit(1, "changed", "x").is_err());
        assert_eq!(store.cards()[1], Card::new("b", "2").unwrap());
    }

    #[test]
    fn reload_picks_up_external_changes() {
        let dir = TempDir::new().unwrap();
        let mut store = FlashcardStore::load(deck_path(&dir));
        store.add("mine", "1").unwrap();

        let mut other = FlashcardStore::load(deck_path(&dir));
        other.add("theirs", "2").unwrap();

        store.reload();
        assert_eq!(store.len(), 2);
    }
}
