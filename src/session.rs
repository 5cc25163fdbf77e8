//! Review session: owns the store and a cursor over it. Navigation wraps
//! around at both ends, and any move to another card hides the answer again.

use anyhow::Result;
use tracing::debug;

use crate::models::{Card, DeckError};
use crate::store::FlashcardStore;

/// Current review position plus the reveal flag for the card under it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub index: usize,
    pub revealed: bool,
}

/// What the review screen should show right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardView<'a> {
    /// The deck has no cards.
    Empty,
    Card {
        card: &'a Card,
        /// 1-based position for display.
        position: usize,
        total: usize,
        revealed: bool,
    },
}

pub struct ReviewSession {
    store: FlashcardStore,
    cursor: Cursor,
}

impl ReviewSession {
    pub fn new(store: FlashcardStore) -> Self {
        Self {
            store,
            cursor: Cursor::default(),
        }
    }

    /// The card under the cursor, or `None` when the deck is empty.
    pub fn current(&self) -> Option<&Card> {
        self.store.get(self.cursor.index)
    }

    pub fn view(&self) -> CardView<'_> {
        match self.current() {
            Some(card) => CardView::Card {
                card,
                position: self.cursor.index + 1,
                total: self.store.len(),
                revealed: self.cursor.revealed,
            },
            None => CardView::Empty,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_revealed(&self) -> bool {
        self.cursor.revealed
    }

    /// Flip the current card. Returns false when there is nothing to reveal.
    pub fn reveal(&mut self) -> bool {
        if self.store.is_empty() {
            return false;
        }
        self.cursor.revealed = true;
        true
    }

    pub fn next(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        self.move_to((self.cursor.index + 1) % len);
    }

    pub fn previous(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        self.move_to((self.cursor.index + len - 1) % len);
    }

    pub fn first(&mut self) {
        if !self.store.is_empty() {
            self.move_to(0);
        }
    }

    pub fn last(&mut self) {
        if !self.store.is_empty() {
            self.move_to(self.store.len() - 1);
        }
    }

    pub fn jump_to(&mut self, index: usize) -> Result<(), DeckError> {
        if index >= self.store.len() {
            return Err(DeckError::OutOfRange {
                index,
                len: self.store.len(),
            });
        }
        self.move_to(index);
        Ok(())
    }

    /// Append a card and move the cursor onto it, answer hidden.
    pub fn add_card(&mut self, question: &str, answer: &str) -> Result<usize> {
        let index = self.store.add(question, answer)?;
        self.move_to(index);
        Ok(index)
    }

    /// Replace a card's text. Only editing the card under the cursor hides its
    /// answer; edits made elsewhere from the browse list leave the flip alone.
    pub fn edit_card(&mut self, index: usize, question: &str, answer: &str) -> Result<()> {
        self.store.edit(index, question, answer)?;
        if index == self.cursor.index {
            self.cursor.revealed = false;
        }
        Ok(())
    }

    /// Remove a card while keeping the cursor on the same card when possible.
    pub fn remove_card(&mut self, index: usize) -> Result<Card> {
        let removed = self.store.remove(index)?;
        let len = self.store.len();

        if len == 0 {
            self.cursor = Cursor::default();
        } else {
            if index < self.cursor.index {
                self.cursor.index -= 1;
            }
            self.cursor.index = self.cursor.index.min(len - 1);
            self.cursor.revealed = false;
        }

        Ok(removed)
    }

    pub fn save(&self) -> Result<()> {
        self.store.save()
    }

    /// Re-read the deck file and start over from the first card.
    pub fn reload(&mut self) {
        self.store.reload();
        self.cursor = Cursor::default();
    }

    pub fn cards(&self) -> &[Card] {
        self.store.cards()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn store(&self) -> &FlashcardStore {
        &self.store
    }

    fn move_to(&mut self, index: usize) {
        debug!(from = self.cursor.index, to = index, "cursor moved");
        self.cursor = Cursor {
            index,
            revealed: false,
        };
    }
}
