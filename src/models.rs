//! Domain models shared by the store, the review session, and the TUI. A card
//! is deliberately a plain data holder: validation happens once in
//! [`Card::new`], after which the text can only change through an explicit
//! edit that builds a fresh card.

use std::fmt;

use thiserror::Error;

/// Typed rejections raised by deck mutations. They travel inside
/// `anyhow::Error` so callers that care can `downcast_ref` them while the UI
/// simply prints the message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("Question is required.")]
    EmptyQuestion,
    #[error("No card at position {} (deck has {len}).", .index + 1)]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One question/answer unit.
pub struct Card {
    question: String,
    answer: String,
}

impl Card {
    /// Build a card from raw user input. Surrounding whitespace is dropped from
    /// both sides and an empty question is rejected; an empty answer is
    /// allowed so a card can be drafted before the answer is known.
    pub fn new(question: &str, answer: &str) -> Result<Self, DeckError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DeckError::EmptyQuestion);
        }
        Ok(Self {
            question: question.to_string(),
            answer: answer.trim().to_string(),
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

impl fmt::Display for Card {
    /// Cards display as their question, which is what list widgets show.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_both_sides() {
        let card = Card::new("  capital of France? ", "\tParis\n").unwrap();
        assert_eq!(card.question(), "capital of France?");
        assert_eq!(card.answer(), "Paris");
    }

    #[test]
    fn blank_question_is_rejected() {
        assert_eq!(Card::new("   ", "answer"), Err(DeckError::EmptyQuestion));
        assert_eq!(Card::new("", ""), Err(DeckError::EmptyQuestion));
    }

    #[test]
    fn empty_answer_is_accepted() {
        let card = Card::new("draft", "").unwrap();
        assert_eq!(card.answer(), "");
    }

    #[test]
    fn out_of_range_message_is_one_based() {
        let err = DeckError::OutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "No card at position 5 (deck has 2).");
    }
}
