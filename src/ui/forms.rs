use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Card;

/// Text inputs for adding or editing a card.
#[derive(Default, Clone)]
pub(crate) struct CardForm {
    pub(crate) question: String,
    pub(crate) answer: String,
    pub(crate) active: CardField,
    pub(crate) error: Option<String>,
}

/// Fields available within the card form.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub(crate) enum CardField {
    #[default]
    Question,
    Answer,
}

impl CardField {
    pub(crate) fn label(self) -> &'static str {
        match self {
            CardField::Question => "Question",
            CardField::Answer => "Answer",
        }
    }
}

impl CardForm {
    /// Populate the form from an existing card when editing.
    pub(crate) fn from_card(card: &Card) -> Self {
        Self {
            question: card.question().to_string(),
            answer: card.answer().to_string(),
            active: CardField::Question,
            error: None,
        }
    }

    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            CardField::Question => CardField::Answer,
            CardField::Answer => CardField::Question,
        };
    }

    /// Append a character to the active field. Control characters are ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.field_mut(self.active).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.field_mut(self.active).pop();
    }

    pub(crate) fn value(&self, field: CardField) -> &str {
        match field {
            CardField::Question => &self.question,
            CardField::Answer => &self.answer,
        }
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: CardField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            match field {
                CardField::Question => "<required>".to_string(),
                CardField::Answer => "<optional>".to_string(),
            }
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: CardField) -> usize {
        self.value(field).chars().count()
    }

    fn field_mut(&mut self, field: CardField) -> &mut String {
        match field {
            CardField::Question => &mut self.question,
            CardField::Answer => &mut self.answer,
        }
    }
}

/// Pending deletion awaiting a Y/N answer.
#[derive(Clone)]
pub(crate) struct ConfirmCardDelete {
    pub(crate) index: usize,
    pub(crate) question: String,
}
