use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::session::{CardView, ReviewSession};

use super::forms::{CardField, CardForm, ConfirmCardDelete};
use super::helpers::{centered_rect, surface_error, truncate_chars};
use super::screens::BrowseScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp/PageDown in the browse list.
const PAGE_STEP: isize = 5;
/// Question preview width in the confirmation dialog.
const PREVIEW_CHARS: usize = 40;

/// High-level navigation states.
enum Screen {
    Review,
    Browse(BrowseScreen),
}

/// Modal overlays layered on top of the current screen.
enum Mode {
    Normal,
    AddingCard(CardForm),
    EditingCard { index: usize, form: CardForm },
    ConfirmCardDelete(ConfirmCardDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The review session (and
/// through it the deck) is owned here and handed to widgets by reference.
pub struct App {
    session: ReviewSession,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(session: ReviewSession) -> Self {
        Self {
            session,
            screen: Screen::Review,
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn session(&self) -> &ReviewSession {
        &self.session
    }

    /// Route a key press to the active mode. Returns true when the user asked
    /// to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::AddingCard(form) => self.handle_add_card(code, form),
            Mode::EditingCard { index, form } => self.handle_edit_card(code, index, form),
            Mode::ConfirmCardDelete(confirm) => self.handle_confirm_delete(code, confirm),
        };

        Ok(exit)
    }

    /// Write the deck again on demand.
    pub(crate) fn handle_ctrl_s(&mut self) {
        match self.session.save() {
            Ok(()) => self.set_status(
                format!("Saved {} card(s).", self.session.len()),
                StatusKind::Info,
            ),
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    /// Re-read the deck file, dropping any open dialog.
    pub(crate) fn handle_ctrl_r(&mut self) {
        self.mode = Mode::Normal;
        self.session.reload();
        if let Screen::Browse(browse) = &mut self.screen {
            browse.ensure_in_bounds(self.session.len());
        }
        self.set_status(
            format!("Reloaded {} card(s) from disk.", self.session.len()),
            StatusKind::Info,
        );
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match self.screen {
            Screen::Review => self.handle_review_key(code, exit),
            Screen::Browse(_) => self.handle_browse_key(code, exit),
        }
    }

    fn handle_review_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if self.session.reveal() {
                    self.clear_status();
                } else {
                    self.set_status("No cards to reveal.", StatusKind::Error);
                }
            }
            KeyCode::Right | KeyCode::Char('n') => {
                self.clear_status();
                self.session.next();
            }
            KeyCode::Left | KeyCode::Char('p') => {
                self.clear_status();
                self.session.previous();
            }
            KeyCode::Home => {
                self.clear_status();
                self.session.first();
            }
            KeyCode::End => {
                self.clear_status();
                self.session.last();
            }
            KeyCode::Char('+') | KeyCode::Char('a') => {
                self.clear_status();
                return Mode::AddingCard(CardForm::default());
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                let index = self.session.cursor().index;
                return self.begin_edit(index);
            }
            KeyCode::Char('-') | KeyCode::Char('d') => {
                let index = self.session.cursor().index;
                return self.begin_delete(index);
            }
            KeyCode::Char('l') | KeyCode::Tab => {
                self.clear_status();
                let selected = self.session.cursor().index;
                self.screen = Screen::Browse(BrowseScreen::new(selected, self.session.len()));
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_browse_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        let len = self.session.len();
        let Screen::Browse(browse) = &mut self.screen else {
            return Mode::Normal;
        };

        match code {
            KeyCode::Char('q') => {
                *exit = true;
            }
            KeyCode::Esc | KeyCode::Char('l') | KeyCode::Tab => {
                self.screen = Screen::Review;
                self.clear_status();
            }
            KeyCode::Up => browse.move_selection(-1, len),
            KeyCode::Down => browse.move_selection(1, len),
            KeyCode::PageUp => browse.move_selection(-PAGE_STEP, len),
            KeyCode::PageDown => browse.move_selection(PAGE_STEP, len),
            KeyCode::Home => browse.select_first(),
            KeyCode::End => browse.select_last(len),
            KeyCode::Enter => {
                let selected = browse.selected;
                match self.session.jump_to(selected) {
                    Ok(()) => {
                        self.screen = Screen::Review;
                        self.clear_status();
                    }
                    Err(err) => self.set_status(err.to_string(), StatusKind::Error),
                }
            }
            KeyCode::Char('+') | KeyCode::Char('a') => {
                self.clear_status();
                return Mode::AddingCard(CardForm::default());
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                let selected = browse.selected;
                return self.begin_edit(selected);
            }
            KeyCode::Char('-') | KeyCode::Char('d') => {
                let selected = browse.selected;
                return self.begin_delete(selected);
            }
            _ => {}
        }
        Mode::Normal
    }

    fn begin_edit(&mut self, index: usize) -> Mode {
        match self.session.cards().get(index) {
            Some(card) => {
                let form = CardForm::from_card(card);
                self.clear_status();
                Mode::EditingCard { index, form }
            }
            None => {
                self.set_status("No card selected to edit.", StatusKind::Error);
                Mode::Normal
            }
        }
    }

    fn begin_delete(&mut self, index: usize) -> Mode {
        match self.session.cards().get(index) {
            Some(card) => {
                let question = card.question().to_string();
                self.clear_status();
                Mode::ConfirmCardDelete(ConfirmCardDelete { index, question })
            }
            None => {
                self.set_status("No card selected to remove.", StatusKind::Error);
                Mode::Normal
            }
        }
    }

    fn handle_add_card(&mut self, code: KeyCode, mut form: CardForm) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add card cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.session.add_card(&form.question, &form.answer) {
                Ok(index) => {
                    self.set_status(format!("Added card {}.", index + 1), StatusKind::Info);
                    self.sync_browse_selection(index);
                    keep_open = false;
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Mode::AddingCard(form)
        } else {
            Mode::Normal
        }
    }

    fn handle_edit_card(&mut self, code: KeyCode, index: usize, mut form: CardForm) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Edit cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                match self
                    .session
                    .edit_card(index, &form.question, &form.answer)
                {
                    Ok(()) => {
                        self.set_status(format!("Updated card {}.", index + 1), StatusKind::Info);
                        keep_open = false;
                    }
                    Err(err) => {
                        let message = surface_error(&err);
                        form.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                    }
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Mode::EditingCard { index, form }
        } else {
            Mode::Normal
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmCardDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.session.remove_card(confirm.index) {
                    Ok(card) => {
                        self.set_status(
                            format!("Deleted \"{}\".", truncate_chars(card.question(), PREVIEW_CHARS)),
                            StatusKind::Info,
                        );
                        let len = self.session.len();
                        if let Screen::Browse(browse) = &mut self.screen {
                            browse.ensure_in_bounds(len);
                        }
                        Mode::Normal
                    }
                    Err(err) => {
                        self.set_status(surface_error(&err), StatusKind::Error);
                        Mode::Normal
                    }
                }
            }
            _ => Mode::ConfirmCardDelete(confirm),
        }
    }

    fn sync_browse_selection(&mut self, index: usize) {
        if let Screen::Browse(browse) = &mut self.screen {
            browse.selected = index;
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Review => self.draw_review(frame, content_area),
            Screen::Browse(browse) => self.draw_browse(frame, content_area, browse),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingCard(form) => self.draw_card_form(frame, area, "Add Card", form),
            Mode::EditingCard { form, .. } => self.draw_card_form(frame, area, "Edit Card", form),
            Mode::ConfirmCardDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Normal => {}
        }
    }

    fn draw_review(&self, frame: &mut Frame, area: Rect) {
        let (card, position, total, revealed) = match self.session.view() {
            CardView::Empty => {
                let message = Paragraph::new("No cards yet. Press '+' to add one.")
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title("Review"));
                frame.render_widget(message, area);
                return;
            }
            CardView::Card {
                card,
                position,
                total,
                revealed,
            } => (card, position, total, revealed),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Card {position} of {total}"));
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        let question = Paragraph::new(vec![
            Line::from(Span::styled("Question", Style::default().fg(Color::DarkGray))),
            Line::from(""),
            Line::from(Span::styled(
                card.question().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(question, chunks[0]);

        let answer_block = Block::default().borders(Borders::TOP);
        frame.render_widget(answer_block.clone(), chunks[1]);
        let answer_area = answer_block.inner(chunks[1]);

        let answer_line = if !revealed {
            Line::from(Span::styled(
                "Press Space to reveal the answer.",
                Style::default().fg(Color::DarkGray),
            ))
        } else if card.answer().is_empty() {
            Line::from(Span::styled(
                "(no answer recorded)",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(Span::styled(
                card.answer().to_string(),
                Style::default().fg(Color::Green),
            ))
        };

        let answer = Paragraph::new(vec![
            Line::from(Span::styled("Answer", Style::default().fg(Color::DarkGray))),
            Line::from(""),
            answer_line,
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(answer, answer_area);
    }

    fn draw_browse(&self, frame: &mut Frame, area: Rect, browse: &BrowseScreen) {
        let cards = self.session.cards();
        let title = format!("All Cards ({})", cards.len());

        if cards.is_empty() {
            let message = Paragraph::new("No cards yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(message, area);
            return;
        }

        let current = self.session.cursor().index;
        let items: Vec<ListItem> = cards
            .iter()
            .enumerate()
            .map(|(idx, card)| {
                let marker = if idx == current { "*" } else { " " };
                let mut spans = vec![
                    Span::raw(format!("{marker}{:>4}. ", idx + 1)),
                    Span::raw(card.question().to_string()),
                ];
                if card.answer().is_empty() {
                    spans.push(Span::styled(
                        "  (no answer)",
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );

        let mut state = ListState::default();
        state.select(Some(browse.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let keys: &[(&str, &str)] = match (&self.screen, &self.mode) {
            (_, Mode::AddingCard(_)) | (_, Mode::EditingCard { .. }) => &[
                ("[Tab]", " Switch Field   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            (_, Mode::ConfirmCardDelete(_)) => &[("[Y]", " Delete   "), ("[N/Esc]", " Keep")],
            (Screen::Review, Mode::Normal) => &[
                ("[Space]", " Reveal   "),
                ("[←→]", " Prev/Next   "),
                ("[+]", " Add   "),
                ("[e]", " Edit   "),
                ("[-]", " Delete   "),
                ("[l]", " List   "),
                ("[q]", " Quit"),
            ],
            (Screen::Browse(_), Mode::Normal) => &[
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Review   "),
                ("[+]", " Add   "),
                ("[e]", " Edit   "),
                ("[-]", " Delete   "),
                ("[Esc]", " Back   "),
                ("[q]", " Quit"),
            ],
        };

        Line::from(
            keys.iter()
                .flat_map(|(key, label)| {
                    [Span::styled(*key, key_style), Span::raw(*label)]
                })
                .collect::<Vec<_>>(),
        )
    }

    fn draw_card_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &CardForm) {
        let popup_area = centered_rect(70, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line(CardField::Question),
            form.build_line(CardField::Answer),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save | Tab to switch | Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines);
        frame.render_widget(paragraph, inner);

        let row = match form.active {
            CardField::Question => 0,
            CardField::Answer => 1,
        };
        let (x, y) = form_cursor_position(inner, form, row);
        frame.set_cursor_position((x, y));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmCardDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete card {}?", confirm.index + 1)),
            Line::from(format!(
                "\"{}\"",
                truncate_chars(&confirm.question, PREVIEW_CHARS)
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Terminal cell for the text cursor inside the form, kept within `inner`
/// however long the field grows.
fn form_cursor_position(inner: Rect, form: &CardForm, row: u16) -> (u16, u16) {
    let prefix = u16::try_from(form.active.label().chars().count() + 2).unwrap_or(u16::MAX);
    let typed = u16::try_from(form.value_len(form.active)).unwrap_or(u16::MAX);
    let cursor_x = inner.x.saturating_add(prefix).saturating_add(typed);
    let max_x = inner.x.saturating_add(inner.width.saturating_sub(1));
    (cursor_x.min(max_x), inner.y.saturating_add(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FlashcardStore;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> App {
        let store = FlashcardStore::load(dir.path().join("deck.sqlite"));
        App::new(ReviewSession::new(store))
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            assert!(!app.handle_key(*code).unwrap());
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            assert!(!app.handle_key(KeyCode::Char(ch)).unwrap());
        }
    }

    fn add_via_form(app: &mut App, question: &str, answer: &str) {
        press(app, &[KeyCode::Char('+')]);
        type_text(app, question);
        press(app, &[KeyCode::Tab]);
        type_text(app, answer);
        press(app, &[KeyCode::Enter]);
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn quit_keys_exit_from_review() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
        assert!(app.handle_key(KeyCode::Esc).unwrap());
    }

    #[test]
    fn add_form_creates_card_and_shows_it() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_via_form(&mut app, "Capital of Peru?", "Lima");

        assert!(matches!(app.mode, Mode::Normal));
        let card = app.session().current().unwrap();
        assert_eq!(card.question(), "Capital of Peru?");
        assert_eq!(card.answer(), "Lima");
    }

    #[test]
    fn add_form_rejects_blank_question_and_stays_open() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, &[KeyCode::Char('+'), KeyCode::Tab]);
        type_text(&mut app, "answer only");
        press(&mut app, &[KeyCode::Enter]);

        match &app.mode {
            Mode::AddingCard(form) => {
                assert_eq!(form.error.as_deref(), Some("Question is required."))
            }
            _ => panic!("form should stay open"),
        }
        assert!(app.session().is_empty());
    }

    #[test]
    fn typing_q_inside_form_does_not_quit() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, &[KeyCode::Char('+')]);
        type_text(&mut app, "quiz");
        press(&mut app, &[KeyCode::Esc]);
        assert!(app.session().is_empty());
    }

    #[test]
    fn space_reveals_and_arrow_hides_again() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_via_form(&mut app, "one", "1");
        add_via_form(&mut app, "two", "2");

        press(&mut app, &[KeyCode::Char(' ')]);
        assert!(app.session().is_revealed());
        press(&mut app, &[KeyCode::Right]);
        assert!(!app.session().is_revealed());
        assert_eq!(app.session().current().unwrap().question(), "one");
    }

    #[test]
    fn delete_requires_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_via_form(&mut app, "doomed", "x");

        press(&mut app, &[KeyCode::Char('-'), KeyCode::Char('n')]);
        assert_eq!(app.session().len(), 1);

        press(&mut app, &[KeyCode::Char('-'), KeyCode::Char('y')]);
        assert!(app.session().is_empty());
        assert!(app.session().current().is_none());
    }

    #[test]
    fn edit_on_empty_deck_reports_error() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, &[KeyCode::Char('e')]);
        assert!(matches!(app.mode, Mode::Normal));
        assert!(matches!(
            app.status,
            Some(StatusMessage {
                kind: StatusKind::Error,
                ..
            })
        ));
    }

    #[test]
    fn edit_form_updates_current_card() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_via_form(&mut app, "teh", "typo");

        press(&mut app, &[KeyCode::Char('e'), KeyCode::Backspace, KeyCode::Backspace]);
        type_text(&mut app, "he");
        press(&mut app, &[KeyCode::Enter]);

        assert_eq!(app.session().current().unwrap().question(), "the");
    }

    #[test]
    fn browse_enter_jumps_to_selected_card() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        for q in ["a", "b", "c"] {
            add_via_form(&mut app, q, "");
        }

        press(
            &mut app,
            &[KeyCode::Char('l'), KeyCode::Home, KeyCode::Down, KeyCode::Enter],
        );
        assert!(matches!(app.screen, Screen::Review));
        assert_eq!(app.session().current().unwrap().question(), "b");
    }

    #[test]
    fn browse_delete_keeps_selection_in_bounds() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_via_form(&mut app, "a", "");
        add_via_form(&mut app, "b", "");

        press(
            &mut app,
            &[KeyCode::Char('l'), KeyCode::End, KeyCode::Char('-'), KeyCode::Char('y')],
        );
        match &app.screen {
            Screen::Browse(browse) => assert_eq!(browse.selected, 0),
            Screen::Review => panic!("should still be browsing"),
        }
    }

    #[test]
    fn ctrl_r_reloads_from_disk() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_via_form(&mut app, "a", "1");

        let mut other = FlashcardStore::load(dir.path().join("deck.sqlite"));
        other.add("b", "2").unwrap();

        app.handle_ctrl_r();
        assert_eq!(app.session().len(), 2);
        assert_eq!(app.session().cursor().index, 0);
    }

    #[test]
    fn form_cursor_stays_inside_popup_for_huge_input() {
        let form = CardForm {
            question: "x".repeat(70_000),
            ..CardForm::default()
        };
        let inner = Rect::new(10, 5, 40, 4);
        assert_eq!(form_cursor_position(inner, &form, 0), (49, 5));
    }

    #[test]
    fn form_cursor_follows_typed_text() {
        let form = CardForm {
            answer: "abc".to_string(),
            active: CardField::Answer,
            ..CardForm::default()
        };
        let inner = Rect::new(2, 3, 60, 4);
        // "Answer: " is eight cells wide.
        assert_eq!(form_cursor_position(inner, &form, 1), (2 + 8 + 3, 4));
    }

    #[test]
    fn home_and_end_clear_stale_status() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_via_form(&mut app, "a", "");
        add_via_form(&mut app, "b", "");

        app.set_status("old news", StatusKind::Error);
        press(&mut app, &[KeyCode::Home]);
        assert!(app.status.is_none());
        assert_eq!(app.session().cursor().index, 0);

        app.set_status("old news", StatusKind::Error);
        press(&mut app, &[KeyCode::End]);
        assert!(app.status.is_none());
        assert_eq!(app.session().cursor().index, 1);
    }

    #[test]
    fn empty_deck_renders_placeholder() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);
        assert!(render(&app).contains("No cards yet"));
    }

    #[test]
    fn answer_is_hidden_until_revealed() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_via_form(&mut app, "Largest planet?", "Jupiter");

        let hidden = render(&app);
        assert!(hidden.contains("Largest planet?"));
        assert!(hidden.contains("Card 1 of 1"));
        assert!(!hidden.contains("Jupiter"));

        press(&mut app, &[KeyCode::Char(' ')]);
        assert!(render(&app).contains("Jupiter"));
    }
}
