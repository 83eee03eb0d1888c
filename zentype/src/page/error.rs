use std::fmt::Display;

use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Padding, Paragraph, Wrap},
};

use crate::{
    app::{Message, State},
    utils::{KeyEventHelper, center},
};

/// Page: Error
///
/// Displays an error
///
pub struct Error(String);

impl<E: Display> From<E> for Error {
    fn from(value: E) -> Self {
        Self(value.to_string())
    }
}

/// Rendering logic
impl Error {
    pub fn render(&self, frame: &mut Frame, area: Rect, state: &State) {
        let center = center(area, Constraint::Percentage(80), Constraint::Percentage(80));

        let mut lines = vec![
            Line::styled(
                "[Error]",
                Style::new()
                    .bold()
                    .fg(state.config.settings.theme.text.error),
            )
            .centered(),
        ];

        lines.extend(self.0.lines().map(|line| Line::from(line).centered()));

        let text = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::new().padding(Padding::new(0, 0, center.height / 2, 0)));

        frame.render_widget(text, center);
    }

    pub fn render_top(&self, _state: &State) -> Option<Line<'_>> {
        Some(Line::from("<Enter> to start a new test"))
    }

    pub fn handle_events(&self, event: &Event, _state: &State) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
            && key.code == KeyCode::Enter
        {
            return Some(Message::Reset);
        }

        None
    }
}
