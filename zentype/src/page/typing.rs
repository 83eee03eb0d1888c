use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph, Wrap},
};
use tracing::{debug, warn};
use zentype_core::{CharacterStatus, Snapshot, TypingSession, config::Configuration};

use crate::{
    app::{Message, State},
    config::{TestDuration, theme::TextTheme},
    page::Results,
    results::TestRecord,
    utils::{KeyEventHelper, center, format_clock},
    words::WordProvider,
};

/// Page: Typing
///
/// Runs one test. Metrics shown while typing are refreshed on the configured poll interval.
#[derive(Debug)]
pub struct Typing {
    session: TypingSession,
    duration: TestDuration,
    live: Snapshot,
    last_refresh: Instant,
    refresh_interval: Duration,
}

impl Typing {
    /// Creates a test over a freshly generated text
    pub fn new(state: &State) -> Self {
        let duration = state.duration;
        let word_count = state
            .word_count
            .unwrap_or_else(|| WordProvider::word_count_for_duration(duration.seconds()));
        let text = WordProvider::generate_text(word_count, &mut rand::thread_rng());

        let session = TypingSession::new(&text, duration.seconds() as f64).with_configuration(
            Configuration {
                history_interval_seconds: state.config.settings.history_interval_seconds,
            },
        );

        debug!(%duration, words = word_count, "New test");
        Self::from_session(session, duration, state)
    }

    /// Creates a test from an existing session, e.g. a retried one
    pub fn from_session(session: TypingSession, duration: TestDuration, state: &State) -> Self {
        Self {
            live: session.snapshot(),
            last_refresh: Instant::now(),
            refresh_interval: Duration::from_millis(state.config.settings.poll_interval_ms),
            duration,
            session,
        }
    }

    /// Ends the test and moves on to its results
    fn complete(&mut self, state: &State) -> Message {
        let snapshot = self.session.finish();

        if let Some(store) = &state.results
            && let Err(error) = store.add_result(TestRecord::from(&snapshot))
        {
            warn!(%error, "Failed to save result");
        }

        Message::Show(Results::new(self.session.clone(), self.duration, snapshot).into())
    }

    fn styled_text(&self, theme: &TextTheme) -> Line<'_> {
        let cursor = self.session.cursor();

        self.session
            .target()
            .as_slice()
            .iter()
            .enumerate()
            .map(|(index, character)| {
                let style = match self.session.character_status(index) {
                    CharacterStatus::Correct => Style::new().fg(theme.correct),
                    CharacterStatus::Error => Style::new().fg(theme.error).underlined(),
                    CharacterStatus::Unwritten if index == cursor => {
                        Style::new().fg(theme.highlight).underlined()
                    }
                    CharacterStatus::Unwritten => Style::new().fg(theme.untyped),
                };
                Span::styled(character.to_string(), style)
            })
            .collect()
    }
}

// Rendering logic
impl Typing {
    pub fn render(&self, frame: &mut Frame, area: Rect, state: &State) {
        let line = self.styled_text(&state.config.settings.theme.text);

        let paragraph = Paragraph::new(line)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });

        let center = center(area, Constraint::Percentage(80), Constraint::Percentage(80));
        let block = Block::new().padding(Padding::new(0, 0, center.height / 3, 0));

        frame.render_widget(paragraph.block(block), center);
    }

    pub fn render_top(&self, _state: &State) -> Option<Line<'_>> {
        let remaining = format_clock(self.session.time_remaining());

        if self.session.typed_count() == 0 {
            return Some(Line::raw(format!(
                "{remaining} | <Left/Right> {} | <Tab> new text",
                self.duration
            )));
        }

        Some(Line::raw(format!(
            "{remaining} | WPM: {:.0} | Accuracy: {:.0}%",
            self.live.wpm, self.live.accuracy
        )))
    }

    pub fn poll(&mut self, state: &State) -> Option<Message> {
        if self.session.is_completed() {
            return Some(self.complete(state));
        }

        if self.last_refresh.elapsed() >= self.refresh_interval {
            self.live = self.session.snapshot();
            self.last_refresh = Instant::now();
        }

        None
    }

    pub fn handle_events(&mut self, event: &Event, _state: &State) -> Option<Message> {
        let Event::Key(key) = event else {
            return None;
        };

        if let Some(character) = key.typed_char() {
            self.session.apply_keypress(character);
            return None;
        }

        if !key.is_press() {
            return None;
        }

        match key.code {
            KeyCode::Backspace => {
                self.session.apply_backspace();
                None
            }
            KeyCode::Tab => Some(Message::Reset),
            KeyCode::Left => Some(Message::SetDuration(self.duration.previous())),
            KeyCode::Right => Some(Message::SetDuration(self.duration.next())),
            _ => None,
        }
    }
}
