use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    symbols::Marker,
    text::{Line, Span, ToSpan},
    widgets::{Axis, Borders, Chart, Dataset, GraphType, Paragraph},
};
use zentype_core::{Snapshot, TypingSession, history::peak};

use crate::{
    app::{Message, State},
    config::TestDuration,
    page::{History, Typing},
    utils::{KeyEventHelper, ROUNDED_BLOCK},
};

/// Page: Results
///
/// Final numbers of a finished test and how the WPM developed over it.
#[derive(Debug)]
pub struct Results {
    session: TypingSession,
    duration: TestDuration,
    snapshot: Snapshot,
    wpm: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

impl Results {
    pub fn new(session: TypingSession, duration: TestDuration, snapshot: Snapshot) -> Self {
        let interval = session.configuration().history_interval_seconds;
        let samples = session.wpm_history_default();

        let wpm: Vec<(f64, f64)> = samples
            .iter()
            .enumerate()
            .map(|(index, wpm)| (index as f64 * interval, *wpm))
            .collect();

        let last = wpm.last().map_or(0.0, |(time, _)| *time);
        // Leave headroom above the highest sample
        let top = (peak(&samples) * 1.2).max(10.0).ceil();

        Self {
            session,
            duration,
            snapshot,
            wpm,
            x_bounds: [0.0, last.max(1.0)],
            y_bounds: [0.0, top],
        }
    }
}

// Rendering logic
impl Results {
    pub fn render(&self, frame: &mut Frame, area: Rect, state: &State) {
        let [summary, chart] =
            Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)])
                .areas(area);

        let theme = &state.config.settings.theme.plot;

        let dataset = Dataset::default()
            .name("Wpm")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.wpm))
            .data(&self.wpm);

        let wpm_chart = Chart::new(vec![dataset])
            .block(ROUNDED_BLOCK.title("Words/min".to_span().bold()))
            .x_axis(
                Axis::default()
                    .title("Seconds")
                    .style(Style::default().fg(theme.axis))
                    .labels([
                        Span::raw("0"),
                        Span::raw(self.x_bounds[1].trunc().to_string()),
                    ])
                    .bounds(self.x_bounds),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(theme.axis))
                    .labels([
                        Span::raw("0"),
                        Span::raw((self.y_bounds[1] / 2.0).trunc().to_string()),
                        Span::raw(self.y_bounds[1].trunc().to_string()),
                    ])
                    .bounds(self.y_bounds),
            );

        frame.render_widget(wpm_chart, chart);

        let snapshot = &self.snapshot;
        let summary_text = Paragraph::new(vec![
            Line::from(format!("Test          : {}", self.duration)),
            Line::from(format!("Time (Seconds): {:.2}", snapshot.elapsed_time)),
            Line::from(format!("Wpm           : {:.2}", snapshot.wpm)),
            Line::from(format!("Accuracy      : {:.2}%", snapshot.accuracy)),
            Line::from(format!("Correct chars : {}", snapshot.correct_chars)),
            Line::from(format!("Keystrokes    : {}", snapshot.total_chars_typed)),
            Line::from(format!(
                "Progress      : {}/{}",
                snapshot.cursor, snapshot.total_chars_in_test
            )),
        ])
        .block(
            ROUNDED_BLOCK
                .borders(Borders::TOP)
                .title("Summary".to_span().bold()),
        );

        frame.render_widget(summary_text, summary);
    }

    pub fn render_top(&self, _state: &State) -> Option<Line<'_>> {
        Some(Line::raw("<r> retry | <n> new text | <h> history"))
    }

    pub fn handle_events(&self, event: &Event, state: &State) -> Option<Message> {
        let Event::Key(key) = event else {
            return None;
        };

        if key.is_press_char('r') {
            let mut session = self.session.clone();
            session.reset();
            return Some(Message::Show(
                Typing::from_session(session, self.duration, state).into(),
            ));
        }

        if key.is_press_char('n') {
            return Some(Message::Reset);
        }

        if key.is_press_char('h') {
            return Some(match History::new(state) {
                Ok(history) => Message::Show(history.into()),
                Err(error) => Message::Error(Box::new(error)),
            });
        }

        None
    }
}
