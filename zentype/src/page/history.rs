use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, ToSpan},
    widgets::{List, Paragraph},
};

use crate::{
    app::{Message, State},
    results::{ResultsError, Summary, TestRecord},
    utils::{KeyEventHelper, ROUNDED_BLOCK, center},
};

/// Page: History
///
/// Shows the stored summary and the most recent results.
#[derive(Debug)]
pub struct History {
    summary: Summary,
    recent: Vec<TestRecord>,
}

impl History {
    pub fn new(state: &State) -> Result<Self, ResultsError> {
        let Some(store) = &state.results else {
            return Ok(Self {
                summary: Summary::default(),
                recent: Vec::new(),
            });
        };

        Ok(Self {
            summary: store.summary()?,
            recent: store.recent_results(state.config.settings.results.recent_limit)?,
        })
    }

    fn format_record(record: &TestRecord) -> String {
        format!(
            "{:<16} | {:>3.0}s | {:>6.1} wpm | {:>5.1}%",
            record.when(),
            record.duration,
            record.wpm,
            record.accuracy
        )
    }
}

// Rendering logic
impl History {
    pub fn render(&self, frame: &mut Frame, area: Rect, state: &State) {
        let area = center(area, Constraint::Percentage(90), Constraint::Percentage(90));

        if self.summary.total_tests == 0 {
            let no_data = Paragraph::new(
                "No results saved yet.\nComplete a typing test to see your history here.",
            )
            .block(ROUNDED_BLOCK.title("History".to_span().bold()))
            .centered();
            frame.render_widget(no_data, area);
            return;
        }

        let [summary_area, list_area] =
            Layout::vertical([Constraint::Length(7), Constraint::Fill(1)]).areas(area);

        let summary = &self.summary;
        let summary_text = Paragraph::new(vec![
            Line::from(format!("Tests taken     : {}", summary.total_tests)),
            Line::from(format!("Best wpm        : {:.2}", summary.best_wpm)),
            Line::from(format!("Average wpm     : {:.2}", summary.average_wpm)),
            Line::from(format!("Average accuracy: {:.2}%", summary.average_accuracy)),
            Line::from(format!("Keystrokes      : {}", summary.total_chars_typed)),
        ])
        .block(ROUNDED_BLOCK.title("Summary".to_span().bold()));

        frame.render_widget(summary_text, summary_area);

        let highlight = state.config.settings.theme.text.highlight;
        let items = self.recent.iter().map(|record| {
            let line = Line::raw(Self::format_record(record));
            if record.wpm >= summary.best_wpm {
                line.style(Style::new().fg(highlight))
            } else {
                line
            }
        });

        let list = List::new(items).block(ROUNDED_BLOCK.title("Recent results".to_span().bold()));
        frame.render_widget(list, list_area);
    }

    pub fn render_top(&self, _state: &State) -> Option<Line<'_>> {
        Some(Line::raw("<Enter> new test"))
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
