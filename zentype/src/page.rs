use crossterm::event::Event;
use ratatui::{Frame, layout::Rect, text::Line};

pub mod error;
pub mod history;
pub mod results;
pub mod typing;

pub use error::Error;
pub use history::History;
pub use results::Results;
pub use typing::Typing;

use crate::app::{Message, State};

macro_rules! make_page_enum {
    ($($t:tt),*) => {
        pub enum Page {
            $(
                $t(Box<$t>),
            )*
        }

        $(
            impl From<$t> for Page {
                fn from(value: $t) -> Page {
                    Page::$t(Box::new(value))
                }
            }
        )*
    };
}

make_page_enum!(Typing, Results, History, Error);

impl Page {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &State) {
        match self {
            Self::Typing(page) => page.render(frame, area, state),
            Self::Results(page) => page.render(frame, area, state),
            Self::History(page) => page.render(frame, area, state),
            Self::Error(page) => page.render(frame, area, state),
        }
    }

    pub fn render_top(&mut self, state: &State) -> Option<Line<'_>> {
        match self {
            Self::Typing(page) => page.render_top(state),
            Self::Results(page) => page.render_top(state),
            Self::History(page) => page.render_top(state),
            Self::Error(page) => page.render_top(state),
        }
    }

    pub fn handle_events(&mut self, event: &Event, state: &State) -> Option<Message> {
        match self {
            Self::Typing(page) => page.handle_events(event, state),
            Self::Results(page) => page.handle_events(event, state),
            Self::History(page) => page.handle_events(event, state),
            Self::Error(page) => page.handle_events(event, state),
        }
    }

    pub fn poll(&mut self, state: &State) -> Option<Message> {
        match self {
            Self::Typing(page) => page.poll(state),
            Self::Results(_) => None,
            Self::History(_) => None,
            Self::Error(_) => None,
        }
    }
}
