use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use ratatui::{Frame, style::Stylize, text::ToLine, widgets::Padding};
use tracing::{info, warn};

use crate::config::{Config, TestDuration};
use crate::page;
use crate::results::ResultsStore;
use crate::utils::ROUNDED_BLOCK;

/// How long the event loop waits for input before redrawing
const FRAME_TIME: Duration = Duration::from_millis(16);

/// An app message
pub enum Message {
    /// An error occurred
    Error(Box<dyn std::error::Error + Send>),
    /// Show a specific page
    Show(page::Page),
    /// Switch the test duration and start over with a new text
    SetDuration(TestDuration),
    /// Start over with a new text
    Reset,
    /// Quit the application
    Quit,
}

/// What the pages can read
pub struct State {
    pub config: Config,
    /// `None` when saving is disabled or the store could not be opened
    pub results: Option<ResultsStore>,
    /// The duration new tests are started with
    pub duration: TestDuration,
    /// Overrides the generated text length
    pub word_count: Option<usize>,
}

impl State {
    pub fn new(config: Config) -> Self {
        let results = if config.settings.results.save_enabled {
            ResultsStore::open(&config.results_dir())
                .inspect_err(|error| warn!(%error, "Results will not be saved"))
                .ok()
        } else {
            None
        };

        Self {
            duration: config.settings.duration,
            word_count: config.settings.word_count,
            results,
            config,
        }
    }
}

/// The app itself
pub struct App {
    page: page::Page,
    state: State,
}

impl App {
    /// Creates a new `App`
    pub fn new(state: State) -> Self {
        Self {
            page: page::Typing::new(&state).into(),
            state,
        }
    }

    /// Runs the app
    pub fn run(&mut self) -> std::io::Result<()> {
        let mut terminal = ratatui::init();

        execute!(stdout(), SetCursorStyle::SteadyBar)?;
        info!(duration = %self.state.duration, "Terminal UI started");

        loop {
            let event = event::poll(FRAME_TIME)?.then(event::read).transpose()?;
            if let Some(message) = self.handle_events(event) {
                match message {
                    Message::Error(error) => self.page = page::Error::from(error).into(),
                    Message::Show(page) => self.page = page,
                    Message::SetDuration(duration) => {
                        self.state.duration = duration;
                        self.page = page::Typing::new(&self.state).into();
                    }
                    Message::Reset => self.page = page::Typing::new(&self.state).into(),
                    Message::Quit => break,
                }
            }
            terminal.draw(|frame| self.draw(frame))?;
        }

        ratatui::restore();
        info!("Terminal UI stopped");

        Ok(())
    }

    /// Draws the next frame
    fn draw(&mut self, frame: &mut Frame) {
        let mut block = ROUNDED_BLOCK
            .padding(Padding::new(1, 1, 0, 0))
            .title_top("ZENTYPE".to_line().bold().centered())
            .title_top("<CTRL-Q> to exit".to_line().right_aligned());

        if let Some(top_msg) = self.page.render_top(&self.state) {
            block = block.title_top(top_msg);
        }

        let area = frame.area();
        let content = block.inner(area);

        frame.render_widget(block, area);

        self.page.render(frame, content, &self.state);
    }

    /// Global event handler
    fn handle_events(&mut self, event_opt: Option<Event>) -> Option<Message> {
        event_opt
            .and_then(|event| {
                let global = match &event {
                    Event::Key(key) => Self::handle_key_event(*key),
                    _ => None,
                };
                global.or_else(|| self.page.handle_events(&event, &self.state))
            })
            .or_else(|| self.page.poll(&self.state))
    }

    /// Global key events
    ///
    /// Checked before the page, so typing can never swallow them.
    const fn handle_key_event(key: KeyEvent) -> Option<Message> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => Some(Message::Quit),
            (KeyCode::Esc, KeyModifiers::NONE) => Some(Message::Reset),
            _ => None,
        }
    }
}
