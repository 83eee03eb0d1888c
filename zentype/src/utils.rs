use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, BorderType},
};

/// A block with a rounded border
pub const ROUNDED_BLOCK: Block = Block::bordered().border_type(BorderType::Rounded);

pub fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area_horizontal] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical])
        .flex(Flex::Center)
        .areas(area_horizontal);
    area
}

/// Formats whole seconds as `m:ss`
pub fn format_clock(seconds: f64) -> String {
    let seconds = seconds.max(0.0).ceil() as u64;
    format!("{}:{:0>2}", seconds / 60, seconds % 60)
}

/// A trait defining helper methods for keyevents
pub trait KeyEventHelper {
    /// Returns true if the keyevent contains a pressed key
    fn is_press(&self) -> bool;

    /// Returns true if the keyevent contains the given modifiers
    fn has_mods(&self, mods: KeyModifiers) -> bool;

    /// Returns true if the keyevent contains a character that matches the input
    fn is_char(&self, character: char) -> bool;

    /// Returns true if the keyevent matches the given character, and is being pressed
    fn is_press_char(&self, character: char) -> bool {
        self.is_press() && self.is_char(character)
    }

    /// Returns the typed character, if the key is a press of a character without CTRL or ALT
    fn typed_char(&self) -> Option<char>;
}

impl KeyEventHelper for KeyEvent {
    fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }

    fn is_char(&self, character: char) -> bool {
        self.code == KeyCode::Char(character)
    }

    fn has_mods(&self, mods: KeyModifiers) -> bool {
        self.modifiers.intersects(mods)
    }

    fn typed_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(character)
                if self.is_press() && !self.has_mods(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(character)
            }
            _ => None,
        }
    }
}
