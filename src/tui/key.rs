use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Input event understood by the prompt components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    /// Ctrl-C
    Interrupt,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Backspace,
    Delete,
    /// Ctrl-U
    ClearLine,
}

impl Key {
    /// Keys that cancel any prompt
    pub fn is_cancel(self) -> bool {
        matches!(self, Key::Esc | Key::Interrupt)
    }

    /// Translate a terminal key event. Releases, repeats of modifiers and
    /// unbound chords yield `None`.
    pub fn from_event(event: KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('c') => Some(Key::Interrupt),
                KeyCode::Char('u') => Some(Key::ClearLine),
                KeyCode::Char('a') => Some(Key::Home),
                KeyCode::Char('e') => Some(Key::End),
                _ => None,
            };
        }

        let key = match event.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            _ => return None,
        };
        Some(key)
    }
}

/// Keys for typing `text` one character at a time
pub fn typed(text: &str) -> impl Iterator<Item = Key> + '_ {
    text.chars().map(Key::Char)
}
