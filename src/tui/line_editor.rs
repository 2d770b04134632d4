use zeroize::{Zeroize, Zeroizing};

use super::Key;

/// Single-line text buffer with a cursor, wiped on drop
#[derive(Default)]
pub struct LineEditor {
    chars: Zeroizing<Vec<char>>,
    /// Index into `chars`, in `0..=chars.len()`
    cursor: usize,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn value(&self) -> Zeroizing<String> {
        Zeroizing::new(self.chars.iter().collect())
    }

    /// Apply an editing key; returns whether the key was an edit
    pub fn apply(&mut self, key: Key) -> bool {
        match key {
            Key::Char(c) if !c.is_control() => {
                self.chars.insert(self.cursor, c);
                self.cursor += 1;
            }
            Key::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.chars.remove(self.cursor);
            }
            Key::Delete if self.cursor < self.chars.len() => {
                self.chars.remove(self.cursor);
            }
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(self.chars.len()),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.chars.len(),
            Key::ClearLine => {
                self.chars.zeroize();
                self.cursor = 0;
            }
            _ => return false,
        }
        true
    }
}
