//! Headless terminal for driving components in tests

use std::collections::VecDeque;
use std::io;

use ratatui::{backend::TestBackend, Frame, Terminal};

use super::{Key, PromptTerminal};

const WIDTH: u16 = 120;
const HEIGHT: u16 = 16;

/// Replays a fixed key script and keeps a text copy of every frame
pub struct ScriptedTerminal {
    terminal: Terminal<TestBackend>,
    keys: VecDeque<Key>,
    frames: Vec<String>,
    finished: bool,
}

impl ScriptedTerminal {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        let terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT))
            .expect("test backend never fails to initialize");
        Self {
            terminal,
            keys: keys.into_iter().collect(),
            frames: Vec::new(),
            finished: false,
        }
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn remaining_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn snapshot(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }
}

impl PromptTerminal for ScriptedTerminal {
    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame)) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame))?;
        let frame = self.snapshot();
        self.frames.push(frame);
        Ok(())
    }

    fn next_key(&mut self) -> io::Result<Key> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted"))
    }

    fn finish(&mut self) -> io::Result<()> {
        self.finished = true;
        Ok(())
    }
}
