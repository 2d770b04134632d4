use std::io::{self, Stderr};

use crossterm::{
    event::{self, Event},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal, TerminalOptions, Viewport};
use tracing::warn;

use super::{Key, PromptTerminal};

/// Raw mode for as long as the guard lives
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("failed to restore terminal mode: {e}");
        }
    }
}

/// Inline prompt area on stderr, below whatever was printed before.
///
/// Stdout stays free for command output.
pub struct CrosstermTerminal {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    // dropped after the terminal
    _raw: RawMode,
}

impl CrosstermTerminal {
    pub fn inline(height: u16) -> io::Result<Self> {
        let raw = RawMode::enable()?;
        let terminal = Terminal::with_options(
            CrosstermBackend::new(io::stderr()),
            TerminalOptions {
                viewport: Viewport::Inline(height),
            },
        )?;
        Ok(Self { terminal, _raw: raw })
    }
}

impl PromptTerminal for CrosstermTerminal {
    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame)) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame))?;
        Ok(())
    }

    fn next_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(event) = event::read()? {
                if let Some(key) = Key::from_event(event) {
                    return Ok(key);
                }
            }
        }
    }

    fn finish(&mut self) -> io::Result<()> {
        self.terminal.clear()?;
        self.terminal.show_cursor()
    }
}
