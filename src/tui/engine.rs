//! The prompt loop shared by every interactive component.
//!
//! render → wait for a key → transition, until the component reaches a
//! terminal state. Runs on the caller's thread and owns the terminal until
//! it returns.

use std::io;

use ratatui::Frame;
use tracing::trace;

use super::{Key, PromptState};
use crate::error::{SkmError, SkmResult};
use crate::ports::Outcome;

/// A cooperative UI state machine driven by [`run`]
pub trait Component {
    type Output;

    /// Rows the component needs on screen
    fn height(&self) -> u16;

    fn render(&self, frame: &mut Frame);

    /// Component-specific transition for a non-cancel key
    fn handle_key(&mut self, key: Key);

    fn state(&self) -> &PromptState<Self::Output>;

    fn state_mut(&mut self) -> &mut PromptState<Self::Output>;

    fn into_state(self) -> PromptState<Self::Output>;
}

/// Where prompts draw and read keys from
pub trait PromptTerminal {
    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame)) -> io::Result<()>;

    /// Block until the next key the components understand
    fn next_key(&mut self) -> io::Result<Key>;

    /// Release the screen area once the prompt is over
    fn finish(&mut self) -> io::Result<()>;
}

/// Drive `component` to a terminal state.
///
/// Escape and Ctrl-C cancel every component before it sees the key; any
/// partially entered value is dropped with the component.
pub fn run<C, T>(mut component: C, terminal: &mut T) -> SkmResult<Outcome<C::Output>>
where
    C: Component,
    T: PromptTerminal + ?Sized,
{
    component.state_mut().activate();

    let driven = drive(&mut component, terminal);
    let finished = terminal.finish();
    driven?;
    finished?;

    component.into_state().into_outcome().ok_or_else(|| {
        SkmError::Terminal(io::Error::other("prompt stopped before reaching a result"))
    })
}

fn drive<C, T>(component: &mut C, terminal: &mut T) -> io::Result<()>
where
    C: Component,
    T: PromptTerminal + ?Sized,
{
    loop {
        terminal.draw(&mut |frame| component.render(frame))?;
        if component.state().is_terminal() {
            return Ok(());
        }

        let key = terminal.next_key()?;
        trace!(?key, "prompt key");
        if key.is_cancel() {
            component.state_mut().cancel();
        } else {
            component.handle_key(key);
        }
    }
}
