//! Interactive prompts
//!
//! Every prompt is a [`Component`]: a small state machine that renders
//! itself and reacts to keys. [`run`] is the one event loop that drives
//! them, so cancellation and terminal handling behave the same for all of
//! them.

mod confirm;
mod engine;
pub mod key;
mod line_editor;
mod masked_input;
mod prompter;
mod select;
mod state;
mod terminal;

#[cfg(test)]
pub(crate) mod testing;

pub use confirm::Confirmation;
pub use engine::{run, Component, PromptTerminal};
pub use key::Key;
pub use line_editor::LineEditor;
pub use masked_input::MaskedInput;
pub use prompter::TerminalPrompter;
pub use select::SelectionList;
pub use state::PromptState;
pub use terminal::CrosstermTerminal;
