use ratatui::{
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
    Frame,
};

use super::{Component, Key, PromptState};
use crate::ports::ConfirmRequest;

/// Yes/no prompt that defaults to "no".
///
/// `y` answers immediately; Enter submits the current value, so a stray
/// Enter on a destructive prompt declines.
pub struct Confirmation {
    request: ConfirmRequest,
    value: bool,
    state: PromptState<bool>,
}

impl Confirmation {
    pub fn new(request: ConfirmRequest) -> Self {
        Self {
            request,
            value: false,
            state: PromptState::new(),
        }
    }

    fn choices(&self) -> &'static str {
        if self.value {
            "Confirm? [Y/n]"
        } else {
            "Confirm? [y/N]"
        }
    }
}

impl Component for Confirmation {
    type Output = bool;

    fn height(&self) -> u16 {
        4
    }

    fn render(&self, frame: &mut Frame) {
        let [title, description, _, choices] =
            Layout::vertical([Constraint::Length(1); 4]).areas(frame.area());

        frame.render_widget(Line::from(self.request.title.as_str()).bold().cyan(), title);
        if !self.request.description.is_empty() {
            frame.render_widget(Line::from(self.request.description.as_str()).dim(), description);
        }
        frame.render_widget(Line::from(self.choices()), choices);
    }

    fn handle_key(&mut self, key: Key) {
        match key {
            Key::Char('y' | 'Y') => {
                self.value = true;
                self.state.submit(true);
            }
            Key::Enter => self.state.submit(self.value),
            Key::Char('q') => self.state.cancel(),
            _ => {}
        }
    }

    fn state(&self) -> &PromptState<bool> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PromptState<bool> {
        &mut self.state
    }

    fn into_state(self) -> PromptState<bool> {
        self.state
    }
}
