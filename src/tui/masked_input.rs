use ratatui::{
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use zeroize::Zeroizing;

use super::{Component, Key, LineEditor, PromptState};
use crate::model::pin_warning;
use crate::ports::SecretRequest;

const MASK: char = '•';
const PROMPT: &str = "> ";
const FOOTER: &str = "(esc to quit)";

/// Secret entry with inline validation.
///
/// A failed validation keeps the prompt active and shows the message until
/// the next key press.
pub struct MaskedInput<'a> {
    request: SecretRequest<'a>,
    editor: LineEditor,
    error: Option<String>,
    state: PromptState<Zeroizing<String>>,
}

impl<'a> MaskedInput<'a> {
    pub fn new(request: SecretRequest<'a>) -> Self {
        Self {
            request,
            editor: LineEditor::new(),
            error: None,
            state: PromptState::new(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn submit(&mut self) {
        let value = self.editor.value();
        if let Some(validate) = &self.request.validator {
            if let Err(message) = validate(value.as_str()) {
                self.error = Some(message);
                return;
            }
        }
        self.state.submit(value);
    }

    fn input_line(&self) -> Line<'_> {
        let prompt = Span::from(PROMPT).cyan();
        if self.editor.is_empty() {
            Line::from(vec![prompt, Span::from(self.request.placeholder.as_str()).dim()])
        } else {
            let masked: String = std::iter::repeat(MASK).take(self.editor.len()).collect();
            Line::from(vec![prompt, Span::from(masked)])
        }
    }
}

impl Component for MaskedInput<'_> {
    type Output = Zeroizing<String>;

    fn height(&self) -> u16 {
        // title, input, footer, gaps, room for warning and error
        9
    }

    fn render(&self, frame: &mut Frame) {
        let mut lines = vec![Line::from(self.request.title.as_str()).bold(), Line::default()];

        if let Some(warning) = pin_warning(self.request.retries) {
            lines.push(Line::styled(warning, Style::new().fg(Color::Magenta)));
            lines.push(Line::default());
        }
        if let Some(error) = &self.error {
            lines.push(Line::styled(error.as_str(), Style::new().fg(Color::Red)));
            lines.push(Line::default());
        }

        let input_row = lines.len() as u16;
        lines.push(self.input_line());
        lines.push(Line::default());
        lines.push(Line::from(FOOTER).dim());

        let area = frame.area();
        frame.render_widget(Paragraph::new(lines), area);

        if self.state.is_active() {
            let x = area.x + PROMPT.len() as u16 + self.editor.cursor() as u16;
            frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y + input_row));
        }
    }

    fn handle_key(&mut self, key: Key) {
        self.error = None;
        match key {
            Key::Enter => self.submit(),
            other => {
                self.editor.apply(other);
            }
        }
    }

    fn state(&self) -> &PromptState<Zeroizing<String>> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PromptState<Zeroizing<String>> {
        &mut self.state
    }

    fn into_state(self) -> PromptState<Zeroizing<String>> {
        self.state
    }
}
