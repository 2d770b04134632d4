use ratatui::{
    layout::{Constraint, Layout},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Row, Table, TableState},
    Frame,
};

use super::{Component, Key, PromptState};
use crate::ports::TableRow;

const HELP: &str = "↑/↓: move • enter: select • q/esc: quit";
/// Rows visible at once; the table scrolls past this
const VISIBLE_ROWS: usize = 10;

/// Single choice among table rows
pub struct SelectionList<'a, R> {
    title: String,
    rows: &'a [R],
    cursor: usize,
    state: PromptState<&'a R>,
}

impl<'a, R: TableRow> SelectionList<'a, R> {
    pub fn new(title: impl Into<String>, rows: &'a [R]) -> Self {
        Self {
            title: title.into(),
            rows,
            cursor: 0,
            state: PromptState::new(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn last(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    fn visible_rows(&self) -> u16 {
        self.rows.len().clamp(1, VISIBLE_ROWS) as u16
    }
}

impl<'a, R: TableRow> Component for SelectionList<'a, R> {
    type Output = &'a R;

    fn height(&self) -> u16 {
        // title, gap, header, rows, gap, help
        self.visible_rows() + 5
    }

    fn render(&self, frame: &mut Frame) {
        let [title, _, table, _, help] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(self.visible_rows() + 1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(Line::from(self.title.as_str()).bold(), title);

        let header = Row::new(R::HEADERS.iter().copied())
            .style(Style::new().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));
        let rows = self.rows.iter().map(|row| Row::new(row.cells()));
        let widths = R::WIDTHS.iter().map(|w| Constraint::Length(*w));
        let widget = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(Style::new().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut table_state = TableState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(widget, table, &mut table_state);

        frame.render_widget(Line::from(HELP).dim(), help);
    }

    fn handle_key(&mut self, key: Key) {
        match key {
            Key::Up | Key::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            Key::Down | Key::Char('j') => self.cursor = (self.cursor + 1).min(self.last()),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.last(),
            Key::Char('q') => self.state.cancel(),
            Key::Enter => {
                if let Some(row) = self.rows.get(self.cursor) {
                    self.state.submit(row);
                }
            }
            _ => {}
        }
    }

    fn state(&self) -> &PromptState<&'a R> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PromptState<&'a R> {
        &mut self.state
    }

    fn into_state(self) -> PromptState<&'a R> {
        self.state
    }
}
