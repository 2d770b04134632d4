use std::io::{self, IsTerminal};

use zeroize::Zeroizing;

use super::{run, Component, Confirmation, CrosstermTerminal, MaskedInput, SelectionList};
use crate::error::{SkmError, SkmResult};
use crate::ports::{ConfirmRequest, Outcome, Prompter, SecretRequest, TableRow};

/// [`Prompter`] backed by the real terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }

    fn prompt<C: Component>(&self, component: C, hint: &str) -> SkmResult<Outcome<C::Output>> {
        if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
            return Err(SkmError::Terminal(io::Error::other(format!(
                "cannot prompt without a terminal; {hint}"
            ))));
        }
        let mut terminal = CrosstermTerminal::inline(component.height())?;
        run(component, &mut terminal)
    }
}

impl Prompter for TerminalPrompter {
    fn select<'a, R: TableRow>(
        &mut self,
        title: &str,
        rows: &'a [R],
    ) -> SkmResult<Outcome<&'a R>> {
        self.prompt(SelectionList::new(title, rows), "pass --device to choose one")
    }

    fn confirm(&mut self, request: ConfirmRequest) -> SkmResult<Outcome<bool>> {
        self.prompt(Confirmation::new(request), "pass --yes to confirm")
    }

    fn secret(&mut self, request: SecretRequest<'_>) -> SkmResult<Outcome<Zeroizing<String>>> {
        self.prompt(MaskedInput::new(request), "pass the value as a flag")
    }

    fn status(&mut self, message: &str) {
        println!("{message}");
    }
}
