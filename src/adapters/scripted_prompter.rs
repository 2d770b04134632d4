//! A [`Prompter`] that replays canned answers, for use-case tests

use std::collections::VecDeque;

use zeroize::Zeroizing;

use crate::error::SkmResult;
use crate::model::pin_warning;
use crate::ports::{ConfirmRequest, Outcome, Prompter, SecretRequest, TableRow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Pick the row at this index
    Select(usize),
    Confirm(bool),
    Secret(String),
    /// Abort whichever prompt comes next
    Cancel,
}

impl Answer {
    pub fn secret(value: &str) -> Self {
        Answer::Secret(value.to_string())
    }
}

/// A prompt that was shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asked {
    Select {
        title: String,
        rows: usize,
    },
    Confirm {
        title: String,
    },
    Secret {
        title: String,
        warning: Option<&'static str>,
        /// What the validator said about the scripted answer
        verdict: Option<Result<(), String>>,
    },
}

/// Scripted answers are submitted even when a validator rejects them, the
/// verdict is recorded in [`Asked::Secret`].
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    asked: Vec<Asked>,
    statuses: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn asked(&self) -> &[Asked] {
        &self.asked
    }

    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }

    pub fn selections(&self) -> usize {
        self.asked
            .iter()
            .filter(|a| matches!(a, Asked::Select { .. }))
            .count()
    }

    pub fn secret_titles(&self) -> Vec<&str> {
        self.asked
            .iter()
            .filter_map(|a| match a {
                Asked::Secret { title, .. } => Some(title.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn unused(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Answer {
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer left for {prompt}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn select<'a, R: TableRow>(
        &mut self,
        title: &str,
        rows: &'a [R],
    ) -> SkmResult<Outcome<&'a R>> {
        self.asked.push(Asked::Select {
            title: title.to_string(),
            rows: rows.len(),
        });
        match self.next(title) {
            Answer::Select(index) => Ok(Outcome::Submitted(&rows[index])),
            Answer::Cancel => Ok(Outcome::Cancelled),
            other => panic!("expected a selection for {title}, scripted {other:?}"),
        }
    }

    fn confirm(&mut self, request: ConfirmRequest) -> SkmResult<Outcome<bool>> {
        self.asked.push(Asked::Confirm {
            title: request.title.clone(),
        });
        match self.next(&request.title) {
            Answer::Confirm(value) => Ok(Outcome::Submitted(value)),
            Answer::Cancel => Ok(Outcome::Cancelled),
            other => panic!("expected a confirmation for {}, scripted {other:?}", request.title),
        }
    }

    fn secret(&mut self, request: SecretRequest<'_>) -> SkmResult<Outcome<Zeroizing<String>>> {
        let answer = self.next(&request.title);
        let verdict = match (&answer, &request.validator) {
            (Answer::Secret(value), Some(validate)) => Some(validate(value)),
            _ => None,
        };
        self.asked.push(Asked::Secret {
            title: request.title.clone(),
            warning: pin_warning(request.retries),
            verdict,
        });
        match answer {
            Answer::Secret(value) => Ok(Outcome::Submitted(Zeroizing::new(value))),
            Answer::Cancel => Ok(Outcome::Cancelled),
            other => panic!("expected a secret for {}, scripted {other:?}", request.title),
        }
    }

    fn status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }
}
