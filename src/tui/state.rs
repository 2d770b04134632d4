use crate::ports::Outcome;

/// Lifecycle shared by every prompt component.
///
/// `Submitted` and `Cancelled` are terminal: once reached, every further
/// transition is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptState<T> {
    Idle,
    Active,
    Submitted(T),
    Cancelled,
}

impl<T> PromptState<T> {
    pub fn new() -> Self {
        PromptState::Idle
    }

    pub fn activate(&mut self) {
        if matches!(self, PromptState::Idle) {
            *self = PromptState::Active;
        }
    }

    pub fn submit(&mut self, value: T) {
        if self.is_active() {
            *self = PromptState::Submitted(value);
        }
    }

    pub fn cancel(&mut self) {
        if self.is_active() {
            *self = PromptState::Cancelled;
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, PromptState::Active)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PromptState::Submitted(_) | PromptState::Cancelled)
    }

    /// `None` while the prompt is still running
    pub fn into_outcome(self) -> Option<Outcome<T>> {
        match self {
            PromptState::Submitted(value) => Some(Outcome::Submitted(value)),
            PromptState::Cancelled => Some(Outcome::Cancelled),
            PromptState::Idle | PromptState::Active => None,
        }
    }
}

impl<T> Default for PromptState<T> {
    fn default() -> Self {
        Self::new()
    }
}
