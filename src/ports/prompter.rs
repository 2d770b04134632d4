use zeroize::Zeroizing;

use crate::error::{SkmError, SkmResult};

/// How an interactive prompt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Submitted(T),
    Cancelled,
}

impl<T> Outcome<T> {
    /// The submitted value, or `UserCancelled`
    pub fn submitted(self) -> SkmResult<T> {
        match self {
            Outcome::Submitted(value) => Ok(value),
            Outcome::Cancelled => Err(SkmError::UserCancelled),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Submitted(value) => Outcome::Submitted(f(value)),
            Outcome::Cancelled => Outcome::Cancelled,
        }
    }
}

/// Projection of an item into the cells of one table row
pub trait TableRow {
    const HEADERS: &'static [&'static str];
    const WIDTHS: &'static [u16];

    fn cells(&self) -> Vec<String>;
}

/// Checks a submitted secret; `Err` carries the message shown inline
pub type Validator<'a> = Box<dyn Fn(&str) -> Result<(), String> + 'a>;

/// Parameters of a masked secret prompt
pub struct SecretRequest<'a> {
    pub title: String,
    pub placeholder: String,
    /// Remaining PIN attempts, when known
    pub retries: Option<u32>,
    pub validator: Option<Validator<'a>>,
}

impl<'a> SecretRequest<'a> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            placeholder: "PIN".to_string(),
            retries: None,
            validator: None,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn retries(mut self, retries: Option<u32>) -> Self {
        self.retries = retries;
        self
    }

    pub fn validate(mut self, validator: impl Fn(&str) -> Result<(), String> + 'a) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }
}

/// Parameters of a yes/no prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub description: String,
}

impl ConfirmRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Capability to ask the user things.
///
/// Orchestrators only talk to the user through this trait, so the terminal
/// front end can be swapped for a scripted one.
pub trait Prompter {
    /// Pick one row. Callers must not pass an empty slice.
    fn select<'a, R: TableRow>(
        &mut self,
        title: &str,
        rows: &'a [R],
    ) -> SkmResult<Outcome<&'a R>>;

    fn confirm(&mut self, request: ConfirmRequest) -> SkmResult<Outcome<bool>>;

    fn secret(&mut self, request: SecretRequest<'_>) -> SkmResult<Outcome<Zeroizing<String>>>;

    /// Progress message that needs no answer
    fn status(&mut self, message: &str);
}
