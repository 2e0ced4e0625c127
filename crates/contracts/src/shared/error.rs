use thiserror::Error;

/// Ошибка загрузки data.json
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Transport failure or non-success HTTP status.
    #[error("network error: {0}")]
    Network(String),

    /// The body is not valid JSON.
    #[error("parse error: {0}")]
    Parse(String),
}

impl LoadError {
    /// Both variants surface to the user as the same message.
    pub fn user_message(&self) -> &'static str {
        "امکان بارگیری دروس وجود ندارد"
    }
}
