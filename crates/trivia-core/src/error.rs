use thiserror::Error;
use trivia_db::StoreError;

#[derive(Error, Debug)]
pub enum TriviaError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl TriviaError {
    /// Failure of a write against the store. Writes never surface raw store
    /// errors.
    pub(crate) fn write_failed(err: StoreError) -> Self {
        tracing::warn!(error = %err, "Store rejected write");
        TriviaError::Unprocessable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TriviaError>;
