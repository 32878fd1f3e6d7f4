use thiserror::Error;

/// Errors raised by the index engine
///
/// Only caller mistakes are errors. A document without a recognizable index,
/// or one that satisfies no requirement, is a normal result.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for IndexError {
    fn from(err: serde_json::Error) -> Self {
        IndexError::InvalidInput(format!("malformed JSON: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
