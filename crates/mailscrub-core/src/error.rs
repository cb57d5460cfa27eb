use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// A record field holds something other than text (NULL, binary, out of range)
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
