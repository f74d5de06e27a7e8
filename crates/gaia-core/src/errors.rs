use thiserror::Error;

#[derive(Error, Debug)]
pub enum GaiaError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("backend rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("malformed backend response: {0}")]
    Decode(String),
    #[error("invalid request: {0}")]
    Invalid(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl GaiaError {
    /// True for failures that originate on the far side of the wire.
    pub fn is_backend(&self) -> bool {
        matches!(
            self,
            GaiaError::Transport(_) | GaiaError::Rejected { .. } | GaiaError::Decode(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GaiaError>;
