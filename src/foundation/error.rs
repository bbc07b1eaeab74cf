pub type ReframeResult<T> = Result<T, ReframeError>;

#[derive(thiserror::Error, Debug)]
pub enum ReframeError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    /// Failure reported by an external collaborator (AI summary, capture).
    /// The message is surfaced to the user verbatim.
    #[error("{0}")]
    External(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReframeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    pub fn external(msg: impl Into<String>) -> Self {
        Self::External(msg.into())
    }
}
