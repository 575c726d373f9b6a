/// Crate-wide result alias.
pub type CueTreeResult<T> = Result<T, CueTreeError>;

/// Errors reported by tree construction, traversal setup and scene playback.
#[derive(thiserror::Error, Debug)]
pub enum CueTreeError {
    /// A precondition on an operation or a description file was not met.
    #[error("validation error: {0}")]
    Validation(String),

    /// A graph could not be frozen into a tree.
    #[error("structure error: {0}")]
    Structure(String),

    /// A scene operation was rejected because of its playback state.
    #[error("playback error: {0}")]
    Playback(String),

    /// A description file could not be parsed or written.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its original source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CueTreeError {
    /// Build a [`CueTreeError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CueTreeError::Structure`].
    pub fn structure(msg: impl Into<String>) -> Self {
        Self::Structure(msg.into())
    }

    /// Build a [`CueTreeError::Playback`].
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Build a [`CueTreeError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CueTreeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}
