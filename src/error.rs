use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to fetch leads: {0}")]
    Transport(String),

    #[error("Failed to parse JSON file: {0}")]
    Parse(String),

    #[error("{reason}")]
    Schema {
        index: Option<usize>,
        reason: String,
    },

    #[error("Please select a valid JSON file: {0}")]
    UnsupportedFile(String),

    #[error("{0}")]
    Validation(String),

    #[error("Lead not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Project not initialized. Run 'seller init' first.")]
    NotInitialized,

    #[error("Project already initialized at {0}")]
    AlreadyInitialized(String),
}

impl ConsoleError {
    /// Schema failure for the whole payload.
    pub fn schema(reason: impl Into<String>) -> Self {
        ConsoleError::Schema {
            index: None,
            reason: reason.into(),
        }
    }

    /// Schema failure pinned to one element of the payload.
    pub fn schema_at(index: usize, reason: impl Into<String>) -> Self {
        ConsoleError::Schema {
            index: Some(index),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
