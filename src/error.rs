use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Null argument: {0}")]
    NullArgument(&'static str),

    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("Name contains a NUL byte: {0}")]
    InteriorNul(String),
}

impl From<serde_json::Error> for NamingError {
    fn from(e: serde_json::Error) -> Self {
        NamingError::Config(e.to_string())
    }
}
