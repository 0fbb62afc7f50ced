use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeclscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parsing error: {0}")]
    Parsing(String),
    #[error("Invalid source range: {0}")]
    InvalidRange(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<crate::parser::ParseError> for DeclscopeError {
    fn from(err: crate::parser::ParseError) -> Self {
        DeclscopeError::Parsing(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeclscopeError>;
