use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Signature '{0}' must start with 'scan<N>'")]
    MissingScan(String),

    #[error("Invalid number '{value}' in signature '{sig}'")]
    BadNumber { sig: String, value: String },

    #[error("Unexpected token '{token}' in signature '{sig}'")]
    UnexpectedToken { sig: String, token: String },
}

#[derive(Error, Debug)]
pub enum TurtleError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Key Signature Error: {0}")]
    Signature(#[from] SignatureError),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type TkResult<T> = Result<T, TurtleError>;
