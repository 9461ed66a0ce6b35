use thiserror::Error;

#[derive(Error, Debug)]
pub enum FengShuiError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Invalid Input: {0}")]
    InvalidInput(String),
}

pub type FsResult<T> = Result<T, FengShuiError>;
