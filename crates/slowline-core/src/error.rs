use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read access log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode report table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Errors limit {limit} exceeded: {ratio:.3} of lines did not parse")]
    ErrorsLimitExceeded { limit: f64, ratio: f64 },

    #[error("Analysis error: {0}")]
    Analysis(String),
}

pub type Result<T> = std::result::Result<T, Error>;
