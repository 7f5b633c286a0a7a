use thiserror::Error;

/// Errors surfaced by the mapper.
///
/// Markup problems are never errors: every extraction stage treats them as
/// "nothing found". Only unusable inputs and I/O while loading configuration
/// or snapshots are reported.
#[derive(Debug, Error)]
pub enum Error {
    /// Input that cannot be used at all (bad base URL, bad configuration value)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
