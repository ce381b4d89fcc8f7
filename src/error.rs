use thiserror::Error as ThisError;

/// Errors surfaced while configuring or writing logs.
///
/// [`setup`](crate::setup) never returns these; it degrades to whatever
/// output still works. They reach callers only through the lower-level
/// constructors such as [`FileHandler::new`](crate::FileHandler::new).
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
    /// The `log` facade is already claimed by another logger.
    #[error("Initialization error: {0}")]
    Init(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
