use thiserror::Error;

/// A result type for design of experiments generation
pub type Result<T> = std::result::Result<T, DoeError>;

/// An error when configuring, generating or writing a design of experiments
#[derive(Error, Debug)]
pub enum DoeError {
    /// When configuration is invalid (detected before any generation)
    #[error("Invalid configuration: {0}")]
    InvalidConfigError(String),
    /// When an arithmetic invariant is broken during generation
    #[error("Generation error: {0}")]
    GenerationError(String),
    /// When a value does not allow a computation
    #[error("InvalidValue error: {0}")]
    InvalidValueError(String),
    /// When writing the tabular output fails
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    /// When IO fails
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
