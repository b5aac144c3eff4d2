use lhcube_doe::DoeError;
use thiserror::Error;

/// A result type for the command line tool
pub type Result<T> = std::result::Result<T, LhcubeError>;

/// An error raised while turning command line arguments into a written design
#[derive(Error, Debug)]
pub enum LhcubeError {
    /// When a command line value cannot be parsed or is inconsistent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// When the output file cannot be created at the requested location
    #[error("Invalid output path {path}: {reason}")]
    InvalidOutput {
        /// Requested output path
        path: String,
        /// Why the file cannot be written
        reason: String,
    },
    /// When configuring, generating or writing the design fails
    #[error(transparent)]
    DoeError(#[from] DoeError),
    /// When IO fails
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// When the written temporary file cannot be moved to the output path
    #[error("Cannot persist output: {0}")]
    PersistError(#[from] tempfile::PersistError),
}
