use std::path::PathBuf;
use thiserror::Error;

/// Errors raised before any files are read or written
#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("Seed directory '{}' does not exist or is not a directory.", .0.display())]
    SeedDirNotFound(PathBuf),

    #[error("Seed directory '{}' does not exist or is not a directory.", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
