//! Error types for the hidreplay CLI

use hidreplay_report::ReportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Input not found: {0}")]
    InputNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Report source error: {0}")]
    Report(#[from] ReportError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl CliError {
    /// Process exit code for this error class.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InputNotFound(_) => 2,
            CliError::InvalidConfiguration(_) | CliError::YamlError(_) => 4,
            CliError::Report(ReportError::InvalidStride(_)) => 4,
            _ => 1,
        }
    }
}
