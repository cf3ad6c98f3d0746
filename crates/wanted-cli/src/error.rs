//! Error types for the wanted CLI.
//!
//! CliError wraps CoreError from the shared library and adds CLI-specific variants.

use thiserror::Error;
use wanted_core::error::{BroadcastError, CoreError, UploadError};

// Re-export core error types so command modules can use them via crate::error
pub use wanted_core::error::{ConfigError, CryptoError, ShredError};

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NETWORK_ERROR: i32 = 2;
    pub const INVALID_ARGS: i32 = 4;
    pub const PARTIAL_FAILURE: i32 = 5;
    pub const OPERATION_FAILED: i32 = 6;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Partial failure: {failed} item(s) failed")]
    PartialFailure { failed: usize },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(e) => match e {
                CoreError::Upload(UploadError::InvalidUrl { .. })
                | CoreError::Broadcast(BroadcastError::InvalidAddress { .. }) => {
                    exit_codes::INVALID_ARGS
                }
                CoreError::Upload(
                    UploadError::DeadlineExceeded
                    | UploadError::Transport(_)
                    | UploadError::Status { .. },
                )
                | CoreError::Broadcast(_) => exit_codes::NETWORK_ERROR,
                CoreError::Upload(_) => exit_codes::OPERATION_FAILED,
                CoreError::Config(_) => exit_codes::INVALID_ARGS,
                _ => exit_codes::GENERAL_ERROR,
            },
            CliError::Io(_) => exit_codes::GENERAL_ERROR,
            CliError::InvalidArgument(_) => exit_codes::INVALID_ARGS,
            CliError::PartialFailure { .. } => exit_codes::PARTIAL_FAILURE,
        }
    }
}

// Conversions from core error subtypes to CliError
impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Core(CoreError::Config(e))
    }
}

impl From<CryptoError> for CliError {
    fn from(e: CryptoError) -> Self {
        CliError::Core(CoreError::Crypto(e))
    }
}

impl From<ShredError> for CliError {
    fn from(e: ShredError) -> Self {
        CliError::Core(CoreError::Shred(e))
    }
}
