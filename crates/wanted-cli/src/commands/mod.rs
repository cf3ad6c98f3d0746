//! Command implementations.

pub mod broadcast;
pub mod crypt;
pub mod shred;
pub mod upload;

pub use broadcast::run_broadcast;
pub use crypt::{run_decrypt, run_encrypt};
pub use shred::run_shred;
pub use upload::run_upload;

use std::fmt::Display;

use wanted_core::error::{BroadcastError, CoreError, UploadError};

use crate::error::CliError;
use crate::output::OutputFormatter;
use crate::types::{OperationReport, ReportedError};

/// An item of an operation's error stream.
pub(crate) trait StreamError: Display + Into<CoreError> {
    fn is_recoverable(&self) -> bool;
}

impl StreamError for UploadError {
    fn is_recoverable(&self) -> bool {
        UploadError::is_recoverable(self)
    }
}

impl StreamError for BroadcastError {
    fn is_recoverable(&self) -> bool {
        BroadcastError::is_recoverable(self)
    }
}

/// Print the report of a drained error stream and map it to an exit status.
///
/// The first fatal error fails the command; recoverable ones only with
/// `strict`.
pub(crate) fn finish_report<E: StreamError>(
    operation: &str,
    target: &str,
    errors: Vec<E>,
    formatter: &dyn OutputFormatter,
    strict: bool,
) -> Result<(), CliError> {
    let mut fatal: Option<CoreError> = None;
    let mut reported = Vec::with_capacity(errors.len());
    for err in errors {
        let recoverable = err.is_recoverable();
        reported.push(ReportedError {
            message: err.to_string(),
            recoverable,
        });
        if !recoverable && fatal.is_none() {
            fatal = Some(err.into());
        }
    }

    let report = OperationReport::new(operation, target, reported);
    println!("{}", formatter.format_report(&report));

    if let Some(fatal) = fatal {
        return Err(CliError::Core(fatal));
    }
    if strict && !report.errors.is_empty() {
        return Err(CliError::PartialFailure {
            failed: report.errors.len(),
        });
    }
    Ok(())
}
