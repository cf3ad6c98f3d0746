//! Shared core library for the wanted tracking client.
//!
//! Two best-effort, deadline-bound network operations, each reporting
//! through an [`report::ErrorStream`] that ends when the operation is done:
//!
//! - [`upload::upload`] streams evidence files to a collector as one
//!   multipart POST.
//! - [`broadcast::send_broadcast`] announces on every broadcast-capable
//!   interface over UDP.
//!
//! Plus the helpers they are used with: payload encryption, secure delete,
//! hostname parsing and client configuration.

pub mod broadcast;
pub mod config;
pub mod crypto;
pub mod error;
pub mod hostname;
pub mod report;
pub mod shred;
pub mod upload;

pub use error::CoreError;
pub use report::{error_channel, ErrorSink, ErrorStream};
