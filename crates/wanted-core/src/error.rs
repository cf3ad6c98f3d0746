//! Error types for wanted core.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Any core failure, as surfaced to a caller that handles them uniformly.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Broadcast error: {0}")]
    Broadcast(#[from] BroadcastError),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Secure delete error: {0}")]
    Shred(#[from] ShredError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors reported on an upload's error stream.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Deadline already passed or exceeded")]
    DeadlineExceeded,

    #[error("Invalid upload URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("HTTP client error: {0}")]
    Client(reqwest::Error),

    /// Open failure on a file that was skipped; the upload went on without it.
    #[error("Skipped {}: {source}", path.display())]
    Skipped {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create form part {field}: {source}")]
    Part {
        field: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to stream {}: {source}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to finalize multipart body: {0}")]
    Finalize(#[source] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Collector responded with HTTP {status}")]
    Status { status: reqwest::StatusCode },

    #[error("Body producer task failed: {0}")]
    Producer(String),
}

impl UploadError {
    /// True when the upload carried on after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, UploadError::Skipped { .. })
    }
}

/// Errors reported on a broadcast's error stream.
#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("Deadline already passed")]
    DeadlineExceeded,

    #[error("Invalid source address '{address}': {message}")]
    InvalidAddress { address: String, message: String },

    #[error("Socket setup failed: {0}")]
    Socket(#[source] std::io::Error),

    #[error("Failed to enumerate interfaces: {0}")]
    Interfaces(#[source] std::io::Error),

    #[error("Failed to list addresses of {interface}: {source}")]
    Addresses {
        interface: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Send to {target} failed: {source}")]
    Send {
        target: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Send to {target} timed out")]
    Timeout { target: SocketAddr },
}

impl BroadcastError {
    /// True when the broadcast carried on after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BroadcastError::Addresses { .. } | BroadcastError::Send { .. }
        )
    }
}

/// Payload encryption errors
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Encryption failed")]
    Encrypt,

    #[error("Ciphertext is {0} bytes, shorter than its nonce")]
    Truncated(usize),

    #[error("Authentication failed: wrong password or corrupted data")]
    Authentication,
}

/// Secure delete errors
#[derive(Debug, Error)]
pub enum ShredError {
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to overwrite {}: {source}", path.display())]
    Overwrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config value {field}: {message}")]
    InvalidValue { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_is_recoverable() {
        let err = UploadError::Skipped {
            path: PathBuf::from("/missing"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.is_recoverable());
        assert!(format!("{}", err).contains("/missing"));

        let fatal = UploadError::Open {
            path: PathBuf::from("/missing"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(!fatal.is_recoverable());
        assert!(!UploadError::DeadlineExceeded.is_recoverable());
    }

    #[test]
    fn test_broadcast_timeout_is_fatal() {
        let target: SocketAddr = "192.168.1.255:3333".parse().unwrap();
        let send = BroadcastError::Send {
            target,
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(send.is_recoverable());
        assert!(!BroadcastError::Timeout { target }.is_recoverable());
        assert!(!BroadcastError::DeadlineExceeded.is_recoverable());
    }

    #[test]
    fn test_core_error_from_crypto_error() {
        let err = CoreError::from(CryptoError::Authentication);
        assert!(format!("{}", err).contains("Authentication failed"));
    }
}
