//! Evidence upload.
//!
//! Streams local files to a collector as a single multipart POST, optionally
//! gzip-compressing each part.

pub mod multipart;
pub mod uploader;

pub use multipart::MultipartWriter;
pub use uploader::{upload, UploadRequest, PIPE_CAPACITY};
