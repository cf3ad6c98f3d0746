//! Incremental multipart/form-data writer.
//!
//! Writes boundaries and part headers straight into an `AsyncWrite`; part
//! bodies are copied by the caller through [`MultipartWriter::part_body`], so
//! nothing is buffered beyond the underlying writer.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use uuid::Uuid;

/// Multipart body writer over any async sink.
pub struct MultipartWriter<W> {
    inner: W,
    boundary: String,
    parts: usize,
}

impl<W: AsyncWrite + Unpin> MultipartWriter<W> {
    /// Create a writer with a fresh random boundary.
    pub fn new(inner: W) -> Self {
        Self::with_boundary(inner, random_boundary())
    }

    pub fn with_boundary(inner: W, boundary: String) -> Self {
        Self {
            inner,
            boundary,
            parts: 0,
        }
    }

    /// Value for the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        form_data_content_type(&self.boundary)
    }

    /// Start a file field; the part body follows via [`Self::part_body`].
    pub async fn begin_file_part(&mut self, field: &str, file_name: &str) -> std::io::Result<()> {
        let mut header = String::new();
        if self.parts > 0 {
            header.push_str("\r\n");
        }
        header.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            self.boundary,
            escape_quotes(field),
            escape_quotes(file_name),
        ));
        self.inner.write_all(header.as_bytes()).await?;
        self.parts += 1;
        Ok(())
    }

    /// Sink for the body of the part most recently begun.
    pub fn part_body(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Write the closing boundary and shut the sink down.
    pub async fn finish(mut self) -> std::io::Result<()> {
        let trailer = if self.parts > 0 {
            format!("\r\n--{}--\r\n", self.boundary)
        } else {
            format!("--{}--\r\n", self.boundary)
        };
        self.inner.write_all(trailer.as_bytes()).await?;
        self.inner.flush().await?;
        self.inner.shutdown().await
    }
}

/// `multipart/form-data` content type for `boundary`.
pub fn form_data_content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={}", boundary)
}

fn random_boundary() -> String {
    Uuid::new_v4().simple().to_string()
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
