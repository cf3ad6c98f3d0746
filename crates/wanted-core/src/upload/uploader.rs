//! Streaming multi-file upload to an evidence collector.

use std::path::{Path, PathBuf};

use async_compression::tokio::bufread::GzipEncoder;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Body, Client, Url};
use tokio::fs::File;
use tokio::io::{AsyncWrite, BufReader, DuplexStream};
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use super::multipart::MultipartWriter;
use crate::error::UploadError;
use crate::report::{deadline_pending, error_channel, ErrorSink, ErrorStream};

/// Capacity of the in-memory pipe between the body producer and the transport.
pub const PIPE_CAPACITY: usize = 64 * 1024;

/// A single upload: which files, where to, and how.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub files: Vec<PathBuf>,
    pub url: String,
    /// Reused when set; otherwise a default client is built for this call.
    pub client: Option<Client>,
    pub ignore_file_open_error: bool,
    pub compress: bool,
    pub deadline: Instant,
}

impl UploadRequest {
    pub fn new(url: impl Into<String>, files: Vec<PathBuf>, deadline: Instant) -> Self {
        Self {
            files,
            url: url.into(),
            client: None,
            ignore_file_open_error: false,
            compress: false,
            deadline,
        }
    }

    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn ignore_file_open_error(mut self, ignore: bool) -> Self {
        self.ignore_file_open_error = ignore;
        self
    }

    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Upload `request.files` as one multipart POST.
///
/// Must be called within a Tokio runtime. Returns immediately; the upload is
/// finished once the returned stream ends.
pub fn upload(request: UploadRequest) -> ErrorStream<UploadError> {
    let (sink, stream) = error_channel();
    tokio::spawn(async move {
        if let Err(e) = post_files(request, &sink).await {
            sink.report(e);
        }
    });
    stream
}

/// Run the upload; the returned error is the terminal one.
async fn post_files(request: UploadRequest, sink: &ErrorSink<UploadError>) -> Result<(), UploadError> {
    let UploadRequest {
        files,
        url,
        client,
        ignore_file_open_error,
        compress,
        deadline,
    } = request;

    if !deadline_pending(deadline) {
        return Err(UploadError::DeadlineExceeded);
    }
    let url = parse_url(&url)?;
    let client = match client {
        Some(c) => c,
        None => Client::builder().build().map_err(UploadError::Client)?,
    };

    let (reader, writer) = tokio::io::duplex(PIPE_CAPACITY);
    let form = MultipartWriter::new(writer);
    let content_type = form.content_type();

    info!("Uploading {} file(s) to {}", files.len(), url);

    let options = PartOptions {
        ignore_file_open_error,
        compress,
    };
    let mut producer = tokio::spawn(write_form(form, files, options, sink.clone()));

    let body = Body::wrap_stream(ReaderStream::new(reader));
    let send = client
        .post(url)
        .header(CONTENT_TYPE, content_type)
        .body(body)
        .send();

    let response = match timeout_at(deadline, send).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            abandon(producer).await;
            return Err(UploadError::Transport(e));
        }
        Err(_) => {
            abandon(producer).await;
            return Err(UploadError::DeadlineExceeded);
        }
    };

    let status = response.status();
    drop(response);
    debug!("Collector answered HTTP {}", status);

    // A failed producer sent a truncated body; its error explains the status.
    let produced = timeout_at(deadline, &mut producer).await;
    match produced {
        Ok(Ok(result)) => result?,
        Ok(Err(e)) => return Err(UploadError::Producer(e.to_string())),
        Err(_) => {
            abandon(producer).await;
            return Err(UploadError::DeadlineExceeded);
        }
    }

    if !status.is_success() {
        return Err(UploadError::Status { status });
    }
    Ok(())
}

/// Stop the body producer and wait for it so it reports nothing further.
async fn abandon(producer: JoinHandle<Result<(), UploadError>>) {
    producer.abort();
    let _ = producer.await;
}

fn parse_url(raw: &str) -> Result<Url, UploadError> {
    let url = Url::parse(raw).map_err(|e| UploadError::InvalidUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UploadError::InvalidUrl {
            url: raw.to_string(),
            message: format!("unsupported scheme '{}'", other),
        }),
    }
}

#[derive(Debug, Clone, Copy)]
struct PartOptions {
    ignore_file_open_error: bool,
    compress: bool,
}

/// Body producer: one part per openable file, then the closing boundary.
async fn write_form(
    mut form: MultipartWriter<DuplexStream>,
    files: Vec<PathBuf>,
    options: PartOptions,
    sink: ErrorSink<UploadError>,
) -> Result<(), UploadError> {
    for (index, path) in files.into_iter().enumerate() {
        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(source) if options.ignore_file_open_error => {
                debug!("Skipping {}: {}", path.display(), source);
                sink.report(UploadError::Skipped { path, source });
                continue;
            }
            Err(source) => return Err(UploadError::Open { path, source }),
        };

        let field = format!("file{}", index);
        form.begin_file_part(&field, &base_name(&path))
            .await
            .map_err(|source| UploadError::Part {
                field: field.clone(),
                source,
            })?;

        let copied = copy_part(file, form.part_body(), options.compress)
            .await
            .map_err(|source| UploadError::Copy {
                path: path.clone(),
                source,
            })?;
        debug!("Wrote {} ({} bytes) as {}", path.display(), copied, field);
    }

    form.finish().await.map_err(UploadError::Finalize)
}

async fn copy_part<W>(file: File, part: &mut W, compress: bool) -> std::io::Result<u64>
where
    W: AsyncWrite + Unpin,
{
    if compress {
        let mut encoder = GzipEncoder::new(BufReader::new(file));
        tokio::io::copy(&mut encoder, part).await
    } else {
        let mut file = file;
        tokio::io::copy(&mut file, part).await
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
