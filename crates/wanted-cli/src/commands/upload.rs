//! Evidence upload command.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::Instant;

use crate::cli::UploadArgs;
use crate::error::CliError;
use crate::output::get_formatter;

use wanted_core::config::UploadConfig;
use wanted_core::upload::{upload, UploadRequest};

use super::finish_report;

/// Run the upload command
pub async fn run_upload(
    args: UploadArgs,
    config: &UploadConfig,
    json: bool,
    strict: bool,
) -> Result<(), CliError> {
    let url = args
        .url
        .clone()
        .or_else(|| config.url.clone())
        .ok_or_else(|| {
            CliError::InvalidArgument("No collector URL given (--url or upload.url in config)".to_string())
        })?;

    let compress = resolve_compress(&args, config);
    let ignore_file_open_error = config.ignore_file_open_error && !args.fail_on_missing;
    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.timeout());

    let request = UploadRequest::new(url.clone(), args.files, Instant::now() + timeout)
        .compress(compress)
        .ignore_file_open_error(ignore_file_open_error);
    let file_count = request.files.len();

    let spinner = if json {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Uploading {} file(s) to {}", file_count, url));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    };

    let mut errors = Vec::new();
    let mut stream = upload(request);
    while let Some(err) = stream.next().await {
        if let Some(pb) = &spinner {
            pb.println(format!("  {}", err));
        }
        errors.push(err);
    }

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let formatter = get_formatter(json);
    finish_report("upload", &url, errors, formatter.as_ref(), strict)
}

fn resolve_compress(args: &UploadArgs, config: &UploadConfig) -> bool {
    if args.gzip {
        true
    } else if args.no_gzip {
        false
    } else {
        config.compress
    }
}
