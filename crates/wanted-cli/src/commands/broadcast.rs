//! LAN broadcast command.

use std::time::Duration;

use tokio::time::Instant;

use crate::cli::BroadcastArgs;
use crate::error::CliError;
use crate::output::get_formatter;

use wanted_core::broadcast::send_broadcast;
use wanted_core::config::BroadcastConfig;

use super::finish_report;

/// Run the broadcast command
pub async fn run_broadcast(
    args: BroadcastArgs,
    config: &BroadcastConfig,
    json: bool,
    strict: bool,
) -> Result<(), CliError> {
    let payload = payload_bytes(&args).await?;
    let address = args.address.clone().unwrap_or_else(|| config.address.clone());
    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.timeout());

    let errors = send_broadcast(None, &address, payload.into(), Instant::now() + timeout)
        .collect()
        .await;

    let formatter = get_formatter(json);
    finish_report("broadcast", &address, errors, formatter.as_ref(), strict)
}

/// Payload from the positional text or `--payload-file`.
async fn payload_bytes(args: &BroadcastArgs) -> Result<Vec<u8>, CliError> {
    match (&args.payload, &args.payload_file) {
        (_, Some(path)) => tokio::fs::read(path).await.map_err(|e| {
            CliError::InvalidArgument(format!(
                "Failed to read payload file '{}': {}",
                path.display(),
                e
            ))
        }),
        (Some(text), None) => Ok(text.clone().into_bytes()),
        (None, None) => Err(CliError::InvalidArgument(
            "A payload or --payload-file is required".to_string(),
        )),
    }
}
