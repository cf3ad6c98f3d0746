//! wanted CLI - evidence upload and LAN announce from the terminal.
//!
//! Each fan-out command drains its operation's error stream and prints a
//! report; the exit code tells a clean run from a degraded or aborted one.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod types;

use clap::Parser;

use cli::{Cli, Commands};
use error::{exit_codes, CliError};
use wanted_core::config::ClientConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ClientConfig::load_or_default(cli.config.as_deref())?;
    tracing::debug!("Loaded config: {:?}", config);

    match cli.command {
        Commands::Upload(args) => {
            commands::run_upload(args, &config.upload, cli.json, cli.strict).await
        }
        Commands::Broadcast(args) => {
            commands::run_broadcast(args, &config.broadcast, cli.json, cli.strict).await
        }
        Commands::Encrypt(args) => commands::run_encrypt(args, cli.json).await,
        Commands::Decrypt(args) => commands::run_decrypt(args, cli.json).await,
        Commands::Shred(args) => commands::run_shred(args, cli.json).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_upload() {
        let cli = Cli::try_parse_from([
            "wanted",
            "--strict",
            "upload",
            "--url",
            "http://collector/upload",
            "--gzip",
            "a.db",
            "b.log",
        ])
        .unwrap();
        assert!(cli.strict);
        match cli.command {
            Commands::Upload(args) => {
                assert_eq!(args.files.len(), 2);
                assert!(args.gzip);
                assert_eq!(args.url.as_deref(), Some("http://collector/upload"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_gzip_flags_conflict() {
        assert!(Cli::try_parse_from(["wanted", "upload", "--gzip", "--no-gzip", "a"]).is_err());
    }

    #[test]
    fn test_broadcast_needs_payload() {
        assert!(Cli::try_parse_from(["wanted", "broadcast"]).is_err());
        assert!(Cli::try_parse_from(["wanted", "broadcast", "hello"]).is_ok());
        assert!(Cli::try_parse_from(["wanted", "broadcast", "--payload-file", "p.bin"]).is_ok());
    }
}
