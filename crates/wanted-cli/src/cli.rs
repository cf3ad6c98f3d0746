//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// wanted - evidence upload and LAN announce for the tracking client
#[derive(Parser, Debug)]
#[command(name = "wanted")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Exit non-zero when any item failed, even if the operation completed
    #[arg(long, global = true)]
    pub strict: bool,

    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "WANTED_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload files to the collector as one multipart POST
    Upload(UploadArgs),

    /// Broadcast a payload on every broadcast-capable interface
    Broadcast(BroadcastArgs),

    /// Encrypt a file with a password
    Encrypt(CryptArgs),

    /// Decrypt a file produced by `encrypt`
    Decrypt(CryptArgs),

    /// Overwrite a file with zeros, then delete it
    Shred(ShredArgs),
}

// ==================== Upload ====================

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Files to upload, sent as file0, file1, ... in this order
    pub files: Vec<PathBuf>,

    /// Collector URL (overrides config)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Gzip each part
    #[arg(long, conflicts_with = "no_gzip")]
    pub gzip: bool,

    /// Send parts uncompressed
    #[arg(long)]
    pub no_gzip: bool,

    /// Abort the whole upload when a file cannot be opened
    #[arg(long)]
    pub fail_on_missing: bool,

    /// Deadline in seconds from now (overrides config)
    #[arg(short, long)]
    pub timeout: Option<u64>,
}

// ==================== Broadcast ====================

#[derive(Args, Debug)]
pub struct BroadcastArgs {
    /// Payload text
    #[arg(required_unless_present = "payload_file", conflicts_with = "payload_file")]
    pub payload: Option<String>,

    /// Read the payload from a file instead
    #[arg(long)]
    pub payload_file: Option<PathBuf>,

    /// Source address host:port; the port is the destination port
    #[arg(short, long)]
    pub address: Option<String>,

    /// Per-send deadline in seconds from now (overrides config)
    #[arg(short, long)]
    pub timeout: Option<u64>,
}

// ==================== Encrypt / Decrypt ====================

#[derive(Args, Debug)]
pub struct CryptArgs {
    /// Input file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Password
    #[arg(short, long, env = "WANTED_PASSWORD", hide_env_values = true)]
    pub password: String,
}

// ==================== Shred ====================

#[derive(Args, Debug)]
pub struct ShredArgs {
    /// File to destroy
    pub path: PathBuf,

    /// Delete even if the overwrite failed
    #[arg(short, long)]
    pub force: bool,
}
