//! Secure delete command.

use crate::cli::ShredArgs;
use crate::error::CliError;
use crate::output::get_formatter;

use wanted_core::shred::secure_delete;

/// Run the shred command
pub async fn run_shred(args: ShredArgs, json: bool) -> Result<(), CliError> {
    secure_delete(&args.path, args.force).await?;

    let formatter = get_formatter(json);
    println!(
        "{}",
        formatter.format_message(&format!("Shredded {}", args.path.display()))
    );
    Ok(())
}
