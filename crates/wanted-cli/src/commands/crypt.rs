//! Encrypt/decrypt commands.

use crate::cli::CryptArgs;
use crate::error::CliError;
use crate::output::get_formatter;

use wanted_core::crypto::{decrypt, encrypt};

/// Run the encrypt command
pub async fn run_encrypt(args: CryptArgs, json: bool) -> Result<(), CliError> {
    let plaintext = read_input(&args).await?;
    let sealed = encrypt(&args.password, &plaintext)?;
    tokio::fs::write(&args.output, &sealed).await?;

    let formatter = get_formatter(json);
    println!(
        "{}",
        formatter.format_message(&format!(
            "Encrypted {} -> {} ({} bytes)",
            args.input.display(),
            args.output.display(),
            sealed.len()
        ))
    );
    Ok(())
}

/// Run the decrypt command
pub async fn run_decrypt(args: CryptArgs, json: bool) -> Result<(), CliError> {
    let sealed = read_input(&args).await?;
    let plaintext = decrypt(&args.password, &sealed)?;
    tokio::fs::write(&args.output, &plaintext).await?;

    let formatter = get_formatter(json);
    println!(
        "{}",
        formatter.format_message(&format!(
            "Decrypted {} -> {} ({} bytes)",
            args.input.display(),
            args.output.display(),
            plaintext.len()
        ))
    );
    Ok(())
}

async fn read_input(args: &CryptArgs) -> Result<Vec<u8>, CliError> {
    tokio::fs::read(&args.input).await.map_err(|e| {
        CliError::InvalidArgument(format!(
            "Failed to read input file '{}': {}",
            args.input.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CryptoError;
    use wanted_core::error::CoreError;

    #[tokio::test]
    async fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("positions.csv");
        let sealed = dir.path().join("positions.enc");
        let restored = dir.path().join("positions.out");
        std::fs::write(&plain, b"id,lat,lon\n7,51.5,-0.12\n").unwrap();

        run_encrypt(
            CryptArgs {
                input: plain.clone(),
                output: sealed.clone(),
                password: "pw".to_string(),
            },
            true,
        )
        .await
        .unwrap();
        assert_ne!(std::fs::read(&sealed).unwrap(), std::fs::read(&plain).unwrap());

        run_decrypt(
            CryptArgs {
                input: sealed.clone(),
                output: restored.clone(),
                password: "pw".to_string(),
            },
            true,
        )
        .await
        .unwrap();
        assert_eq!(std::fs::read(&restored).unwrap(), std::fs::read(&plain).unwrap());

        let wrong = run_decrypt(
            CryptArgs {
                input: sealed,
                output: restored,
                password: "nope".to_string(),
            },
            true,
        )
        .await;
        assert!(matches!(
            wrong,
            Err(CliError::Core(CoreError::Crypto(CryptoError::Authentication)))
        ));
    }
}
