//! Overwrite-then-delete for evidence files.

use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::error::ShredError;

/// Size of each zero-filled write.
pub const CHUNK_SIZE: usize = 1 << 21;

/// Overwrite `path` with zeros over its current length, sync, then remove it.
///
/// If the overwrite fails the file is kept unless `force` is set; either way
/// the overwrite error is returned.
pub async fn secure_delete(path: impl AsRef<Path>, force: bool) -> Result<(), ShredError> {
    let path = path.as_ref();
    let mut file = OpenOptions::new()
        .write(true)
        .open(path)
        .await
        .map_err(|source| ShredError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let overwritten = overwrite(&mut file).await;
    drop(file);

    settle(path, overwritten, force).await
}

/// Remove `path` after an overwrite attempt. A failed overwrite keeps the
/// file unless `force` is set, and its error is returned either way.
async fn settle(path: &Path, overwritten: std::io::Result<()>, force: bool) -> Result<(), ShredError> {
    let overwritten = overwritten.map_err(|source| ShredError::Overwrite {
        path: path.to_path_buf(),
        source,
    });

    if overwritten.is_err() && !force {
        return overwritten;
    }

    let removed = fs::remove_file(path)
        .await
        .map_err(|source| ShredError::Remove {
            path: PathBuf::from(path),
            source,
        });
    debug!("Shredded {}", path.display());

    overwritten.and(removed)
}

async fn overwrite(file: &mut File) -> std::io::Result<()> {
    let len = file.metadata().await?.len();
    zero_fill(file, len).await?;
    file.sync_all().await
}

async fn zero_fill<W: AsyncWrite + Unpin>(out: &mut W, len: u64) -> std::io::Result<()> {
    let zeros = vec![0u8; CHUNK_SIZE];

    let mut remaining = len;
    while remaining > 0 {
        let n = remaining.min(CHUNK_SIZE as u64) as usize;
        out.write_all(&zeros[..n]).await?;
        remaining -= n as u64;
    }

    out.flush().await
}
