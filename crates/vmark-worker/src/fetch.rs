//! Source video fetch over HTTP.
//!
//! Streams the response body to disk so arbitrarily large sources never
//! reside in memory.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::error::{WorkerError, WorkerResult};

/// Download a file from `url` to `path`, creating parent directories.
///
/// A non-success HTTP status or an empty body is a `DownloadFailed` error;
/// any partial file is removed before returning it.
pub async fn download_to(
    client: &reqwest::Client,
    url: &str,
    path: impl AsRef<Path>,
) -> WorkerResult<PathBuf> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| WorkerError::download_failed(format!("Request to {} failed: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(WorkerError::download_failed(format!(
            "HTTP {} from {}",
            response.status(),
            url
        )));
    }

    let mut file = tokio::fs::File::create(path).await?;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            WorkerError::download_failed(format!("Stream from {} interrupted: {}", url, e))
        })?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    drop(file);

    let size = tokio::fs::metadata(path).await?.len();
    if size == 0 {
        tokio::fs::remove_file(path).await.ok();
        return Err(WorkerError::download_failed(format!(
            "Empty response body from {}",
            url
        )));
    }

    info!(
        url = url,
        path = %path.display(),
        size_mb = size as f64 / (1024.0 * 1024.0),
        "Downloaded source file"
    );

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_download_invalid_url() {
        let dir = tempfile::tempdir().unwrap();
        let client = reqwest::Client::new();

        let err = download_to(
            &client,
            "http://127.0.0.1:1/unreachable.mp4",
            dir.path().join("out.mp4"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, WorkerError::DownloadFailed(_)));
        assert!(!dir.path().join("out.mp4").exists());
    }
}
