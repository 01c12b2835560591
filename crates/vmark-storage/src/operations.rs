//! High-level storage operations.

use std::path::Path;
use std::time::Duration;

use crate::client::S3Client;
use crate::error::StorageResult;

impl S3Client {
    /// Upload a processed output video for a job and return its object key.
    pub async fn upload_output(
        &self,
        path: impl AsRef<Path>,
        job_id: &str,
    ) -> StorageResult<String> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "output.mp4".to_string());

        let key = output_key(job_id, &filename);
        self.upload_file(path, &key, content_type_for(&filename))
            .await?;
        Ok(key)
    }

    /// Upload a job output and return a presigned URL for it.
    pub async fn upload_output_presigned(
        &self,
        path: impl AsRef<Path>,
        job_id: &str,
        url_expiry: Duration,
    ) -> StorageResult<String> {
        let key = self.upload_output(path, job_id).await?;
        self.presign_get(&key, url_expiry).await
    }
}

/// Object key for a job's output file.
fn output_key(job_id: &str, filename: &str) -> String {
    format!("jobs/{}/{}", job_id, filename)
}

/// Content type from a filename extension.
fn content_type_for(filename: &str) -> &'static str {
    if filename.ends_with(".mp4") {
        "video/mp4"
    } else if filename.ends_with(".jpg") || filename.ends_with(".jpeg") {
        "image/jpeg"
    } else if filename.ends_with(".png") {
        "image/png"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_key() {
        assert_eq!(output_key("job-1", "output.mp4"), "jobs/job-1/output.mp4");
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type_for("output.mp4"), "video/mp4");
        assert_eq!(content_type_for("thumb.jpg"), "image/jpeg");
        assert_eq!(content_type_for("data.bin"), "application/octet-stream");
    }
}
