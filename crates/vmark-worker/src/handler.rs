//! The watermark job handler.
//!
//! One call handles one job end to end: fetch the source video, composite
//! the watermark, upload the result, return a presigned URL. Nothing is
//! retried or persisted here; the invoking framework owns the job lifecycle
//! and any timeout policy.

use tracing::{info, warn};

use vmark_media::{overlay_watermark, WatermarkConfig};
use vmark_models::{EncodingConfig, WatermarkJob};
use vmark_storage::S3Client;

use crate::config::WorkerConfig;
use crate::error::WorkerResult;
use crate::fetch;

/// Everything a job invocation needs.
pub struct WorkerContext {
    pub config: WorkerConfig,
    pub storage: S3Client,
    pub http: reqwest::Client,
    pub watermark: WatermarkConfig,
    pub encoding: EncodingConfig,
}

impl WorkerContext {
    /// Build a context from environment configuration.
    pub async fn from_env() -> WorkerResult<Self> {
        let config = WorkerConfig::from_env();
        let storage = S3Client::from_env().await?;
        let watermark = WatermarkConfig::default().with_image_path(&config.watermark_path);

        Ok(Self {
            config,
            storage,
            http: reqwest::Client::new(),
            watermark,
            encoding: EncodingConfig::default(),
        })
    }
}

/// Process one job and return the presigned URL of the uploaded output.
///
/// The per-job work directory is removed on every outcome; a failed run
/// leaves no output behind locally, and nothing is uploaded unless the
/// transcode succeeded.
pub async fn run_job(ctx: &WorkerContext, job: &WatermarkJob) -> WorkerResult<String> {
    info!(job_id = %job.id, url = %job.video_url, "Job started");

    let work_dir = ctx.config.work_dir.join(job.id.as_str());
    tokio::fs::create_dir_all(&work_dir).await?;

    let result = process(ctx, job, &work_dir).await;

    // Best-effort cleanup of transient files, success or not
    if let Err(e) = tokio::fs::remove_dir_all(&work_dir).await {
        warn!(job_id = %job.id, error = %e, "Failed to clean up work directory");
    }

    match &result {
        Ok(url) => info!(job_id = %job.id, url = %url, "Job completed"),
        Err(e) => info!(job_id = %job.id, error = %e, "Job failed"),
    }

    result
}

async fn process(
    ctx: &WorkerContext,
    job: &WatermarkJob,
    work_dir: &std::path::Path,
) -> WorkerResult<String> {
    let source = fetch::download_to(&ctx.http, &job.video_url, work_dir.join("source.mp4")).await?;

    let output = work_dir.join("output.mp4");
    overlay_watermark(&source, &output, &ctx.watermark, &ctx.encoding).await?;

    let url = ctx
        .storage
        .upload_output_presigned(&output, job.id.as_str(), ctx.config.url_expiry)
        .await?;

    Ok(url)
}
