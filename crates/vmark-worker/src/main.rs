//! Watermark worker binary.
//!
//! Reads one job payload (JSON, from a file argument or stdin), processes
//! it, and prints the presigned result URL on stdout.

use tokio::io::AsyncReadExt;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vmark_models::WatermarkJob;
use vmark_worker::{run_job, WorkerContext, WorkerError, WorkerResult};

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("vmark=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting vmark-worker");

    let job = match read_job().await {
        Ok(j) => j,
        Err(e) => {
            error!("Failed to read job payload: {}", e);
            std::process::exit(1);
        }
    };

    let ctx = match WorkerContext::from_env().await {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to initialize worker: {}", e);
            std::process::exit(1);
        }
    };

    match run_job(&ctx, &job).await {
        Ok(url) => {
            println!("URL: {}", url);
        }
        Err(e) => {
            error!("Job failed: {}", e);
            if let Some(stderr) = e.tool_stderr() {
                error!("Tool output:\n{}", stderr);
            }
            std::process::exit(1);
        }
    }
}

/// Read the job payload from the first argument (a file path) or stdin.
async fn read_job() -> WorkerResult<WatermarkJob> {
    let raw = match std::env::args().nth(1) {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    if raw.trim().is_empty() {
        return Err(WorkerError::invalid_payload("empty job payload"));
    }

    Ok(serde_json::from_str(&raw)?)
}
