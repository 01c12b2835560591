//! Job payload definitions.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single watermark job as delivered by the invoking framework.
///
/// One payload describes one invocation: fetch `video_url`, composite the
/// watermark, upload the result. Nothing persists across jobs.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WatermarkJob {
    /// Unique job ID (assigned by the caller, generated if absent)
    #[serde(default)]
    pub id: JobId,

    /// Source video URL to fetch
    pub video_url: String,

    /// When the job was submitted
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl WatermarkJob {
    /// Create a job for a source URL with a fresh ID.
    pub fn new(video_url: impl Into<String>) -> Self {
        Self {
            id: JobId::new(),
            video_url: video_url.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_roundtrip() {
        let id = JobId::from_string("job-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"job-123\"");

        let back: JobId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_job_payload_defaults() {
        // Minimal payload from the framework: only the source URL
        let job: WatermarkJob =
            serde_json::from_str(r#"{"video_url": "https://example.com/in.mp4"}"#).unwrap();

        assert_eq!(job.video_url, "https://example.com/in.mp4");
        assert!(!job.id.as_str().is_empty());
    }

    #[test]
    fn test_job_payload_explicit_id() {
        let job: WatermarkJob = serde_json::from_str(
            r#"{"id": "abc", "video_url": "https://example.com/in.mp4"}"#,
        )
        .unwrap();

        assert_eq!(job.id.as_str(), "abc");
    }
}
