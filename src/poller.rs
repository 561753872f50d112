//! Fixed-interval polling of an asynchronous remote job.
//!
//! Each status query classifies the job as pending, completed or failed.
//! Completed jobs have their artifact fetched once; failed jobs end the loop
//! without retrying; pending jobs are queried again after `interval` until
//! `max_attempts` queries have been made.

use crate::remote::RemoteError;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Completed,
    Failed,
}

impl JobStatus {
    /// Anything other than `completed` or `failed` is still in progress.
    pub fn from_remote(value: &str) -> Self {
        match value {
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            _ => JobStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub status: JobStatus,
    pub artifact_url: Option<String>,
    pub failure_reason: Option<String>,
}

pub trait JobBackend {
    fn job_status(&self, job_id: &str) -> Result<JobSnapshot, RemoteError>;
    fn fetch_artifact(&self, url: &str) -> Result<Vec<u8>, RemoteError>;
}

pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Blocks the calling thread.
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollPolicy {
    pub fn from_millis(interval_ms: u64, max_attempts: u32) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            max_attempts,
        }
    }
}

#[derive(Debug, Error)]
pub enum PollError {
    #[error("job {job_id} failed: {reason}")]
    JobFailed { job_id: String, reason: String },
    #[error("job {job_id} completed without an artifact url")]
    MissingArtifact { job_id: String },
    #[error("job {job_id} did not finish after {attempts} status checks")]
    Timeout { job_id: String, attempts: u32 },
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

#[derive(Debug)]
pub struct PolledArtifact {
    pub bytes: Vec<u8>,
    pub attempts: u32,
}

pub fn poll_and_fetch<B, S>(
    backend: &B,
    sleeper: &S,
    job_id: &str,
    policy: PollPolicy,
) -> Result<PolledArtifact, PollError>
where
    B: JobBackend + ?Sized,
    S: Sleeper + ?Sized,
{
    let mut attempts = 0;

    while attempts < policy.max_attempts {
        info!(
            job_id,
            "checking job status (attempt {}/{})",
            attempts + 1,
            policy.max_attempts
        );
        let snapshot = backend.job_status(job_id)?;
        attempts += 1;

        match snapshot.status {
            JobStatus::Completed => {
                let Some(url) = snapshot.artifact_url.filter(|url| !url.trim().is_empty()) else {
                    warn!(job_id, "job completed without an artifact url");
                    return Err(PollError::MissingArtifact {
                        job_id: job_id.to_string(),
                    });
                };
                debug!(job_id, "fetching artifact");
                let bytes = backend.fetch_artifact(&url)?;
                info!(job_id, attempts, bytes = bytes.len(), "artifact fetched");
                return Ok(PolledArtifact { bytes, attempts });
            }
            JobStatus::Failed => {
                let reason = snapshot
                    .failure_reason
                    .unwrap_or_else(|| "remote reported failure".to_string());
                warn!(job_id, %reason, "job failed");
                return Err(PollError::JobFailed {
                    job_id: job_id.to_string(),
                    reason,
                });
            }
            JobStatus::Pending => {
                if attempts < policy.max_attempts {
                    sleeper.sleep(policy.interval);
                }
            }
        }
    }

    warn!(job_id, attempts, "gave up waiting for job");
    Err(PollError::Timeout {
        job_id: job_id.to_string(),
        attempts,
    })
}
