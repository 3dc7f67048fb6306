use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;

/// One unit of work: fetch `url` into `dir`.
///
/// `start` is the shared batch start instant, so every result in a run
/// reports time since the batch started rather than since its own launch.
#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub url: String,
    pub dir: PathBuf,
    pub start: Instant,
}

impl DownloadTask {
    pub fn new(url: impl Into<String>, dir: impl Into<PathBuf>, start: Instant) -> Self {
        Self {
            url: url.into(),
            dir: dir.into(),
            start,
        }
    }
}

/// Per-item outcome. Failures are values, never errors — a failed URL is
/// logged and skipped without affecting its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success { path: PathBuf },
    HttpError { status: u16 },
    TransportError { message: String },
}

#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub url: String,
    pub outcome: FetchOutcome,
    pub elapsed: Duration,
}

impl DownloadResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, FetchOutcome::Success { .. })
    }
}

impl fmt::Display for DownloadResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            FetchOutcome::Success { path } => write!(
                f,
                "downloaded {} -> {} ({:.2}s)",
                self.url,
                path.display(),
                self.elapsed.as_secs_f64()
            ),
            FetchOutcome::HttpError { status } => {
                write!(f, "failed {}: HTTP {}", self.url, status)
            }
            FetchOutcome::TransportError { message } => {
                write!(f, "failed {}: {}", self.url, message)
            }
        }
    }
}

/// Summary of one full strategy run, consumed by the harness for printing.
#[derive(Debug, Clone)]
pub struct StrategyReport {
    pub name: &'static str,
    pub elapsed: Duration,
    pub attempted: usize,
}

/// Fatal conditions only. Per-item HTTP and transport failures live in
/// [`FetchOutcome`] and never abort a run.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("failed to create output directory {dir}: {source}")]
    Directory {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("process strategy has an empty worker command")]
    WorkerCommand,

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
