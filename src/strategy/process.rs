use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::process::Command;

use crate::fetcher;
use crate::strategy::{ensure_dir, FetchStrategy};
use crate::types::{DownloadError, DownloadResult, DownloadTask, FetchOutcome, StrategyReport};

/// One OS process per URL. Processes share nothing; synchronization is
/// solely the wait on each child, and stdout interleaving across children
/// is undefined.
///
/// The worker command (program plus leading arguments) is spawned once per
/// URL with `--url`, `--dir` and `--batch-start` appended. The CLI points it
/// at its own executable's hidden `fetch-one` subcommand.
pub struct ProcessStrategy {
    worker_cmd: Vec<String>,
}

impl ProcessStrategy {
    pub fn new(worker_cmd: Vec<String>) -> Self {
        Self { worker_cmd }
    }
}

#[async_trait]
impl FetchStrategy for ProcessStrategy {
    fn name(&self) -> &'static str {
        "multiprocessing"
    }

    async fn run(&self, urls: &[String], dir: &Path) -> Result<StrategyReport, DownloadError> {
        ensure_dir(dir)?;
        let (program, leading) = self
            .worker_cmd
            .split_first()
            .ok_or(DownloadError::WorkerCommand)?;

        let start = Instant::now();
        // Instants cannot cross a process boundary; children receive the
        // batch start as Unix epoch milliseconds instead.
        let batch_start = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis()
            .to_string();

        let mut children = Vec::with_capacity(urls.len());
        for url in urls {
            let spawned = Command::new(program)
                .args(leading)
                .arg("--url")
                .arg(url)
                .arg("--dir")
                .arg(dir)
                .arg("--batch-start")
                .arg(&batch_start)
                .spawn();
            match spawned {
                Ok(child) => children.push((url.clone(), child)),
                Err(e) => {
                    let result = DownloadResult {
                        url: url.clone(),
                        outcome: FetchOutcome::TransportError {
                            message: format!("failed to spawn worker: {e}"),
                        },
                        elapsed: start.elapsed(),
                    };
                    println!("{result}");
                }
            }
        }

        for (url, mut child) in children {
            match child.wait().await {
                Ok(status) if !status.success() => {
                    log::warn!("worker for {url} exited with {status}");
                }
                Ok(_) => {}
                Err(e) => log::warn!("failed to wait for worker for {url}: {e}"),
            }
        }

        Ok(StrategyReport {
            name: self.name(),
            elapsed: start.elapsed(),
            attempted: urls.len(),
        })
    }
}

/// Entry point for the hidden `fetch-one` subcommand: fetches a single URL
/// inside a worker process.
///
/// `batch_start_millis` is the parent's batch start as Unix epoch
/// milliseconds, so the printed elapsed time is relative to the whole batch
/// rather than to this process's startup. Always prints exactly one result
/// line; never signals failure through the exit code.
pub async fn run_worker(url: &str, dir: &Path, batch_start_millis: u64) {
    let offset = SystemTime::now()
        .duration_since(UNIX_EPOCH + Duration::from_millis(batch_start_millis))
        .unwrap_or_default();
    let start = Instant::now().checked_sub(offset).unwrap_or_else(Instant::now);

    let client = reqwest::Client::new();
    let task = DownloadTask::new(url, dir, start);
    let result = fetcher::fetch(&client, &task).await;
    println!("{result}");
}
