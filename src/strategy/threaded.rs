use std::path::Path;
use std::time::Instant;

use async_trait::async_trait;

use crate::fetcher;
use crate::strategy::{ensure_dir, FetchStrategy};
use crate::types::{DownloadError, DownloadTask, StrategyReport};

/// One OS thread per URL; each thread owns its own blocking HTTP client, so
/// the only shared state across threads is stdout.
pub struct ThreadedStrategy;

#[async_trait]
impl FetchStrategy for ThreadedStrategy {
    fn name(&self) -> &'static str {
        "threading"
    }

    async fn run(&self, urls: &[String], dir: &Path) -> Result<StrategyReport, DownloadError> {
        let name = self.name();
        let urls = urls.to_vec();
        let dir = dir.to_path_buf();

        // The spawn/join block is fully synchronous; keep it off the
        // runtime's worker threads.
        let report = tokio::task::spawn_blocking(move || -> Result<StrategyReport, DownloadError> {
            ensure_dir(&dir)?;
            let start = Instant::now();

            let handles: Vec<_> = urls
                .iter()
                .map(|url| {
                    let task = DownloadTask::new(url.clone(), dir.clone(), start);
                    std::thread::spawn(move || {
                        let client = reqwest::blocking::Client::new();
                        let result = fetcher::fetch_blocking(&client, &task);
                        println!("{result}");
                    })
                })
                .collect();

            for handle in handles {
                if handle.join().is_err() {
                    log::warn!("download thread panicked");
                }
            }

            Ok(StrategyReport {
                name,
                elapsed: start.elapsed(),
                attempted: urls.len(),
            })
        })
        .await??;

        Ok(report)
    }
}
