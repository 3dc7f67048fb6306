use std::path::Path;
use std::time::Instant;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;

use crate::fetcher;
use crate::strategy::{ensure_dir, FetchStrategy};
use crate::types::{DownloadError, DownloadTask, StrategyReport};

/// Cooperative concurrency: all fetches share one pooled client and are
/// polled together on the current task, suspending at each I/O await point.
/// Completion order across URLs is unspecified; only the all-complete
/// barrier of `join_all` is guaranteed.
pub struct AsyncStrategy;

#[async_trait]
impl FetchStrategy for AsyncStrategy {
    fn name(&self) -> &'static str {
        "async"
    }

    async fn run(&self, urls: &[String], dir: &Path) -> Result<StrategyReport, DownloadError> {
        ensure_dir(dir)?;
        let client = Client::builder().build()?;
        let start = Instant::now();

        let fetches = urls.iter().map(|url| {
            let task = DownloadTask::new(url.clone(), dir, start);
            let client = &client;
            async move {
                let result = fetcher::fetch(client, &task).await;
                println!("{result}");
            }
        });
        join_all(fetches).await;

        Ok(StrategyReport {
            name: self.name(),
            elapsed: start.elapsed(),
            attempted: urls.len(),
        })
    }
}
