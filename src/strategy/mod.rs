pub mod async_pool;
pub mod process;
pub mod threaded;

use std::path::Path;

use async_trait::async_trait;

use crate::types::{DownloadError, StrategyReport};

pub use async_pool::AsyncStrategy;
pub use process::ProcessStrategy;
pub use threaded::ThreadedStrategy;

/// One concurrency model for executing a URL batch.
///
/// Implementations share a single contract: ensure the output directory
/// exists, record one batch start instant, launch one unit of work per URL,
/// and block at a wait-all barrier until every unit has finished — there is
/// no partial completion and no cancellation of stragglers.
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    /// Strategy name, used in report headers and summaries.
    fn name(&self) -> &'static str;

    /// Fetches every URL into `dir` under this strategy's concurrency model.
    ///
    /// Per-item failures are logged and skipped; the only error is failing
    /// to create `dir`, which aborts this run and nothing else.
    async fn run(&self, urls: &[String], dir: &Path) -> Result<StrategyReport, DownloadError>;
}

/// Recursive, idempotent directory creation shared by all strategies.
pub(crate) fn ensure_dir(dir: &Path) -> Result<(), DownloadError> {
    std::fs::create_dir_all(dir).map_err(|source| DownloadError::Directory {
        dir: dir.to_path_buf(),
        source,
    })
}
