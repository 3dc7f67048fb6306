//! Concurrent batch-download comparison.
//!
//! Fetches one batch of URLs under three interchangeable concurrency
//! strategies — thread-per-URL, process-per-URL and cooperative async —
//! persisting each run to its own directory and reporting per-item results
//! plus wall-clock time per strategy.

pub mod config;
pub mod fetcher;
pub mod harness;
pub mod strategy;
pub mod types;

pub use config::HarnessConfig;
pub use harness::Harness;
pub use strategy::{AsyncStrategy, FetchStrategy, ProcessStrategy, ThreadedStrategy};
pub use types::{DownloadError, DownloadResult, DownloadTask, FetchOutcome, StrategyReport};
