use std::path::PathBuf;

use crate::config::{HarnessConfig, ASYNC_DIR, MULTIPROCESSING_DIR, THREADING_DIR};
use crate::strategy::{AsyncStrategy, FetchStrategy, ProcessStrategy, ThreadedStrategy};
use crate::types::StrategyReport;

/// Runs the same URL batch under every strategy, sequentially and in a fixed
/// order (threading, then multiprocessing, then async), each against its own
/// output directory.
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Runs all three strategies and returns one report per completed run.
    ///
    /// Per-item download failures never abort anything. A strategy whose
    /// output directory cannot be created is skipped; the remaining
    /// strategies still run.
    pub async fn run_all(&self) -> Vec<StrategyReport> {
        let root = &self.config.output_root;
        let runs: Vec<(Box<dyn FetchStrategy>, PathBuf)> = vec![
            (Box::new(ThreadedStrategy), root.join(THREADING_DIR)),
            (
                Box::new(ProcessStrategy::new(self.config.worker_cmd.clone())),
                root.join(MULTIPROCESSING_DIR),
            ),
            (Box::new(AsyncStrategy), root.join(ASYNC_DIR)),
        ];

        let mut reports = Vec::with_capacity(runs.len());
        for (strategy, dir) in runs {
            println!("{} approach", strategy.name());
            match strategy.run(&self.config.urls, &dir).await {
                Ok(report) => {
                    println!(
                        "total time: {:.2}s ({} urls)\n",
                        report.elapsed.as_secs_f64(),
                        report.attempted
                    );
                    reports.push(report);
                }
                Err(e) => {
                    eprintln!("{} strategy aborted: {e}", strategy.name());
                }
            }
        }
        reports
    }
}
