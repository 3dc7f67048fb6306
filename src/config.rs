use std::path::PathBuf;

/// Built-in sample batch: five freely hosted images.
pub const DEFAULT_IMAGE_URLS: [&str; 5] = [
    "https://img.freepik.com/premium-photo/portrait-smiling-young-man-standing-outdoors_1048944-29813224.jpg",
    "https://img.freepik.com/free-photo/medium-shot-latin-people-training-outdoors_23-2151039433.jpg",
    "https://img.freepik.com/premium-photo/full-length-woman-exercising-field_1048944-30351094.jpg",
    "https://img.freepik.com/free-photo/water-polo-player-pool-with-swimming-equipment_23-2150893950.jpg",
    "https://img.freepik.com/premium-photo/full-length-man-playing-with-arms-raised_1048944-29793390.jpg",
];

pub const THREADING_DIR: &str = "threading_downloaded";
pub const MULTIPROCESSING_DIR: &str = "multiprocessing_downloaded";
pub const ASYNC_DIR: &str = "async_downloaded";

/// Explicit harness configuration. There is no process-wide default state;
/// callers build one of these and hand it to [`crate::Harness`].
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// The URL batch, shared by all three strategies.
    pub urls: Vec<String>,
    /// Parent of the three per-strategy output directories.
    pub output_root: PathBuf,
    /// Program plus leading arguments spawned once per URL by the process
    /// strategy; `--url`, `--dir` and `--batch-start` are appended.
    pub worker_cmd: Vec<String>,
}

impl HarnessConfig {
    pub fn sample_urls() -> Vec<String> {
        DEFAULT_IMAGE_URLS.iter().map(|u| u.to_string()).collect()
    }
}
