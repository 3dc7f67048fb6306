use std::path::PathBuf;

use clap::{Parser, Subcommand};

use dlbench::config::HarnessConfig;
use dlbench::harness::Harness;
use dlbench::strategy::process::run_worker;

#[derive(Parser)]
#[command(
    name = "dlbench",
    about = "Compares threaded, multi-process and async batch downloads",
    args_conflicts_with_subcommands = true
)]
struct Args {
    /// URLs to download; defaults to a built-in sample of five images
    urls: Vec<String>,

    /// Directory under which the per-strategy output directories are created
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Internal worker: fetch a single URL (spawned by the process strategy).
    #[command(hide = true)]
    FetchOne {
        #[arg(long)]
        url: String,
        #[arg(long)]
        dir: PathBuf,
        /// Batch start as Unix epoch milliseconds.
        #[arg(long)]
        batch_start: u64,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Some(Command::FetchOne {
        url,
        dir,
        batch_start,
    }) = args.command
    {
        run_worker(&url, &dir, batch_start).await;
        return;
    }

    let urls = if args.urls.is_empty() {
        HarnessConfig::sample_urls()
    } else {
        args.urls
    };
    let config = HarnessConfig {
        urls,
        output_root: args.out_dir,
        worker_cmd: worker_command(),
    };
    Harness::new(config).run_all().await;
}

/// The command the process strategy spawns per URL: this executable's own
/// hidden `fetch-one` subcommand.
fn worker_command() -> Vec<String> {
    let exe = std::env::current_exe()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "dlbench".to_string());
    vec![exe, "fetch-one".to_string()]
}
