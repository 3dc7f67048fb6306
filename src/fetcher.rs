use std::path::Path;

use futures::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::io::AsyncWriteExt;

use crate::types::{DownloadResult, DownloadTask, FetchOutcome};

/// Derives the local file name from the last non-empty path segment of the
/// URL. Query strings and fragments are ignored.
fn file_name_for(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .rev()
        .find(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
}

/// Fetches one URL into `task.dir`, streaming the body chunk by chunk.
///
/// Never returns an error: non-200 responses become `HttpError`, everything
/// else that goes wrong (DNS, connect, read, disk) becomes `TransportError`.
/// On success exactly one file is written, overwriting any previous copy.
pub async fn fetch(client: &Client, task: &DownloadTask) -> DownloadResult {
    let outcome = fetch_inner(client, task).await;
    DownloadResult {
        url: task.url.clone(),
        outcome,
        elapsed: task.start.elapsed(),
    }
}

async fn fetch_inner(client: &Client, task: &DownloadTask) -> FetchOutcome {
    let Some(name) = file_name_for(&task.url) else {
        return FetchOutcome::TransportError {
            message: "url has no file name".to_string(),
        };
    };

    let response = match client.get(&task.url).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchOutcome::TransportError {
                message: e.to_string(),
            }
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        return FetchOutcome::HttpError {
            status: status.as_u16(),
        };
    }

    let path = task.dir.join(name);
    match write_body(response, &path).await {
        Ok(()) => FetchOutcome::Success { path },
        Err(message) => {
            // A mid-stream failure leaves no partial file behind.
            let _ = tokio::fs::remove_file(&path).await;
            FetchOutcome::TransportError { message }
        }
    }
}

/// Consumes the body as a lazy sequence of byte chunks until exhaustion.
async fn write_body(response: reqwest::Response, path: &Path) -> Result<(), String> {
    let file = tokio::fs::File::create(path)
        .await
        .map_err(|e| e.to_string())?;
    let mut writer = tokio::io::BufWriter::new(file);
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| e.to_string())?;
        writer.write_all(&chunk).await.map_err(|e| e.to_string())?;
    }
    writer.flush().await.map_err(|e| e.to_string())
}

/// Blocking counterpart of [`fetch`], used by the thread-per-URL strategy.
///
/// The body is read in whatever chunk sizes the client produces; only full
/// consumption matters.
pub fn fetch_blocking(client: &reqwest::blocking::Client, task: &DownloadTask) -> DownloadResult {
    let outcome = fetch_blocking_inner(client, task);
    DownloadResult {
        url: task.url.clone(),
        outcome,
        elapsed: task.start.elapsed(),
    }
}

fn fetch_blocking_inner(client: &reqwest::blocking::Client, task: &DownloadTask) -> FetchOutcome {
    let Some(name) = file_name_for(&task.url) else {
        return FetchOutcome::TransportError {
            message: "url has no file name".to_string(),
        };
    };

    let mut response = match client.get(&task.url).send() {
        Ok(response) => response,
        Err(e) => {
            return FetchOutcome::TransportError {
                message: e.to_string(),
            }
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        return FetchOutcome::HttpError {
            status: status.as_u16(),
        };
    }

    let path = task.dir.join(name);
    match copy_body(&mut response, &path) {
        Ok(()) => FetchOutcome::Success { path },
        Err(message) => {
            let _ = std::fs::remove_file(&path);
            FetchOutcome::TransportError { message }
        }
    }
}

fn copy_body(response: &mut reqwest::blocking::Response, path: &Path) -> Result<(), String> {
    let mut file = std::fs::File::create(path).map_err(|e| e.to_string())?;
    response.copy_to(&mut file).map_err(|e| e.to_string())?;
    Ok(())
}
