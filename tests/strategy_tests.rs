use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dlbench::strategy::process::run_worker;
use dlbench::types::DownloadError;
use dlbench::{AsyncStrategy, FetchStrategy, ProcessStrategy, ThreadedStrategy};

/// Serves two good images and one 404.
async fn start_image_server() -> MockServer {
    let server = MockServer::start().await;
    for name in ["a.jpg", "b.jpg"] {
        Mock::given(method("GET"))
            .and(path(format!("/{name}")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(name.as_bytes().to_vec()))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/missing.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    server
}

fn batch(server: &MockServer, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .map(|name| format!("{}/{name}", server.uri()))
        .collect()
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn async_strategy_keeps_only_successful_downloads() {
    let server = start_image_server().await;
    let urls = batch(&server, &["a.jpg", "missing.jpg", "b.jpg"]);
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("out");

    let report = AsyncStrategy.run(&urls, &dir).await.unwrap();

    assert_eq!(report.name, "async");
    assert_eq!(report.attempted, 3);
    // The 404 sibling must not prevent the other two from landing.
    assert_eq!(file_names(&dir), ["a.jpg", "b.jpg"]);
}

#[tokio::test]
async fn threaded_strategy_keeps_only_successful_downloads() {
    let server = start_image_server().await;
    let urls = batch(&server, &["a.jpg", "missing.jpg", "b.jpg"]);
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("out");

    let report = ThreadedStrategy.run(&urls, &dir).await.unwrap();

    assert_eq!(report.name, "threading");
    assert_eq!(report.attempted, 3);
    assert_eq!(file_names(&dir), ["a.jpg", "b.jpg"]);
}

#[tokio::test]
async fn rerunning_a_strategy_overwrites_without_duplication() {
    let server = start_image_server().await;
    let urls = batch(&server, &["a.jpg", "b.jpg"]);
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("nested/deeper/out");

    AsyncStrategy.run(&urls, &dir).await.unwrap();
    AsyncStrategy.run(&urls, &dir).await.unwrap();

    assert_eq!(file_names(&dir), ["a.jpg", "b.jpg"]);
}

#[tokio::test]
async fn empty_batch_completes_immediately_with_directory_created() {
    let root = tempfile::tempdir().unwrap();

    for (strategy, sub) in [
        (&AsyncStrategy as &dyn FetchStrategy, "async"),
        (&ThreadedStrategy as &dyn FetchStrategy, "threaded"),
    ] {
        let dir = root.path().join(sub);
        let report = strategy.run(&[], &dir).await.unwrap();
        assert_eq!(report.attempted, 0);
        assert!(report.elapsed < Duration::from_secs(1));
        assert!(dir.is_dir());
        assert_eq!(file_names(&dir).len(), 0);
    }
}

#[tokio::test]
async fn reported_elapsed_covers_the_slowest_task() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fast.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"f".to_vec()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow.jpg"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"s".to_vec())
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let urls = batch(&server, &["fast.jpg", "slow.jpg"]);
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("out");

    let report = AsyncStrategy.run(&urls, &dir).await.unwrap();

    assert!(
        report.elapsed >= Duration::from_millis(300),
        "run returned before its slowest task: {:?}",
        report.elapsed
    );
    assert_eq!(file_names(&dir), ["fast.jpg", "slow.jpg"]);
}

#[tokio::test]
async fn directory_failure_aborts_only_that_run() {
    let root = tempfile::tempdir().unwrap();
    let blocker = root.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let dir = blocker.join("out");

    let err = AsyncStrategy.run(&[], &dir).await.unwrap_err();

    assert!(matches!(err, DownloadError::Directory { .. }));
}

// Process-strategy scheduling is covered with stand-in worker commands; the
// worker itself is exercised directly below.

#[tokio::test]
async fn process_strategy_waits_for_every_worker() {
    let strategy = ProcessStrategy::new(vec![
        "sh".to_string(),
        "-c".to_string(),
        "sleep 0.2".to_string(),
    ]);
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("out");
    let urls = vec![
        "https://example.com/a.jpg".to_string(),
        "https://example.com/b.jpg".to_string(),
    ];

    let report = strategy.run(&urls, &dir).await.unwrap();

    assert_eq!(report.name, "multiprocessing");
    assert_eq!(report.attempted, 2);
    assert!(report.elapsed >= Duration::from_millis(200));
    assert!(dir.is_dir());
}

#[tokio::test]
async fn process_strategy_survives_failing_workers() {
    let strategy = ProcessStrategy::new(vec!["false".to_string()]);
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("out");
    let urls = vec!["https://example.com/a.jpg".to_string()];

    let report = strategy.run(&urls, &dir).await.unwrap();

    assert_eq!(report.attempted, 1);
}

#[tokio::test]
async fn process_strategy_rejects_an_empty_worker_command() {
    let strategy = ProcessStrategy::new(Vec::new());
    let root = tempfile::tempdir().unwrap();

    let err = strategy
        .run(&[], &root.path().join("out"))
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::WorkerCommand));
}

#[tokio::test]
async fn worker_fetches_a_single_url_into_the_directory() {
    let server = start_image_server().await;
    let dir = tempfile::tempdir().unwrap();
    let batch_start = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64;

    run_worker(
        &format!("{}/a.jpg", server.uri()),
        dir.path(),
        batch_start,
    )
    .await;

    assert_eq!(std::fs::read(dir.path().join("a.jpg")).unwrap(), b"a.jpg");
}
