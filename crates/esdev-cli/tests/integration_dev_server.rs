//! Integration tests for the development server.
//!
//! Runs the real server on an ephemeral port, subscribes over raw HTTP and
//! drives the rebuild loop with a bundler that needs no esbuild binary.

use async_trait::async_trait;
use esdev_cli::bundler::{BuildResult, Bundler};
use esdev_cli::commands::dev::watch_loop;
use esdev_cli::config::EsdevConfig;
use esdev_cli::dev::{BuildStatus, DevServer, DevServerState, FileChange};
use esdev_cli::runner::BuildRunner;
use esdev_cli::BuildError;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Duration, timeout};

/// Bundler whose outcome can be flipped between builds.
#[derive(Default)]
struct SwitchableBundler {
    fail: AtomicBool,
    builds: AtomicUsize,
}

#[async_trait]
impl Bundler for SwitchableBundler {
    async fn build(&self) -> Result<BuildResult, BuildError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(BuildError::Failed {
                status: "exit status: 1".to_string(),
                stderr: "✘ [ERROR] Expected \";\"".to_string(),
            });
        }
        Ok(BuildResult {
            outputs: Some(vec!["build/bundle.js".to_string()]),
            duration: Duration::from_millis(3),
            warnings: 0,
        })
    }
}

/// Open `/subscribe` and return the stream once the response headers are in.
async fn subscribe(port: u16) -> (TcpStream, String) {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
    stream
        .write_all(b"GET /subscribe HTTP/1.1\r\nHost: localhost\r\nAccept: text/event-stream\r\n\r\n")
        .await
        .unwrap();

    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = timeout(Duration::from_secs(5), stream.read(&mut buf))
            .await
            .unwrap()
            .unwrap();
        assert!(n > 0, "connection closed before headers");
        head.extend_from_slice(&buf[..n]);
    }
    (stream, String::from_utf8_lossy(&head).to_lowercase())
}

/// Read until `needle` shows up or the timeout hits.
async fn read_until(stream: &mut TcpStream, needle: &str) -> String {
    let mut seen = String::new();
    let mut buf = [0u8; 1024];
    let finished = timeout(Duration::from_secs(5), async {
        while !seen.contains(needle) {
            let n = stream.read(&mut buf).await.unwrap();
            assert!(n > 0, "connection closed");
            seen.push_str(&String::from_utf8_lossy(&buf[..n]));
        }
    })
    .await;
    assert!(finished.is_ok(), "no {needle:?} in {seen:?}");
    seen
}

async fn wait_for_subscribers(state: &DevServerState, count: usize) {
    timeout(Duration::from_secs(5), async {
        while state.notifier().subscriber_count() != count {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_subscribe_over_http() {
    let temp = TempDir::new().unwrap();
    let state = Arc::new(DevServerState::new(temp.path().to_path_buf()));
    let server = DevServer::bind("127.0.0.1", 0, state.clone()).await.unwrap();
    let port = server.local_addr().unwrap().port();
    let task = tokio::spawn(server.run());

    let (mut stream, head) = subscribe(port).await;
    assert!(head.starts_with("http/1.1 200"));
    assert!(head.contains("content-type: text/event-stream"));
    assert!(head.contains("cache-control: no-cache"));
    assert!(head.contains("connection: keep-alive"));

    wait_for_subscribers(&state, 1).await;
    assert_eq!(state.complete_build(1), 1);
    read_until(&mut stream, "data: message\n\n").await;

    drop(stream);
    wait_for_subscribers(&state, 0).await;
    task.abort();
}

#[tokio::test]
async fn test_rebuild_loop_publishes_only_on_success() {
    let temp = TempDir::new().unwrap();
    let state = Arc::new(DevServerState::new(temp.path().join("build")));
    let server = DevServer::bind("127.0.0.1", 0, state.clone()).await.unwrap();
    let port = server.local_addr().unwrap().port();
    let server_task = tokio::spawn(server.run());

    let bundler = Arc::new(SwitchableBundler::default());
    let runner = Arc::new(BuildRunner::new(bundler.clone()));
    let config = EsdevConfig {
        cwd: Some(temp.path().to_path_buf()),
        ..EsdevConfig::default_config()
    };

    let (tx, mut rx) = mpsc::channel(16);
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let loop_state = state.clone();
    let loop_runner = runner.clone();
    let dev_loop = tokio::spawn(async move {
        watch_loop(
            &loop_runner,
            &loop_state,
            &config,
            &mut rx,
            Duration::from_millis(5),
            async move {
                let _ = stop_rx.await;
            },
        )
        .await;
    });

    let (mut stream, _) = subscribe(port).await;
    wait_for_subscribers(&state, 1).await;

    // Failed rebuild: no refresh
    bundler.fail.store(true, Ordering::SeqCst);
    tx.send(FileChange::Modified(PathBuf::from("src/App.tsx")))
        .await
        .unwrap();
    timeout(Duration::from_secs(5), async {
        while !matches!(state.status(), BuildStatus::Failed { .. }) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();

    // Successful rebuild: refresh
    bundler.fail.store(false, Ordering::SeqCst);
    tx.send(FileChange::Modified(PathBuf::from("src/App.tsx")))
        .await
        .unwrap();
    let seen = read_until(&mut stream, "data: message\n\n").await;
    assert_eq!(seen.matches("data: message").count(), 1);
    assert!(matches!(state.status(), BuildStatus::Success { .. }));
    assert_eq!(bundler.builds.load(Ordering::SeqCst), 2);

    stop_tx.send(()).unwrap();
    timeout(Duration::from_secs(5), dev_loop)
        .await
        .unwrap()
        .unwrap();
    server_task.abort();
}

#[tokio::test]
async fn test_queued_changes_coalesce_into_one_build() {
    let temp = TempDir::new().unwrap();
    let state = DevServerState::new(temp.path().join("build"));
    let bundler = Arc::new(SwitchableBundler::default());
    let runner = BuildRunner::new(bundler.clone());
    let config = EsdevConfig::default_config();

    let (tx, mut rx) = mpsc::channel(16);
    for name in ["a.ts", "b.ts", "c.ts"] {
        tx.send(FileChange::Modified(PathBuf::from(name)))
            .await
            .unwrap();
    }
    drop(tx);

    watch_loop(
        &runner,
        &state,
        &config,
        &mut rx,
        Duration::from_millis(5),
        std::future::pending::<()>(),
    )
    .await;

    assert_eq!(bundler.builds.load(Ordering::SeqCst), 1);
}
