use anyhow::{Context, Result};
use std::path::PathBuf;
use std::thread::JoinHandle;
use studydesk::ports::http::{serve_until, AppState};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Live server on an ephemeral port, backed by a temporary database file.
///
/// The server runs on its own runtime in a background thread and shuts down
/// gracefully when the fixture is dropped.
#[allow(dead_code)]
pub struct TestServer {
    _temp_dir: TempDir,
    pub database: PathBuf,
    pub base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

#[allow(dead_code)]
impl TestServer {
    pub fn start() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let database = temp_dir.path().join("studydesk.db");
        let state = AppState::open(&database)?;

        let std_listener =
            std::net::TcpListener::bind("127.0.0.1:0").context("Failed to bind test port")?;
        std_listener.set_nonblocking(true)?;
        let address = std_listener.local_addr()?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .context("Failed to build test runtime")?;

        let (shutdown, signal) = oneshot::channel::<()>();
        let handle = std::thread::spawn(move || {
            runtime.block_on(async move {
                let listener = TcpListener::from_std(std_listener).expect("Listener conversion");
                serve_until(listener, state, async {
                    let _ = signal.await;
                })
                .await
                .expect("Server failed");
            });
        });

        Ok(Self {
            _temp_dir: temp_dir,
            database,
            base_url: format!("http://{}", address),
            shutdown: Some(shutdown),
            handle: Some(handle),
        })
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Temporary directory holding a database path that does not exist yet
#[allow(dead_code)]
pub struct TestDatabase {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestDatabase {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let path = temp_dir.path().join("data").join("studydesk.db");
        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }
}

/// Groups used across tests, one per course
#[allow(dead_code)]
pub mod test_groups {
    pub const FIRST_COURSE: &str = "ЛХ02-25";
    pub const SECOND_COURSE: &str = "ЛХ02-24";
}
