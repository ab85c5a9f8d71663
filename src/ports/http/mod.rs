// src/ports/http/mod.rs
//! JSON REST surface.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/api/notes` | [`notes::list_notes`] |
//! | POST | `/api/notes/create` | [`notes::create_note`] |
//! | POST | `/api/notes/update/{id}` | [`notes::update_note`] |
//! | POST | `/api/notes/delete/{id}` | [`notes::delete_note`] |
//! | POST | `/api/register` | [`students::register`] |
//! | GET | `/api/students` | [`students::list_students`] |
//! | GET | `/api/grades` | [`grades::show`] |
//! | GET | `/api/grades/add/{value}` | [`grades::add`] |
//! | GET | `/api/grades/remove` | [`grades::remove`] |
//!
//! Errors are always `{"error": "..."}`: 400 for validation, 404 for unknown
//! note ids, 500 for storage failures.
pub mod error;
pub mod grades;
pub mod notes;
pub mod students;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::application::{NoteStore, Registrar};
use crate::domain::GradeTracker;
use crate::infrastructure::config::ServerConfig;
use crate::infrastructure::SqliteRepository;

pub use error::ApiError;

/// Shared server state. Each store has its own lock and its own connection;
/// locks are never held across an `.await`.
pub struct AppState {
    pub notes: Mutex<NoteStore<SqliteRepository>>,
    pub registrar: Mutex<Registrar<SqliteRepository>>,
    pub grades: Mutex<GradeTracker>,
}

impl AppState {
    pub fn open(database: &Path) -> Result<Arc<Self>> {
        Ok(Self::from_repositories(
            SqliteRepository::open(database)?,
            SqliteRepository::open(database)?,
        ))
    }

    pub fn in_memory() -> Result<Arc<Self>> {
        Ok(Self::from_repositories(
            SqliteRepository::in_memory()?,
            SqliteRepository::in_memory()?,
        ))
    }

    fn from_repositories(notes: SqliteRepository, students: SqliteRepository) -> Arc<Self> {
        Arc::new(Self {
            notes: Mutex::new(NoteStore::new(notes)),
            registrar: Mutex::new(Registrar::new(students)),
            grades: Mutex::new(GradeTracker::new()),
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/notes", get(notes::list_notes))
        .route("/api/notes/create", post(notes::create_note))
        .route("/api/notes/update/{id}", post(notes::update_note))
        .route("/api/notes/delete/{id}", post(notes::delete_note))
        .route("/api/register", post(students::register))
        .route("/api/students", get(students::list_students))
        .route("/api/grades", get(grades::show))
        .route("/api/grades/add/{value}", get(grades::add))
        .route("/api/grades/remove", get(grades::remove))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_until<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr().context("Listener has no local address")?;
    info!(%address, "Server running");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Blocking entry point for `studydesk serve`
pub fn run_server(config: &ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(async {
        info!(database = %config.database.display(), "Initializing state...");
        let state = AppState::open(&config.database)?;

        let address = format!("0.0.0.0:{}", config.port);
        info!("Binding to {address}");
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {address}"))?;

        serve_until(listener, state, shutdown_signal()).await
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
