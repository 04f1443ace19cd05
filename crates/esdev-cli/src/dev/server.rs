//! Development server: live-reload event stream plus static files.
//!
//! - `GET /subscribe` keeps a Server-Sent Events stream open and writes a
//!   `data: message` frame for every refresh event
//! - everything else is served from the output directory
//!
//! CORS is wide open so the snippet can connect from any origin.

use crate::dev::SharedState;
use crate::error::{CliError, Result};
use axum::{
    Router,
    extract::State,
    http::header,
    response::{
        IntoResponse,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use esdev_html::snippet::SUBSCRIBE_PATH;
use std::convert::Infallible;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_stream::StreamExt;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Payload of every refresh frame.
pub const REFRESH_DATA: &str = "message";

/// A bound development server, ready to [`run`](DevServer::run).
pub struct DevServer {
    listener: TcpListener,
    router: Router,
}

impl DevServer {
    /// Bind `host:port`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Server`] when the address cannot be resolved or bound.
    pub async fn bind(host: &str, port: u16, state: SharedState) -> Result<Self> {
        let listener = TcpListener::bind((host, port))
            .await
            .map_err(|e| CliError::Server(format!("Failed to bind to {host}:{port}: {e}")))?;

        Ok(Self {
            listener,
            router: router(state),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until the task is dropped or aborted.
    ///
    /// Event streams never end on their own, so shutdown is done by aborting
    /// the task running this future rather than by draining connections.
    pub async fn run(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .await
            .map_err(|e| CliError::Server(format!("Server error: {e}")))
    }
}

/// Build the axum router with all routes.
pub fn router(state: SharedState) -> Router {
    let static_files = ServeDir::new(state.out_dir()).append_index_html_on_directories(true);

    Router::new()
        .route(SUBSCRIBE_PATH, get(handle_subscribe))
        .fallback_service(static_files)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Open an event stream for one browser tab.
///
/// The subscriber is dropped, and so unregistered, when the connection closes.
async fn handle_subscribe(State(state): State<SharedState>) -> impl IntoResponse {
    let subscriber = state.notifier().subscribe();
    tracing::debug!(id = subscriber.id(), "live-reload client connected");

    let stream = subscriber.map(|_| Ok::<_, Infallible>(Event::default().data(REFRESH_DATA)));

    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CONNECTION, "keep-alive"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Sse::new(stream).keep_alive(KeepAlive::default()),
    )
}
