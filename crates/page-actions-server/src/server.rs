//! Development server implementation.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;

use page_actions_static::StaticBuilder;

use crate::watcher::{FileWatcher, WatchEvent};

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Directory containing source documents
    pub content_dir: PathBuf,

    /// Extensions that count as documents
    pub extensions: Vec<String>,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("src/content/docs"),
            extensions: vec!["md".to_string(), "mdx".to_string()],
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error("Initial mirror failed: {0}")]
    BuildError(#[from] page_actions_static::BuildError),

    #[error("Server error: {0}")]
    ServeError(String),
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
    builder: Arc<StaticBuilder>,
}

impl DevServer {
    /// Create a new development server around a configured builder.
    pub fn new(config: DevServerConfig, builder: StaticBuilder) -> Self {
        Self {
            config,
            builder: Arc::new(builder),
        }
    }

    /// Socket address the server binds to.
    pub fn address(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        addr.parse().map_err(|_| ServerError::InvalidAddress(addr))
    }

    /// Mirror once, then serve the output directory while watching content.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr = self.address()?;

        let setup = self.builder.setup()?;
        tracing::info!("Mirrored {} documents", setup.documents);

        let (watcher, mut rx) = FileWatcher::new(
            std::slice::from_ref(&self.config.content_dir),
            &self.config.extensions,
        )
        .map_err(|e| ServerError::WatchError(e.to_string()))?;

        let builder = Arc::clone(&self.builder);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&builder, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        serve_dir(addr, self.builder.output_dir(), self.config.open).await
    }
}

/// Serve `dir` as static files at `addr` until the listener shuts down.
pub async fn serve_dir(addr: SocketAddr, dir: &Path, open: bool) -> Result<(), ServerError> {
    let app = Router::new().fallback_service(ServeDir::new(dir));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

    tracing::info!("Serving {} at http://{}", dir.display(), addr);

    if open {
        open_browser(addr);
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::ServeError(e.to_string()))
}

fn open_browser(addr: SocketAddr) {
    let url = format!("http://{}", addr);
    if let Err(e) = open::that(&url) {
        tracing::warn!("Failed to open browser at {}: {}", url, e);
    }
}

/// Re-run the setup stage after a content change.
async fn handle_watch_event(builder: &Arc<StaticBuilder>, event: WatchEvent) {
    match &event {
        WatchEvent::DocumentModified(path) => {
            tracing::info!("Document modified: {}", path.display());
        }
        WatchEvent::Deleted(path) => {
            // Mirrors are never removed; the next full build starts clean.
            tracing::info!("Deleted: {}", path.display());
        }
        WatchEvent::Created(path) | WatchEvent::Modified(path) => {
            tracing::debug!("Changed: {}", path.display());
        }
    }

    let builder = Arc::clone(builder);
    match tokio::task::spawn_blocking(move || builder.setup()).await {
        Ok(Ok(result)) => tracing::debug!("Re-mirrored {} documents", result.documents),
        Ok(Err(e)) => tracing::warn!("Failed to mirror after {}: {}", event.path().display(), e),
        Err(e) => tracing::warn!("Mirror task panicked: {}", e),
    }
}
