//! Static file server for local theme installs
//!
//! Serves the output directory with permissive CORS so the host application
//! can fetch `ext.json` and `theme.css` from another origin.

use std::future::Future;
use std::path::PathBuf;

use axum::http::Method;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::{Result, ThemeError};

/// Static server settings
#[derive(Debug, Clone)]
pub struct StaticServer {
    root: PathBuf,
    host: String,
    port: u16,
}

impl StaticServer {
    pub fn new(root: impl Into<PathBuf>, host: impl Into<String>, port: u16) -> Self {
        Self {
            root: root.into(),
            host: host.into(),
            port,
        }
    }

    /// `host:port` as shown to users
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Router serving files under the root; `..` segments are rejected by ServeDir
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_headers(Any)
            .allow_methods([Method::GET, Method::OPTIONS]);

        Router::new()
            .fallback_service(ServeDir::new(&self.root))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Bind the listener. Fails fast when the address is taken.
    pub async fn bind(&self) -> Result<TcpListener> {
        TcpListener::bind((self.host.as_str(), self.port))
            .await
            .map_err(|e| ThemeError::server(self.address(), e))
    }

    /// Serve on an already bound listener
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();

        tracing::info!(
            "Serving {} at http://{}/ (CORS: *)",
            self.root.display(),
            self.address()
        );

        // Stops accepting on shutdown and lets in-flight requests finish
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ThemeError::server(self.address(), e))?;

        tracing::info!("Server shut down");
        Ok(())
    }
}

/// Resolves on Ctrl+C
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
    }
}
