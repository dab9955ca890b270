//! HTTP server setup.
//!
//! # Responsibilities
//! - Wrap the chosen application with HTTP tracing
//! - Bind it to a listener
//! - Stop accepting and drain on shutdown

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::lifecycle::startup::{AppMode, Application};

/// HTTP server for the shim.
pub struct HttpServer {
    router: Router,
    mode: AppMode,
}

impl HttpServer {
    pub fn new(app: Application) -> Self {
        let mode = app.mode();
        let router = app.into_router().layer(TraceLayer::new_for_http());
        Self { router, mode }
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = ?self.mode,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
