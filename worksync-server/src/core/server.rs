//! Server Implementation
//!
//! HTTP 服务器启动和管理

use crate::core::{Result, ServerState};

/// HTTP Server over an initialized [`ServerState`]
pub struct Server {
    state: ServerState,
}

impl Server {
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    pub async fn run(self) -> Result<()> {
        let port = self.state.config.http_port;
        let app = crate::api::build_app(&self.state).with_state(self.state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("WorkSync server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
