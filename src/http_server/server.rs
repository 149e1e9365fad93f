//! # HTTP Server
//!
//! Combines the student, health and observability routers behind CORS.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use super::config::{HttpConfigError, HttpServerConfig};
use super::observability_routes::{health_routes, observability_routes};
use super::student_routes::{student_routes, StudentsState};
use crate::observability::{log_event_with_fields, Event};
use crate::service::RecordService;

/// HTTP server for student records
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving `service`
    pub fn with_config(config: HttpServerConfig, service: RecordService) -> Self {
        let router = Self::build_router(&config, service);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, service: RecordService) -> Router {
        let state = Arc::new(StudentsState::new(service));

        Router::new()
            .merge(health_routes())
            .nest("/api", student_routes(state.clone()))
            .nest("/observability", observability_routes(state))
            .layer(config.cors_layer())
    }

    /// Address the server will bind to
    pub fn listen_addr(&self) -> Result<SocketAddr, HttpConfigError> {
        self.config.listen_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self
            .config
            .listen_addr()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        let bound = listener.local_addr()?.to_string();
        log_event_with_fields(Event::Serving, &[("addr", bound.as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event_with_fields(Event::ShutdownComplete, &[("addr", bound.as_str())]);
        Ok(())
    }
}

async fn shutdown_signal() {
    // If the handler cannot be installed, serve until the process is killed
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
