//! # HTTP Server
//!
//! Axum-based HTTP server for the singer routes.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::observability::{log_event_with_fields, Event};

use super::routes::{self, AppState};

/// HTTP server for the singer service
pub struct HttpServer {
    config: Config,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given state
    pub fn new(config: Config, state: Arc<AppState>) -> Self {
        let router = routes::router(state).layer(cors_layer(&config));
        Self { config, router }
    }

    /// Get the socket address
    fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.socket_addr();
        let listener = TcpListener::bind(&addr).await?;

        log_event_with_fields(Event::Serving, &[("addr", &addr)]);
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_origins.is_empty() {
        // No origins configured: permissive, for development
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
