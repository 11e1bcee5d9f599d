//! Error catalog service
//!
//! Serves the category registry, previews error documents and renders
//! traces for submitted documents. Every failure the service itself reports
//! goes out as an error document.

#![allow(clippy::must_use_candidate)]

mod catalog;
mod error;
mod fallback;
mod health;
mod render;
mod state;

use std::net::SocketAddr;

use axum::{
    Router,
    routing::{get, post},
};
use httperr_config::Config;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

pub use catalog::CategoryInfo;
pub use error::ServerError;
pub use render::{RenderInner, RenderRequest, RenderResponse};
pub use state::AppState;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    pub fn new(config: &Config) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        Self {
            router: router(AppState::from_config(config)),
            listen_address,
        }
    }

    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server, returning its router
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Bind and serve until `shutdown` is cancelled
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound or serving fails
    pub async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address)
            .await
            .map_err(|e| anyhow::anyhow!("failed to bind {}: {e}", self.listen_address))?;

        tracing::info!(address = %listener.local_addr()?, "listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
            })
            .await?;

        Ok(())
    }
}

/// Build the router for the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler).fallback(fallback::method_not_allowed))
        .route(
            "/v1/categories",
            get(catalog::list_categories).fallback(fallback::method_not_allowed),
        )
        .route(
            "/v1/categories/{category}",
            get(catalog::show_category).fallback(fallback::method_not_allowed),
        )
        .route(
            "/v1/render",
            post(render::render_document).fallback(fallback::method_not_allowed),
        )
        .fallback(fallback::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
