//! HTTP server setup and request handlers.
//!
//! # Responsibilities
//! - Create the axum Router with the fixed intake routes
//! - Wire up middleware (request tracing)
//! - Validate method and required headers per route shape
//! - Dispatch validated requests to the upstream forwarder
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - Routes are registered with `any()` so the handlers own method
//!   rejection and can answer non-POST with a plain-text 405
//! - Two handler shapes, kept deliberately distinct: `/init` buffers the
//!   whole body before forwarding, the generic routes stream it through

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Method, Request},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::http::error::RelayError;
use crate::lifecycle::shutdown_signal;
use crate::relay::{
    relay_response, require_header, UpstreamClient, INTAKE_SESSION_ID, POGR_BUILD, POGR_CLIENT,
};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        let state = AppState {
            upstream: Arc::new(UpstreamClient::new(&config.upstream)),
        };
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the axum router. One specialized route, six generic ones.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/init", any(init_handler))
            .route("/data", any(intake_handler))
            .route("/event", any(intake_handler))
            .route("/logs", any(intake_handler))
            .route("/metrics", any(intake_handler))
            .route("/monitor", any(intake_handler))
            .route("/end", any(intake_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until an OS signal arrives or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown triggered");
                    }
                    _ = shutdown_signal() => {}
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Handler for `/init`.
///
/// Requires `POGR_CLIENT` and `POGR_BUILD`, buffers the whole body, and
/// forwards to `<base>/init` with no explicit timeout.
async fn init_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, RelayError> {
    if request.method() != Method::POST {
        return Err(RelayError::MethodNotAllowed);
    }

    let (parts, body) = request.into_parts();
    let client = require_header(&parts.headers, POGR_CLIENT)?;
    let build = require_header(&parts.headers, POGR_BUILD)?;

    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(RelayError::BodyRead)?;

    let mut outbound = HeaderMap::new();
    if let Some(content_type) = parts.headers.get(header::CONTENT_TYPE) {
        outbound.insert(header::CONTENT_TYPE, content_type.clone());
    }
    outbound.insert(POGR_CLIENT, client);
    outbound.insert(POGR_BUILD, build);

    tracing::debug!(bytes = body_bytes.len(), "Forwarding init request");

    let upstream = state
        .upstream
        .forward_buffered("/init", outbound, body_bytes)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Init forward failed");
            RelayError::Upstream(e)
        })?;

    Ok(relay_response(upstream))
}

/// Handler for the generic intake routes
/// (`/data`, `/event`, `/logs`, `/metrics`, `/monitor`, `/end`).
///
/// Requires `INTAKE_SESSION_ID` and streams the inbound body straight into
/// an outbound POST on `<base><path>`, bounded by the forward timeout.
async fn intake_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, RelayError> {
    if request.method() != Method::POST {
        return Err(RelayError::MethodNotAllowed);
    }

    let path = request.uri().path().to_string();
    let (parts, body) = request.into_parts();
    let session = require_header(&parts.headers, INTAKE_SESSION_ID)?;

    let mut outbound = HeaderMap::new();
    if let Some(content_type) = parts.headers.get(header::CONTENT_TYPE) {
        outbound.insert(header::CONTENT_TYPE, content_type.clone());
    }
    outbound.insert(INTAKE_SESSION_ID, session);

    // Propagate Content-Length only when the caller declared a positive one;
    // otherwise the outbound request falls back to chunked encoding.
    let content_length = parts
        .headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|len| *len > 0);

    tracing::debug!(path = %path, "Forwarding intake request");

    let upstream = state
        .upstream
        .forward_streaming(&path, outbound, content_length, body)
        .await
        .map_err(|e| {
            tracing::error!(path = %path, error = %e, "Intake forward failed");
            RelayError::Upstream(e)
        })?;

    Ok(relay_response(upstream))
}
