//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the axum Router from the registered gateway resources
//! - Wire up middleware (request ID, tracing)
//! - Serve on a bound listener until shutdown is signalled

use axum::{body::Body, http::Request, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::gateway::Gateway;
use crate::http::request::{request_id, MakeRequestUuid, X_REQUEST_ID};

/// HTTP server fronting the gateway resources.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    /// Create a server for every resource registered in `gateway`.
    pub fn new(gateway: &Gateway) -> Self {
        Self {
            router: Self::build_router(gateway),
        }
    }

    /// Build the axum router with all middleware layers.
    fn build_router(gateway: &Gateway) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %request_id(request.headers()),
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID));

        gateway.router().layer(middleware)
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router with middleware applied.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{GatewayOptions, Resource};
    use crate::stream::StreamTimeouts;
    use axum::http::{HeaderValue, StatusCode};
    use tokio::io::{duplex, AsyncWriteExt};
    use tower::ServiceExt;

    fn server() -> (GatewayServer, tokio::io::DuplexStream) {
        let (local, peer) = duplex(1024);
        let mut gateway = Gateway::new(GatewayOptions::default());
        gateway
            .register(Resource::new("tty", local, StreamTimeouts::default()))
            .unwrap();
        (GatewayServer::new(&gateway), peer)
    }

    #[tokio::test]
    async fn assigns_request_id() {
        let (server, mut peer) = server();
        peer.write_all(b"x").await.unwrap();

        let request = Request::builder()
            .uri("/tty/read/byte.txt")
            .body(Body::empty())
            .unwrap();
        let response = server.router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(X_REQUEST_ID));
    }

    #[tokio::test]
    async fn keeps_client_request_id() {
        let (server, _peer) = server();

        let request = Request::builder()
            .method("DELETE")
            .uri("/tty/read/byte.txt")
            .header(X_REQUEST_ID, HeaderValue::from_static("client-id"))
            .body(Body::empty())
            .unwrap();
        let response = server.router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[X_REQUEST_ID], "client-id");
    }
}
