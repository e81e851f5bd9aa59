//! Startup orchestration.
//!
//! # Responsibilities
//! - Dial every configured resource once
//! - Register the connected streams into a gateway
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Resources are dialed in configuration order, not concurrently
//! - No reconnection: a stream that breaks later stays broken

use std::io;
use std::time::Duration;

use tokio::net::TcpStream;

use crate::config::{GatewayConfig, ResourceConfig};
use crate::gateway::{Gateway, GatewayOptions, RegistrationError, Resource};

/// Error raised while bringing resources up.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("resource {name:?}: failed to connect to {address}: {source}")]
    Connect {
        name: String,
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("resource {name:?}: timed out connecting to {address}")]
    ConnectTimeout { name: String, address: String },

    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

/// Open the TCP connection for one resource.
pub async fn connect_resource(
    config: &ResourceConfig,
    connect_timeout: Duration,
) -> Result<Resource, StartupError> {
    let stream = match tokio::time::timeout(connect_timeout, TcpStream::connect(&config.address)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(source)) => {
            return Err(StartupError::Connect {
                name: config.name.clone(),
                address: config.address.clone(),
                source,
            })
        }
        Err(_) => {
            return Err(StartupError::ConnectTimeout {
                name: config.name.clone(),
                address: config.address.clone(),
            })
        }
    };

    if let Err(e) = stream.set_nodelay(true) {
        tracing::warn!(resource = %config.name, error = %e, "Failed to set TCP_NODELAY");
    }

    tracing::info!(
        resource = %config.name,
        address = %config.address,
        peer = ?stream.peer_addr().ok(),
        "Resource connected"
    );

    Ok(Resource::new(config.name.clone(), stream, config.timeouts()))
}

/// Dial every configured resource and register it.
pub async fn build_gateway(config: &GatewayConfig) -> Result<Gateway, StartupError> {
    let connect_timeout = Duration::from_secs(config.timeouts.connect_secs);
    let mut gateway = Gateway::new(GatewayOptions::from_config(config));

    for resource in &config.resources {
        let resource = connect_resource(resource, connect_timeout).await?;
        gateway.register(resource)?;
    }

    if gateway.resources().is_empty() {
        tracing::warn!("No resources configured; every path will return 404");
    }

    Ok(gateway)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn connects_and_registers_resources() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let mut config = GatewayConfig::default();
        config.resources.push(ResourceConfig::new("sensor", address));

        let gateway = build_gateway(&config).await.unwrap();
        assert_eq!(gateway.resources().len(), 1);
        assert_eq!(gateway.resources()[0].prefix(), "/sensor/");
    }

    #[tokio::test]
    async fn refused_connection_is_fatal() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        drop(listener);

        let mut config = GatewayConfig::default();
        config.resources.push(ResourceConfig::new("gone", address));

        let err = build_gateway(&config).await.unwrap_err();
        assert!(matches!(err, StartupError::Connect { .. }), "{err}");
    }
}
