//! Shared helpers for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use socket_gateway::config::{GatewayConfig, ResourceConfig};
use socket_gateway::http::GatewayServer;
use socket_gateway::lifecycle::{build_gateway, Shutdown};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A running gateway with one resource and the far end of its stream.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub peer: TcpStream,
    pub shutdown: Shutdown,
    pub server: JoinHandle<Result<(), std::io::Error>>,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a TCP peer, connect a gateway resource named `name` to it and
/// serve the gateway on an ephemeral port.
pub async fn start_gateway(name: &str, mut config: GatewayConfig) -> TestGateway {
    let upstream = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let upstream_addr = upstream.local_addr().unwrap();
    config
        .resources
        .push(ResourceConfig::new(name, upstream_addr.to_string()));

    let gateway = build_gateway(&config).await.unwrap();
    let (peer, _) = upstream.accept().await.unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = GatewayServer::new(&gateway);
    let server_shutdown = shutdown.subscribe();
    let server = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    TestGateway {
        addr,
        peer,
        shutdown,
        server,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
