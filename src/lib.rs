//! HTTP gateway exposing live TCP byte streams as REST endpoints.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod stream;

pub use config::GatewayConfig;
pub use gateway::{Gateway, GatewayOptions, Resource};
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
pub use stream::{StreamAdapter, StreamError, StreamTimeouts};
