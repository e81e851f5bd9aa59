//! Resource gateway subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP request on {prefix}read/* or {prefix}write/*
//!     → routes.rs (route table entry for the path)
//!     → handlers.rs (method check, body read)
//!     → stream adapter (one read or one write)
//!     → codec.rs (encode bytes / decode body)
//!     → response (body + Content-Type + Content-Length, or 500 text)
//! ```
//!
//! # Design Decisions
//! - Route set per resource is fixed at registration
//! - Duplicate prefixes are rejected, never silently replaced
//! - No state survives a request besides the stream position

pub mod codec;
pub mod error;
pub mod handlers;
pub mod resource;
pub mod routes;

use std::collections::HashSet;
use std::sync::Arc;

use axum::Router;

use crate::config::GatewayConfig;

pub use error::{GatewayError, RegistrationError, X_BYTES_WRITTEN};
pub use resource::{normalize_prefix, Resource};
pub use routes::{route_table, Action, Route};

/// Behavior switches shared by every resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayOptions {
    /// Upper bound on a write request body, in bytes.
    pub max_body_size: usize,
    /// Decode `write/base64.txt` bodies. When false the route writes the
    /// body verbatim, like `write/bytes.bin`.
    pub decode_base64_writes: bool,
    /// Label `read/byte.bin` and `read/byte.txt` as `application/json`.
    pub json_content_type_for_single_byte: bool,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024,
            decode_base64_writes: true,
            json_content_type_for_single_byte: true,
        }
    }
}

impl GatewayOptions {
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            max_body_size: config.limits.max_body_size,
            decode_base64_writes: config.compat.decode_base64_writes,
            json_content_type_for_single_byte: config.compat.json_content_type_for_single_byte,
        }
    }
}

/// Registry of resources served by one HTTP server.
#[derive(Debug, Default)]
pub struct Gateway {
    resources: Vec<Arc<Resource>>,
    prefixes: HashSet<String>,
    options: GatewayOptions,
}

impl Gateway {
    pub fn new(options: GatewayOptions) -> Self {
        Self {
            resources: Vec::new(),
            prefixes: HashSet::new(),
            options,
        }
    }

    /// Add a resource. Its routes become part of [`Gateway::router`].
    pub fn register(&mut self, resource: Resource) -> Result<Arc<Resource>, RegistrationError> {
        resource::check_name(resource.name())?;
        if !self.prefixes.insert(resource.prefix().to_string()) {
            return Err(RegistrationError::DuplicatePrefix(resource.prefix().to_string()));
        }

        tracing::info!(
            resource = %resource.name(),
            prefix = %resource.prefix(),
            "Resource registered"
        );

        let resource = Arc::new(resource);
        self.resources.push(Arc::clone(&resource));
        Ok(resource)
    }

    pub fn resources(&self) -> &[Arc<Resource>] {
        &self.resources
    }

    /// Router containing the routes of every registered resource.
    pub fn router(&self) -> Router {
        self.resources
            .iter()
            .fold(Router::new(), |router, resource| {
                router.merge(routes::register(Arc::clone(resource), &self.options))
            })
    }
}
