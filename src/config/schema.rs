//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::stream::StreamTimeouts;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Streams exposed over HTTP.
    pub resources: Vec<ResourceConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Switches reproducing or correcting historical wire quirks.
    pub compat: CompatConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:80").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:80".to_string(),
        }
    }
}

/// A named TCP stream to expose.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ResourceConfig {
    /// Logical name, used as the URL prefix.
    pub name: String,

    /// Address of the TCP peer (e.g., "127.0.0.1:9100").
    pub address: String,

    /// Deadline for a single read, in milliseconds.
    #[serde(default)]
    pub read_timeout_ms: Option<u64>,

    /// Deadline for a single write, in milliseconds.
    #[serde(default)]
    pub write_timeout_ms: Option<u64>,
}

impl ResourceConfig {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            read_timeout_ms: None,
            write_timeout_ms: None,
        }
    }

    pub fn timeouts(&self) -> StreamTimeouts {
        StreamTimeouts {
            read: self.read_timeout_ms.map(Duration::from_millis),
            write: self.write_timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Resource connection establishment timeout in seconds.
    pub connect_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { connect_secs: 5 }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum write request body size in bytes.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Compatibility switches.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CompatConfig {
    /// Decode base64 bodies posted to `write/base64.txt`.
    /// When false the body is written verbatim.
    pub decode_base64_writes: bool,

    /// Advertise `application/json` on `read/byte.bin` and `read/byte.txt`.
    pub json_content_type_for_single_byte: bool,
}

impl Default for CompatConfig {
    fn default() -> Self {
        Self {
            decode_base64_writes: true,
            json_content_type_for_single_byte: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [[resources]]
            name = "printer"
            address = "127.0.0.1:9100"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "0.0.0.0:80");
        assert_eq!(config.resources, vec![ResourceConfig::new("printer", "127.0.0.1:9100")]);
        assert_eq!(config.timeouts.connect_secs, 5);
        assert!(config.compat.decode_base64_writes);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn resource_timeouts_convert_to_durations() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [[resources]]
            name = "serial"
            address = "10.0.0.5:4001"
            read_timeout_ms = 250
            "#,
        )
        .unwrap();

        let timeouts = config.resources[0].timeouts();
        assert_eq!(timeouts.read, Some(Duration::from_millis(250)));
        assert_eq!(timeouts.write, None);
    }
}
