//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges
//! - Detect resources that would share a URL prefix
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;
use crate::gateway::resource::{check_name, normalize_prefix};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid listener bind address {0:?}")]
    BindAddress(String),

    #[error("invalid metrics address {0:?}")]
    MetricsAddress(String),

    #[error("resource {name:?} has invalid address {address:?}, expected host:port")]
    ResourceAddress { name: String, address: String },

    #[error("resource name {0:?} contains a reserved path character")]
    ResourceName(String),

    #[error("resource prefix {0} is used more than once")]
    DuplicatePrefix(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("resource {name:?}: {field} must be greater than zero")]
    ZeroResourceTimeout { name: String, field: &'static str },
}

/// Check the configuration for semantic errors.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::Zero("limits.max_body_size"));
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.connect_secs"));
    }

    let mut prefixes = HashSet::new();
    for resource in &config.resources {
        if check_name(&resource.name).is_err() {
            errors.push(ValidationError::ResourceName(resource.name.clone()));
        }

        if !is_host_port(&resource.address) {
            errors.push(ValidationError::ResourceAddress {
                name: resource.name.clone(),
                address: resource.address.clone(),
            });
        }

        let prefix = normalize_prefix(&resource.name);
        if !prefixes.insert(prefix.clone()) {
            errors.push(ValidationError::DuplicatePrefix(prefix));
        }

        if resource.read_timeout_ms == Some(0) {
            errors.push(ValidationError::ZeroResourceTimeout {
                name: resource.name.clone(),
                field: "read_timeout_ms",
            });
        }
        if resource.write_timeout_ms == Some(0) {
            errors.push(ValidationError::ZeroResourceTimeout {
                name: resource.name.clone(),
                field: "write_timeout_ms",
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `host:port` with a non-empty host and a numeric port. No DNS lookup.
fn is_host_port(address: &str) -> bool {
    match address.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ResourceConfig;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn host_port_forms() {
        assert!(is_host_port("127.0.0.1:80"));
        assert!(is_host_port("printer.local:9100"));
        assert!(is_host_port("[::1]:23"));
        assert!(!is_host_port("printer.local"));
        assert!(!is_host_port(":80"));
        assert!(!is_host_port("host:http"));
    }

    #[test]
    fn collects_every_error() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = ":80".to_string();
        config.limits.max_body_size = 0;
        config.resources.push(ResourceConfig::new("dev", "nowhere"));
        config.resources.push(ResourceConfig::new("/dev", "127.0.0.1:1"));
        config.resources.push(ResourceConfig::new("{x}", "127.0.0.1:2"));
        let mut slow = ResourceConfig::new("slow", "127.0.0.1:3");
        slow.write_timeout_ms = Some(0);
        config.resources.push(slow);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress(":80".to_string()),
                ValidationError::Zero("limits.max_body_size"),
                ValidationError::ResourceAddress {
                    name: "dev".to_string(),
                    address: "nowhere".to_string(),
                },
                ValidationError::DuplicatePrefix("/dev/".to_string()),
                ValidationError::ResourceName("{x}".to_string()),
                ValidationError::ZeroResourceTimeout {
                    name: "slow".to_string(),
                    field: "write_timeout_ms",
                },
            ]
        );
    }

    #[test]
    fn metrics_address_checked_only_when_enabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "bogus".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::MetricsAddress("bogus".to_string())])
        );
    }

    #[test]
    fn capture_style_names_rejected() {
        let mut config = GatewayConfig::default();
        config.resources.push(ResourceConfig::new(":dev", "127.0.0.1:1"));
        config.resources.push(ResourceConfig::new("all/*rest", "127.0.0.1:2"));

        assert_eq!(
            validate_config(&config),
            Err(vec![
                ValidationError::ResourceName(":dev".to_string()),
                ValidationError::ResourceName("all/*rest".to_string()),
            ])
        );
    }
}
