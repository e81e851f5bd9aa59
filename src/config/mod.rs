//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + command line overrides
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → startup dials resources and builds the gateway
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a resource's routes never change
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CompatConfig, GatewayConfig, LimitsConfig, ListenerConfig, ObservabilityConfig,
    ResourceConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
