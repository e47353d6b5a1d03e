//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse, deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → ResolverConfig (validated, immutable)
//!     → handed to the server at construction
//! ```
//!
//! # Design Decisions
//! - Config is loaded once at startup and never changes afterwards
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError, STORE_API_KEY_ENV};
pub use schema::{
    ListenerConfig, ObservabilityConfig, ResolverConfig, SiteConfig, StoreBackend, StoreConfig,
    TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
