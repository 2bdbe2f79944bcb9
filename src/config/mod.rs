//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), found via --config-file or the search paths
//!     → loader.rs (parse & deserialize)
//!     → CLI / environment overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; the handler chain never changes afterwards
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{discover_config, load_config, search_paths, ConfigError};
pub use schema::{HttpConfig, LogConfig, MetricsConfig, ServiceConfig};
pub use validation::{validate_config, ValidationError};
