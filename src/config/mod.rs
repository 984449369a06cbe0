//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML/JSON)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ShippingConfig (validated, immutable)
//!     → owned by ShippingRateResolver
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - Legacy storefront key spellings are accepted as serde aliases
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError, ConfigFormat};
pub use schema::{ShippingConfig, ShippingMethod, WeightTier};
pub use validation::{validate_config, ValidationError};
