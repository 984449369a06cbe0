//! Shipping rate resolution for storefront deployments.
//!
//! A deployment ships one static shipping table (served countries, COD
//! eligibility, free shipping threshold, weight tiers, methods). The table is
//! loaded and validated once; [`ShippingRateResolver`] then answers price and
//! COD queries against it without side effects.

pub mod config;
pub mod observability;
pub mod quoting;

pub use config::schema::ShippingConfig;
pub use quoting::{ShippingError, ShippingRateResolver};
