//! Shipping price resolution.

pub mod engine;
pub mod types;

pub use engine::ShippingRateResolver;
pub use types::{
    PricingRule, QuoteRequest, ShippingError, ShippingOption, ShippingQuote, ShippingResult,
};
