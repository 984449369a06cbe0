//! Shipping quote types and error definitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while resolving a shipping price.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShippingError {
    /// Destination is not in the served country list.
    #[error("Shipping to '{0}' is not supported")]
    UnsupportedCountry(String),

    /// No configured method has this id.
    #[error("Unknown shipping method '{0}'")]
    UnknownMethod(String),

    /// Package is heavier than the method or tier ceiling allows.
    #[error("Package weight {weight} kg exceeds the limit of {max_weight} kg")]
    WeightExceeded { weight: Decimal, max_weight: Decimal },

    /// Request values outside their domain (e.g. negative weight).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for resolver operations.
pub type ShippingResult<T> = Result<T, ShippingError>;

/// Input for a single price resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Destination country, as spelled in the shipping table.
    pub country: String,
    /// Cart subtotal.
    pub subtotal: Decimal,
    /// Total package weight in kg.
    pub weight: Decimal,
    /// Requested shipping method id.
    pub method_id: String,
}

/// Which pricing path produced a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingRule {
    /// Free shipping threshold met.
    Free,
    /// Weight band with the given ceiling.
    Tier { max_weight: Decimal },
    /// The method's flat price.
    Flat,
}

/// A resolved shipping price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingQuote {
    pub method_id: String,
    pub method_name: String,
    /// Amount charged for delivery.
    pub price: Decimal,
    /// Delivery estimate copied from the method description.
    pub eta_description: String,
    pub rule: PricingRule,
}

/// One row of the checkout method list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ShippingOption {
    Available(ShippingQuote),
    Unavailable {
        method_id: String,
        method_name: String,
        reason: String,
    },
}

impl ShippingOption {
    /// Id of the method this row describes.
    pub fn method_id(&self) -> &str {
        match self {
            ShippingOption::Available(quote) => &quote.method_id,
            ShippingOption::Unavailable { method_id, .. } => method_id,
        }
    }

    /// The quote, if the method can ship this cart.
    pub fn quote(&self) -> Option<&ShippingQuote> {
        match self {
            ShippingOption::Available(quote) => Some(quote),
            ShippingOption::Unavailable { .. } => None,
        }
    }
}
