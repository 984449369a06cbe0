//! Configuration schema definitions.
//!
//! This module defines the shipping table a storefront deployment ships with.
//! All types derive Serde traits for deserialization from config files. Keys
//! are snake_case; the storefront's legacy spellings are accepted as aliases.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Root shipping table for one storefront deployment.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ShippingConfig {
    /// Destination countries the storefront ships to.
    #[serde(alias = "AVAILABLE_COUNTRIES")]
    pub available_countries: BTreeSet<String>,

    /// Countries where cash on delivery is accepted.
    #[serde(default, alias = "COD_COUNTRIES")]
    pub cod_countries: BTreeSet<String>,

    /// Minimum cart subtotal for free delivery.
    #[serde(alias = "FREE_SHIPPING_THRESHOLD")]
    pub free_shipping_threshold: Decimal,

    /// Heaviest package (kg) still delivered for free.
    #[serde(alias = "FREE_MAX_WEIGHT")]
    pub free_max_weight: Decimal,

    /// Weight bands for tiered methods, ascending by `max_weight`.
    #[serde(default, alias = "EXPRESS_TIERS")]
    pub express_tiers: Vec<WeightTier>,

    /// Offered shipping methods in display order.
    #[serde(alias = "SHIPPING_METHODS")]
    pub shipping_methods: Vec<ShippingMethod>,
}

/// A (ceiling, price) band.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WeightTier {
    /// Heaviest package (kg) this band accepts.
    #[serde(alias = "max_w")]
    pub max_weight: Decimal,

    pub price: Decimal,
}

/// A shipping method offered at checkout.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ShippingMethod {
    /// Unique method identifier (e.g. "express").
    pub id: String,

    /// Display name.
    pub name: String,

    /// Delivery estimate shown to the customer.
    #[serde(default, alias = "desc")]
    pub description: String,

    /// Flat price, or the advertised "from" price for tiered methods.
    #[serde(alias = "price")]
    pub base_price: Decimal,

    /// Whether the free shipping threshold applies to this method.
    #[serde(default)]
    pub is_free_eligible: bool,

    /// Price by `express_tiers` instead of `base_price`.
    #[serde(default, alias = "use_weight_tiers")]
    pub uses_weight_tiers: bool,

    /// Hard weight limit (kg) for this method.
    #[serde(default, alias = "max_w", skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<Decimal>,
}
