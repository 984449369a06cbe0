//! Core logic for resolving shipping prices against a shipping table.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::{ShippingConfig, ShippingMethod};
use crate::config::validation::validate_config;
use crate::quoting::types::{
    PricingRule, QuoteRequest, ShippingError, ShippingOption, ShippingQuote, ShippingResult,
};

/// Resolves shipping prices over an immutable, validated shipping table.
#[derive(Debug, Clone)]
pub struct ShippingRateResolver {
    config: ShippingConfig,
    methods_by_id: HashMap<String, usize>,
}

impl ShippingRateResolver {
    /// Create a resolver, rejecting tables that break any invariant.
    pub fn new(config: ShippingConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::InvalidConfig)?;
        Ok(Self::from_validated(config))
    }

    /// Load a shipping table from disk and build a resolver over it.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        // load_config has already validated the table.
        Ok(Self::from_validated(load_config(path)?))
    }

    fn from_validated(config: ShippingConfig) -> Self {
        let methods_by_id = config
            .shipping_methods
            .iter()
            .enumerate()
            .map(|(index, method)| (method.id.clone(), index))
            .collect();

        Self {
            config,
            methods_by_id,
        }
    }

    /// The underlying shipping table.
    pub fn config(&self) -> &ShippingConfig {
        &self.config
    }

    /// Resolve the price of `method_id` for a cart shipped to `country`.
    pub fn resolve(
        &self,
        country: &str,
        subtotal: Decimal,
        weight: Decimal,
        method_id: &str,
    ) -> ShippingResult<ShippingQuote> {
        let country = self.check_country(country)?;
        let method = self
            .method(method_id)
            .ok_or_else(|| ShippingError::UnknownMethod(method_id.to_string()))?;
        check_amounts(subtotal, weight)?;

        let quote = self.price_method(method, subtotal, weight)?;

        tracing::debug!(
            country,
            method = %quote.method_id,
            %subtotal,
            %weight,
            price = %quote.price,
            rule = ?quote.rule,
            "Shipping price resolved"
        );

        Ok(quote)
    }

    /// Resolve a [`QuoteRequest`].
    pub fn quote(&self, request: &QuoteRequest) -> ShippingResult<ShippingQuote> {
        self.resolve(
            &request.country,
            request.subtotal,
            request.weight,
            &request.method_id,
        )
    }

    /// Price every configured method for a cart, in display order.
    ///
    /// Methods that cannot carry the cart are listed as unavailable rather
    /// than failing the whole call; only an unsupported country does that.
    pub fn options(
        &self,
        country: &str,
        subtotal: Decimal,
        weight: Decimal,
    ) -> ShippingResult<Vec<ShippingOption>> {
        self.check_country(country)?;
        check_amounts(subtotal, weight)?;

        let options = self
            .config
            .shipping_methods
            .iter()
            .map(|method| match self.price_method(method, subtotal, weight) {
                Ok(quote) => ShippingOption::Available(quote),
                Err(err) => ShippingOption::Unavailable {
                    method_id: method.id.clone(),
                    method_name: method.name.clone(),
                    reason: err.to_string(),
                },
            })
            .collect();

        Ok(options)
    }

    /// Whether cash on delivery is accepted in `country`.
    pub fn is_cod_available(&self, country: &str) -> bool {
        self.config.cod_countries.contains(country.trim())
    }

    /// Served countries, sorted.
    pub fn available_countries(&self) -> impl Iterator<Item = &str> {
        self.config.available_countries.iter().map(String::as_str)
    }

    /// Look up a shipping method by id.
    pub fn method(&self, id: &str) -> Option<&ShippingMethod> {
        self.methods_by_id
            .get(id)
            .map(|&index| &self.config.shipping_methods[index])
    }

    /// Configured methods in display order.
    pub fn methods(&self) -> &[ShippingMethod] {
        &self.config.shipping_methods
    }

    /// Amount still missing from `subtotal` to reach free shipping.
    ///
    /// Negative subtotals count as zero.
    pub fn free_shipping_shortfall(&self, subtotal: Decimal) -> Decimal {
        let subtotal = subtotal.max(Decimal::ZERO);
        (self.config.free_shipping_threshold - subtotal).max(Decimal::ZERO)
    }

    fn check_country<'a>(&self, country: &'a str) -> ShippingResult<&'a str> {
        let country = country.trim();
        if self.config.available_countries.contains(country) {
            Ok(country)
        } else {
            Err(ShippingError::UnsupportedCountry(country.to_string()))
        }
    }

    fn price_method(
        &self,
        method: &ShippingMethod,
        subtotal: Decimal,
        weight: Decimal,
    ) -> ShippingResult<ShippingQuote> {
        if let Some(max_weight) = method.max_weight {
            if weight > max_weight {
                return Err(ShippingError::WeightExceeded { weight, max_weight });
            }
        }

        let (price, rule) = if method.is_free_eligible && self.qualifies_for_free(subtotal, weight) {
            (Decimal::ZERO, PricingRule::Free)
        } else if method.uses_weight_tiers {
            self.tier_price(weight)?
        } else {
            (method.base_price, PricingRule::Flat)
        };

        Ok(ShippingQuote {
            method_id: method.id.clone(),
            method_name: method.name.clone(),
            price,
            eta_description: method.description.clone(),
            rule,
        })
    }

    fn qualifies_for_free(&self, subtotal: Decimal, weight: Decimal) -> bool {
        subtotal >= self.config.free_shipping_threshold && weight <= self.config.free_max_weight
    }

    /// First tier (ascending) whose ceiling accommodates `weight`.
    fn tier_price(&self, weight: Decimal) -> ShippingResult<(Decimal, PricingRule)> {
        let tiers = &self.config.express_tiers;
        match tiers.iter().find(|tier| weight <= tier.max_weight) {
            Some(tier) => Ok((
                tier.price,
                PricingRule::Tier {
                    max_weight: tier.max_weight,
                },
            )),
            None => Err(ShippingError::WeightExceeded {
                weight,
                max_weight: tiers.last().map(|tier| tier.max_weight).unwrap_or_default(),
            }),
        }
    }
}

fn check_amounts(subtotal: Decimal, weight: Decimal) -> ShippingResult<()> {
    if subtotal < Decimal::ZERO {
        return Err(ShippingError::InvalidRequest(format!(
            "subtotal must not be negative, got {subtotal}"
        )));
    }
    if weight < Decimal::ZERO {
        return Err(ShippingError::InvalidRequest(format!(
            "weight must not be negative, got {weight}"
        )));
    }
    Ok(())
}
