//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (COD countries are served countries)
//! - Validate value ranges (weights > 0, prices >= 0)
//! - Check tier ordering and free-method uniqueness
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ShippingConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::schema::ShippingConfig;

/// A single semantic problem in a shipping table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no available countries configured")]
    NoCountries,

    #[error("COD country '{0}' is not an available country")]
    CodCountryNotAvailable(String),

    #[error("free shipping threshold must not be negative, got {0}")]
    NegativeThreshold(Decimal),

    #[error("free shipping max weight must be positive, got {0}")]
    NonPositiveFreeWeight(Decimal),

    #[error("express tier {index}: max weight must be positive, got {max_weight}")]
    NonPositiveTierWeight { index: usize, max_weight: Decimal },

    #[error("express tier {index}: price must not be negative, got {price}")]
    NegativeTierPrice { index: usize, price: Decimal },

    #[error("express tier {index}: max weight {max_weight} does not exceed previous tier's {previous}")]
    TiersNotIncreasing {
        index: usize,
        max_weight: Decimal,
        previous: Decimal,
    },

    #[error("no shipping methods configured")]
    NoMethods,

    #[error("shipping method at position {0} has an empty id")]
    EmptyMethodId(usize),

    #[error("duplicate shipping method id '{0}'")]
    DuplicateMethodId(String),

    #[error("expected exactly one free-eligible shipping method, found {0}")]
    FreeEligibleCount(usize),

    #[error("shipping method '{0}': base price must not be negative")]
    NegativeBasePrice(String),

    #[error("shipping method '{id}': max weight must be positive, got {max_weight}")]
    NonPositiveMethodWeight { id: String, max_weight: Decimal },

    #[error("shipping method '{0}' uses weight tiers but no express tiers are configured")]
    MissingTiers(String),

    #[error("shipping method '{id}': base price {base_price} does not match any express tier price")]
    TieredBasePrice { id: String, base_price: Decimal },
}

/// Validate a deserialized shipping table, collecting every violation.
pub fn validate_config(config: &ShippingConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_countries(config, &mut errors);
    validate_free_shipping(config, &mut errors);
    validate_tiers(config, &mut errors);
    validate_methods(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_countries(config: &ShippingConfig, errors: &mut Vec<ValidationError>) {
    if config.available_countries.is_empty() {
        errors.push(ValidationError::NoCountries);
    }

    errors.extend(
        config
            .cod_countries
            .difference(&config.available_countries)
            .map(|country| ValidationError::CodCountryNotAvailable(country.clone())),
    );
}

fn validate_free_shipping(config: &ShippingConfig, errors: &mut Vec<ValidationError>) {
    if config.free_shipping_threshold < Decimal::ZERO {
        errors.push(ValidationError::NegativeThreshold(config.free_shipping_threshold));
    }
    if config.free_max_weight <= Decimal::ZERO {
        errors.push(ValidationError::NonPositiveFreeWeight(config.free_max_weight));
    }
}

fn validate_tiers(config: &ShippingConfig, errors: &mut Vec<ValidationError>) {
    let mut previous: Option<Decimal> = None;

    for (index, tier) in config.express_tiers.iter().enumerate() {
        if tier.max_weight <= Decimal::ZERO {
            errors.push(ValidationError::NonPositiveTierWeight {
                index,
                max_weight: tier.max_weight,
            });
        }
        if tier.price < Decimal::ZERO {
            errors.push(ValidationError::NegativeTierPrice {
                index,
                price: tier.price,
            });
        }
        if let Some(previous) = previous {
            if tier.max_weight <= previous {
                errors.push(ValidationError::TiersNotIncreasing {
                    index,
                    max_weight: tier.max_weight,
                    previous,
                });
            }
        }
        previous = Some(tier.max_weight);
    }
}

fn validate_methods(config: &ShippingConfig, errors: &mut Vec<ValidationError>) {
    if config.shipping_methods.is_empty() {
        errors.push(ValidationError::NoMethods);
        return;
    }

    let mut seen = HashSet::new();
    for (position, method) in config.shipping_methods.iter().enumerate() {
        if method.id.trim().is_empty() {
            errors.push(ValidationError::EmptyMethodId(position));
        } else if !seen.insert(method.id.as_str()) {
            errors.push(ValidationError::DuplicateMethodId(method.id.clone()));
        }

        if method.base_price < Decimal::ZERO {
            errors.push(ValidationError::NegativeBasePrice(method.id.clone()));
        }

        if let Some(max_weight) = method.max_weight {
            if max_weight <= Decimal::ZERO {
                errors.push(ValidationError::NonPositiveMethodWeight {
                    id: method.id.clone(),
                    max_weight,
                });
            }
        }

        if method.uses_weight_tiers {
            if config.express_tiers.is_empty() {
                errors.push(ValidationError::MissingTiers(method.id.clone()));
            } else if !config
                .express_tiers
                .iter()
                .any(|tier| tier.price == method.base_price)
            {
                errors.push(ValidationError::TieredBasePrice {
                    id: method.id.clone(),
                    base_price: method.base_price,
                });
            }
        }
    }

    let free_eligible = config
        .shipping_methods
        .iter()
        .filter(|method| method.is_free_eligible)
        .count();
    if free_eligible != 1 {
        errors.push(ValidationError::FreeEligibleCount(free_eligible));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ShippingMethod, WeightTier};

    fn method(id: &str, base_price: Decimal) -> ShippingMethod {
        ShippingMethod {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            base_price,
            is_free_eligible: false,
            uses_weight_tiers: false,
            max_weight: None,
        }
    }

    fn valid_config() -> ShippingConfig {
        let mut standard = method("standard", Decimal::ZERO);
        standard.is_free_eligible = true;
        let mut express = method("express", Decimal::new(17999, 2));
        express.uses_weight_tiers = true;

        ShippingConfig {
            available_countries: ["Germany", "Greece"].iter().map(|c| c.to_string()).collect(),
            cod_countries: ["Greece"].iter().map(|c| c.to_string()).collect(),
            free_shipping_threshold: Decimal::from(1000),
            free_max_weight: Decimal::new(68, 1),
            express_tiers: vec![
                WeightTier {
                    max_weight: Decimal::new(22, 1),
                    price: Decimal::new(8999, 2),
                },
                WeightTier {
                    max_weight: Decimal::new(45, 1),
                    price: Decimal::new(17999, 2),
                },
            ],
            shipping_methods: vec![standard, express],
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert_eq!(validate_config(&valid_config()), Ok(()));
    }

    #[test]
    fn test_cod_must_be_subset() {
        let mut config = valid_config();
        config.cod_countries.insert("Brazil".to_string());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::CodCountryNotAvailable("Brazil".into())]);
    }

    #[test]
    fn test_tiers_must_strictly_increase() {
        let mut config = valid_config();
        config.express_tiers[1].max_weight = Decimal::new(22, 1);

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::TiersNotIncreasing { index: 1, .. }
        ));
    }

    #[test]
    fn test_exactly_one_free_method() {
        let mut config = valid_config();
        config.shipping_methods[1].is_free_eligible = true;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::FreeEligibleCount(2)]
        );

        config.shipping_methods[0].is_free_eligible = false;
        config.shipping_methods[1].is_free_eligible = false;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::FreeEligibleCount(0)]
        );
    }

    #[test]
    fn test_tiered_method_price_must_come_from_tiers() {
        let mut config = valid_config();
        config.shipping_methods[1].base_price = Decimal::new(9999, 2);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::TieredBasePrice {
                id: "express".into(),
                base_price: Decimal::new(9999, 2),
            }]
        );
    }

    #[test]
    fn test_tiered_method_needs_tiers() {
        let mut config = valid_config();
        config.express_tiers.clear();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingTiers("express".into())]);
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.available_countries.clear();
        config.free_max_weight = Decimal::ZERO;
        config.shipping_methods.push(method("standard", Decimal::from(-1)));

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::NoCountries));
        assert!(errors.contains(&ValidationError::CodCountryNotAvailable("Greece".into())));
        assert!(errors.contains(&ValidationError::NonPositiveFreeWeight(Decimal::ZERO)));
        assert!(errors.contains(&ValidationError::DuplicateMethodId("standard".into())));
        assert!(errors.contains(&ValidationError::NegativeBasePrice("standard".into())));
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::TiersNotIncreasing {
            index: 2,
            max_weight: Decimal::from(4),
            previous: Decimal::from(5),
        };
        assert_eq!(
            err.to_string(),
            "express tier 2: max weight 4 does not exceed previous tier's 5"
        );
    }
}
