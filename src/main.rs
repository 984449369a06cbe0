//! Shipping rate CLI.
//!
//! Loads a storefront shipping table once and answers queries against it:
//!
//! ```text
//! shipping-rates --config config/storefront.toml validate
//! shipping-rates --config config/storefront.toml quote --country Germany --subtotal 1200 --weight 5 --method standard
//! shipping-rates --config config/storefront.toml options --country Spain --subtotal 300 --weight 3.5
//! shipping-rates --config config/storefront.toml cod --country Greece
//! ```
//!
//! Results are printed as JSON on stdout; logs go to stderr.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use shipping_rates::config::{ConfigError, ValidationError};
use shipping_rates::observability::init_logging;
use shipping_rates::{ShippingError, ShippingRateResolver};

#[derive(Parser)]
#[command(name = "shipping-rates")]
#[command(about = "Resolve storefront shipping prices from a shipping table", long_about = None)]
struct Cli {
    /// Shipping table (.toml or .json).
    #[arg(short, long, default_value = "config/storefront.toml")]
    config: PathBuf,

    /// Default log level when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the shipping table and print a summary
    Validate,
    /// Price one shipping method for a cart
    Quote {
        #[arg(long)]
        country: String,
        #[arg(long)]
        subtotal: Decimal,
        #[arg(long)]
        weight: Decimal,
        #[arg(long)]
        method: String,
    },
    /// Price every shipping method for a cart
    Options {
        #[arg(long)]
        country: String,
        #[arg(long)]
        subtotal: Decimal,
        #[arg(long)]
        weight: Decimal,
    },
    /// Check cash on delivery availability
    Cod {
        #[arg(long)]
        country: String,
    },
    /// List served countries
    Countries,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let resolver = match ShippingRateResolver::from_path(&cli.config) {
        Ok(resolver) => resolver,
        Err(ConfigError::InvalidConfig(errors)) => {
            print_json(&invalid_table_report(&cli.config, &errors))?;
            return Err(format!("{} validation error(s)", errors.len()).into());
        }
        Err(e) => return Err(e.into()),
    };

    let output = run(&cli.command, &cli.config, &resolver)?;
    print_json(&output)?;

    Ok(())
}

/// Execute one subcommand against a loaded table.
fn run(
    command: &Commands,
    config_path: &Path,
    resolver: &ShippingRateResolver,
) -> Result<Value, ShippingError> {
    let output = match command {
        Commands::Validate => {
            let config = resolver.config();
            json!({
                "config": config_path.display().to_string(),
                "valid": true,
                "countries": config.available_countries.len(),
                "cod_countries": config.cod_countries.len(),
                "express_tiers": config.express_tiers.len(),
                "methods": resolver.methods().iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
            })
        }
        Commands::Quote {
            country,
            subtotal,
            weight,
            method,
        } => json!(resolver.resolve(country, *subtotal, *weight, method)?),
        Commands::Options {
            country,
            subtotal,
            weight,
        } => {
            let options = resolver.options(country, *subtotal, *weight)?;
            json!({
                "country": country.trim(),
                "cod_available": resolver.is_cod_available(country),
                "free_shipping_shortfall": resolver.free_shipping_shortfall(*subtotal),
                "options": options,
            })
        }
        Commands::Cod { country } => json!({
            "country": country.trim(),
            "cod_available": resolver.is_cod_available(country),
        }),
        Commands::Countries => json!(resolver.available_countries().collect::<Vec<_>>()),
    };

    Ok(output)
}

/// Report for a table that failed validation, listing every violation.
fn invalid_table_report(config_path: &Path, errors: &[ValidationError]) -> Value {
    json!({
        "config": config_path.display().to_string(),
        "valid": false,
        "errors": errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
