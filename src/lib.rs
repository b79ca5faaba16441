pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::converter::{self, ConversionRequest, ConversionResult};
use crate::core::symbol::{CurrencyChooser, resolve_currency};
use crate::core::{RateProvider, SymbolProvider};
use anyhow::Result;
use tracing::{debug, info};

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Runs a conversion against the HTTP services named in `config`.
pub async fn run(
    request: &ConversionRequest,
    config: &AppConfig,
    chooser: &mut dyn CurrencyChooser,
) -> Result<ConversionResult> {
    let symbol_provider = providers::HttpSymbolProvider::new(&config.providers.symbols.url);
    let rate_provider = providers::HttpRateProvider::new(&config.providers.rates.base_url);
    convert_with(request, &symbol_provider, &rate_provider, chooser).await
}

/// Resolves both currencies, fetches rates when the conversion needs them and
/// converts. Any failure aborts before a result exists.
pub async fn convert_with(
    request: &ConversionRequest,
    symbol_provider: &dyn SymbolProvider,
    rate_provider: &dyn RateProvider,
    chooser: &mut dyn CurrencyChooser,
) -> Result<ConversionResult> {
    info!(amount = request.amount, input = %request.input_currency, "Converting");

    let symbols = symbol_provider.fetch_symbols().await?;
    let base = resolve_currency(&request.input_currency, &symbols, chooser)?;
    let output = request
        .output_currency
        .as_deref()
        .map(|out| resolve_currency(out, &symbols, chooser))
        .transpose()?;
    debug!(%base, ?output, "Resolved currencies");

    let rates = if converter::needs_rates(&base, output.as_deref()) {
        Some(rate_provider.fetch_rates(&base).await?)
    } else {
        debug!("Same input and output currency, skipping rate lookup");
        None
    };

    converter::convert(request.amount, &base, output.as_deref(), rates.as_ref())
}
