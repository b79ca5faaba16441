use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use super::USER_AGENT;
use crate::core::{ConvertError, RateProvider, RateTable};

/// Fetches the latest rates from a `/latest?base=` style endpoint.
pub struct HttpRateProvider {
    base_url: String,
}

impl HttpRateProvider {
    pub fn new(base_url: &str) -> Self {
        HttpRateProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    base: Option<String>,
    rates: Option<BTreeMap<String, f64>>,
    date: Option<NaiveDate>,
    error: Option<serde_json::Value>,
}

fn describe_api_error(error: &serde_json::Value) -> String {
    match error {
        serde_json::Value::String(msg) => msg.clone(),
        serde_json::Value::Object(fields) => fields
            .get("info")
            .or_else(|| fields.get("type"))
            .and_then(|v| v.as_str())
            .map_or_else(|| error.to_string(), str::to_string),
        other => other.to_string(),
    }
}

fn network_error(msg: String) -> anyhow::Error {
    ConvertError::Network(msg).into()
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    #[instrument(name = "RatesFetch", skip(self), fields(base = %base))]
    async fn fetch_rates(&self, base: &str) -> Result<RateTable> {
        // The base goes through query encoding, user input may contain `#` or `&`.
        let url = reqwest::Url::parse_with_params(
            &format!("{}/latest", self.base_url),
            &[("base", base)],
        )
        .with_context(|| format!("Invalid rates base URL: {}", self.base_url))?;
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(format!("Request error: {e} for base currency: {base}")))?;

        if !response.status().is_success() {
            return Err(network_error(format!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                base
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| network_error(format!("Failed to read response for {base}: {e}")))?;

        let data: LatestRatesResponse = serde_json::from_str(&text).map_err(|e| {
            network_error(format!("Failed to parse JSON response for {base}: {e}"))
        })?;

        if let Some(error) = &data.error {
            return Err(network_error(format!(
                "Rate service rejected base currency {}: {}",
                base,
                describe_api_error(error)
            )));
        }

        let rates = data
            .rates
            .ok_or_else(|| network_error(format!("No rate data found for base currency: {base}")))?;

        let served_base = data.base.unwrap_or_else(|| base.to_string());
        if !served_base.eq_ignore_ascii_case(base) {
            return Err(network_error(format!(
                "Rate service returned rates for {served_base} instead of base currency: {base}"
            )));
        }

        let table = RateTable {
            base: served_base,
            rates,
            date: data.date,
        };
        debug!(count = table.rates.len(), date = ?table.date, "Received exchange rates");
        Ok(table)
    }
}
