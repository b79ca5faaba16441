//! Amount conversion and result rendering

use crate::core::{ConvertError, RateTable};
use anyhow::{Result, anyhow};
use serde::Serialize;
use std::collections::BTreeMap;

/// What the user asked for, as given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub input_currency: String,
    pub output_currency: Option<String>,
}

impl ConversionRequest {
    pub fn new(amount: f64, input_currency: &str, output_currency: Option<&str>) -> Result<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ConvertError::InvalidArgument(format!(
                "amount must be a positive number, got {amount}"
            ))
            .into());
        }
        if input_currency.trim().is_empty() {
            return Err(
                ConvertError::InvalidArgument("input_currency must not be empty".into()).into(),
            );
        }
        Ok(ConversionRequest {
            amount,
            input_currency: input_currency.trim().to_string(),
            output_currency: output_currency
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputAmount {
    pub amount: f64,
    pub currency: String,
}

/// Field order matches the sorted key order of the rendered JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub input: InputAmount,
    pub output: BTreeMap<String, f64>,
}

impl ConversionResult {
    /// Renders the result with a 4-space indent and sorted keys.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8(buf)?)
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// True when converting `base` into `output` needs a rate table at all.
pub fn needs_rates(base: &str, output: Option<&str>) -> bool {
    output != Some(base)
}

/// Converts `amount` of `base` into `output`, or into every listed currency
/// when `output` is `None`.
///
/// Converting a currency to itself returns the amount unchanged and ignores `rates`.
pub fn convert(
    amount: f64,
    base: &str,
    output: Option<&str>,
    rates: Option<&RateTable>,
) -> Result<ConversionResult> {
    let input = InputAmount {
        amount,
        currency: base.to_string(),
    };

    if !needs_rates(base, output) {
        return Ok(ConversionResult {
            input,
            output: BTreeMap::from([(base.to_string(), amount)]),
        });
    }

    let rates = rates.ok_or_else(|| anyhow!("No exchange rates available for {base}"))?;
    if !rates.base.eq_ignore_ascii_case(base) {
        return Err(anyhow!(
            "Exchange rates are based on {} but {} was requested",
            rates.base,
            base
        ));
    }
    let output = match output {
        Some(code) => {
            let rate = rates
                .rate(code)
                .ok_or_else(|| ConvertError::UnknownCurrency(code.to_string()))?;
            BTreeMap::from([(code.to_string(), round2(amount * rate))])
        }
        None => rates
            .rates
            .iter()
            .map(|(code, rate)| (code.clone(), round2(amount * rate)))
            .collect(),
    };

    Ok(ConversionResult { input, output })
}
