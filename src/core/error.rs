//! Error kinds surfaced to the user.
//!
//! Library functions return `anyhow::Result`; the variants below are the
//! failures callers may want to tell apart with `downcast_ref`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// A command line value that parsed but is not usable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Fetching or decoding a remote table failed.
    #[error("Network error: {0}")]
    Network(String),

    /// The requested output currency is missing from the rate table.
    #[error("Unknown output_currency: {0}")]
    UnknownCurrency(String),

    /// Standard input closed while a currency choice was pending.
    #[error("Input cancelled while choosing a currency")]
    InputCancelled,
}
