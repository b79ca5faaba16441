//! Core business logic abstractions

pub mod config;
pub mod converter;
pub mod error;
pub mod log;
pub mod rate;
pub mod symbol;

// Re-export main types for cleaner imports
pub use converter::{ConversionRequest, ConversionResult};
pub use error::ConvertError;
pub use rate::{RateProvider, RateTable};
pub use symbol::{SymbolEntry, SymbolProvider, SymbolTable};
