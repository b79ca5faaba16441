pub mod rates;
pub mod symbols;

pub use rates::HttpRateProvider;
pub use symbols::HttpSymbolProvider;

pub(crate) const USER_AGENT: &str = concat!("curconv/", env!("CARGO_PKG_VERSION"));
