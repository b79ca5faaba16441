use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use super::USER_AGENT;
use crate::core::{ConvertError, SymbolEntry, SymbolProvider, SymbolTable};

/// Downloads the currency metadata table, a JSON object keyed by ISO code.
pub struct HttpSymbolProvider {
    url: String,
}

impl HttpSymbolProvider {
    pub fn new(url: &str) -> Self {
        HttpSymbolProvider {
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CurrencyMetadata {
    name: String,
    symbol_native: String,
}

#[async_trait]
impl SymbolProvider for HttpSymbolProvider {
    #[instrument(name = "SymbolsFetch", skip(self))]
    async fn fetch_symbols(&self) -> Result<SymbolTable> {
        debug!("Requesting symbol table from {}", self.url);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client.get(&self.url).send().await.map_err(|e| {
            ConvertError::Network(format!("Request error: {} for symbol table: {}", e, self.url))
        })?;

        if !response.status().is_success() {
            return Err(ConvertError::Network(format!(
                "HTTP error: {} for symbol table: {}",
                response.status(),
                self.url
            ))
            .into());
        }

        let text = response.text().await.map_err(|e| {
            ConvertError::Network(format!("Failed to read symbol table response: {e}"))
        })?;

        let data: BTreeMap<String, CurrencyMetadata> = serde_json::from_str(&text)
            .map_err(|e| ConvertError::Network(format!("Failed to parse symbol table: {e}")))?;

        let table = SymbolTable::new(data.into_iter().map(|(code, meta)| SymbolEntry {
            code,
            name: meta.name,
            native_symbol: meta.symbol_native,
        }));
        debug!(count = table.len(), "Received symbol table");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(template: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/currencies.json"))
            .respond_with(template)
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_successful_symbols_fetch() {
        let mock_response = r#"{
            "USD": {"symbol": "$", "name": "US Dollar", "symbol_native": "$",
                    "decimal_digits": 2, "rounding": 0, "code": "USD", "name_plural": "US dollars"},
            "CZK": {"symbol": "CZK", "name": "Czech Republic Koruna", "symbol_native": "Kč",
                    "decimal_digits": 2, "rounding": 0, "code": "CZK", "name_plural": "Czech Republic korunas"}
        }"#;
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(mock_response)).await;

        let provider = HttpSymbolProvider::new(&format!("{}/currencies.json", mock_server.uri()));
        let table = provider.fetch_symbols().await.unwrap();
        assert_eq!(table.len(), 2);
        let czk = table.find_symbol("Kč");
        assert_eq!(czk.len(), 1);
        assert_eq!(czk[0].code, "CZK");
        assert_eq!(czk[0].name, "Czech Republic Koruna");
        assert_eq!(table.find_symbol("$")[0].code, "USD");
    }

    #[tokio::test]
    async fn test_symbols_http_error() {
        let mock_server = create_mock_server(ResponseTemplate::new(500)).await;

        let url = format!("{}/currencies.json", mock_server.uri());
        let provider = HttpSymbolProvider::new(&url);
        let err = provider.fetch_symbols().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Network error: HTTP error: 500 Internal Server Error for symbol table: {url}")
        );
    }

    #[tokio::test]
    async fn test_symbols_malformed_response() {
        let mock_server = create_mock_server(
            ResponseTemplate::new(200).set_body_string(r#"{"USD": {"name": "US Dollar"}}"#),
        )
        .await;

        let provider = HttpSymbolProvider::new(&format!("{}/currencies.json", mock_server.uri()));
        let err = provider.fetch_symbols().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConvertError>(),
            Some(ConvertError::Network(_))
        ));
        assert!(err.to_string().contains("Failed to parse symbol table"));
    }
}
