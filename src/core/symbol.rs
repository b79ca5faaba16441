//! Currency symbol table and symbol to code resolution

use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub code: String,
    pub name: String,
    pub native_symbol: String,
}

/// All known currencies keyed by ISO code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: BTreeMap<String, SymbolEntry>,
}

impl SymbolTable {
    pub fn new(entries: impl IntoIterator<Item = SymbolEntry>) -> Self {
        SymbolTable {
            entries: entries
                .into_iter()
                .map(|entry| (entry.code.clone(), entry))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns every currency whose native symbol is exactly `symbol`, ordered by code.
    pub fn find_symbol(&self, symbol: &str) -> Vec<&SymbolEntry> {
        self.entries
            .values()
            .filter(|entry| entry.native_symbol == symbol)
            .collect()
    }
}

#[async_trait]
pub trait SymbolProvider: Send + Sync {
    async fn fetch_symbols(&self) -> Result<SymbolTable>;
}

/// Picks one code out of several currencies sharing a symbol.
pub trait CurrencyChooser {
    fn choose(&mut self, candidates: &[&SymbolEntry]) -> Result<String>;
}

/// Turns user input (an ISO code or a native symbol) into an ISO code.
///
/// Input that matches no symbol is taken as a code. A single match resolves
/// silently, several matches are handed to `chooser`.
pub fn resolve_currency(
    input: &str,
    table: &SymbolTable,
    chooser: &mut dyn CurrencyChooser,
) -> Result<String> {
    let found = table.find_symbol(input);
    match found.as_slice() {
        [] => Ok(normalize_code(input)),
        [only] => {
            debug!(symbol = input, code = %only.code, "Resolved symbol");
            Ok(only.code.clone())
        }
        candidates => {
            debug!(symbol = input, count = candidates.len(), "Ambiguous symbol");
            chooser.choose(candidates)
        }
    }
}

fn normalize_code(input: &str) -> String {
    if input.len() == 3 && input.chars().all(|c| c.is_ascii_alphabetic()) {
        input.to_ascii_uppercase()
    } else {
        input.to_string()
    }
}
