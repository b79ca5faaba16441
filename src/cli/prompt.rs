//! Interactive choice between currencies that share a symbol.

use super::ui::{self, StyleType};
use crate::core::ConvertError;
use crate::core::symbol::{CurrencyChooser, SymbolEntry};
use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::debug;

pub const CHOICE_PROMPT: &str = "Please specify the currency by typing its 3 letter code: ";
pub const INVALID_CHOICE: &str = "Please choose an existing code from the list.";

/// Lists the candidates on `writer` and reads answers from `reader` until one
/// of the candidate codes is typed.
pub struct Prompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Prompt { reader, writer }
    }
}

impl Prompt<io::StdinLock<'static>, io::Stderr> {
    /// Prompts on stderr so stdout only ever carries the JSON result.
    pub fn stdio() -> Self {
        Prompt::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> CurrencyChooser for Prompt<R, W> {
    fn choose(&mut self, candidates: &[&SymbolEntry]) -> Result<String> {
        for candidate in candidates {
            writeln!(
                self.writer,
                "{} {}",
                ui::style_text(&candidate.code, StyleType::Code),
                candidate.name
            )?;
        }

        loop {
            write!(self.writer, "{CHOICE_PROMPT}")?;
            self.writer.flush()?;

            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return Err(ConvertError::InputCancelled.into()),
                Ok(_) => {}
                // Undecodable input counts as a wrong answer.
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    debug!(error = %e, "Ignoring unreadable answer");
                    line.clear();
                }
                Err(e) => return Err(e.into()),
            }

            let answer = line.trim();
            if candidates.iter().any(|c| c.code == answer) {
                return Ok(answer.to_string());
            }
            writeln!(self.writer, "{}", ui::style_text(INVALID_CHOICE, StyleType::Error))?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn candidates() -> Vec<SymbolEntry> {
        [("AUD", "Australian Dollar"), ("CAD", "Canadian Dollar"), ("USD", "US Dollar")]
            .into_iter()
            .map(|(code, name)| SymbolEntry {
                code: code.to_string(),
                name: name.to_string(),
                native_symbol: "$".to_string(),
            })
            .collect()
    }

    fn run_prompt(input: &[u8]) -> (Result<String>, String) {
        let entries = candidates();
        let refs: Vec<&SymbolEntry> = entries.iter().collect();
        let mut output = Vec::new();
        let result = Prompt::new(Cursor::new(input.to_vec()), &mut output).choose(&refs);
        let text = console::strip_ansi_codes(&String::from_utf8_lossy(&output)).to_string();
        (result, text)
    }

    #[test]
    fn test_lists_candidates_and_accepts_valid_code() {
        let (result, output) = run_prompt(b"CAD\n");
        assert_eq!(result.unwrap(), "CAD");
        assert!(output.starts_with("AUD Australian Dollar\nCAD Canadian Dollar\nUSD US Dollar\n"));
        assert_eq!(output.matches(CHOICE_PROMPT).count(), 1);
        assert!(!output.contains(INVALID_CHOICE));
    }

    #[test]
    fn test_rejects_codes_outside_candidates() {
        let (result, output) = run_prompt(b"EUR\ncad\n\n  USD  \n");
        assert_eq!(result.unwrap(), "USD");
        assert_eq!(output.matches(INVALID_CHOICE).count(), 3);
        assert_eq!(output.matches(CHOICE_PROMPT).count(), 4);
    }

    #[test]
    fn test_invalid_utf8_answer_is_retried() {
        let (result, output) = run_prompt(b"\xff\xfe\nAUD\n");
        assert_eq!(result.unwrap(), "AUD");
        assert_eq!(output.matches(INVALID_CHOICE).count(), 1);
    }

    #[test]
    fn test_closed_input_cancels() {
        let (result, _) = run_prompt(b"GBP\n");
        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConvertError>(),
            Some(&ConvertError::InputCancelled)
        );
    }
}
