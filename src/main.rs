use anyhow::Result;
use clap::Parser;
use curconv::cli::prompt::Prompt;
use curconv::cli::ui::{StyleType, style_text};
use curconv::core::ConversionRequest;
use curconv::core::log::init_logging;
use std::process::ExitCode;

const AFTER_HELP: &str = "Example:\n  curconv --amount 100.0 --input_currency EUR --output_currency CZK";

#[derive(Parser)]
#[command(version, about, after_help = AFTER_HELP)]
struct Cli {
    /// Amount to convert
    #[arg(long, value_parser = parse_amount)]
    amount: f64,

    /// Input currency, a 3 letter code or a currency symbol
    #[arg(long = "input_currency")]
    input_currency: String,

    /// Output currency, a 3 letter code or a currency symbol; all known currencies when omitted
    #[arg(long = "output_currency")]
    output_currency: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long = "config_path")]
    config_path: Option<String>,
}

fn parse_amount(value: &str) -> Result<f64, String> {
    let amount: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(format!("amount must be a positive number, got {value}"));
    }
    Ok(amount)
}

async fn execute(cli: &Cli) -> Result<String> {
    let request = ConversionRequest::new(
        cli.amount,
        &cli.input_currency,
        cli.output_currency.as_deref(),
    )?;
    let config = curconv::load_config(cli.config_path.as_deref())?;
    let result = curconv::run(&request, &config, &mut Prompt::stdio()).await?;
    result.to_pretty_json()
}

#[tokio::main]
async fn main() -> ExitCode {
    // Usage errors exit with status 2 before anything touches the network.
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match execute(&cli).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = ?e, "Conversion failed");
            eprintln!("{}", style_text(&format!("Error: {e}"), StyleType::Error));
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "curconv",
            "--amount",
            "12.5",
            "--input_currency",
            "€",
            "--output_currency",
            "CZK",
        ])
        .unwrap();
        assert_eq!(cli.amount, 12.5);
        assert_eq!(cli.input_currency, "€");
        assert_eq!(cli.output_currency.as_deref(), Some("CZK"));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_missing_required_flags_are_usage_errors() {
        for args in [
            vec!["curconv", "--input_currency", "EUR"],
            vec!["curconv", "--amount", "1"],
        ] {
            let err = Cli::try_parse_from(args).err().unwrap();
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        for amount in ["0", "-3", "abc", "NaN", "inf"] {
            let flag = format!("--amount={amount}");
            let err = Cli::try_parse_from(["curconv", flag.as_str(), "--input_currency", "EUR"])
                .err()
                .unwrap();
            assert_eq!(err.kind(), ErrorKind::ValueValidation);
            assert_eq!(err.exit_code(), 2);
        }
    }
}
