use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use extractors::{CurrencyConverter, ExpenseInputParser, RateConverter};
use shared_types::ParseOutcome;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

use spendbot_cli::{AppConfig, ConfigPreferences, HttpRateConverter};

#[derive(Parser, Debug)]
#[command(name = "spendbot", author, version, about = "Parse chat expense messages")]
struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(long)]
    log_file_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a free-text message
    Parse {
        text: String,

        /// Known category name; replaces the configured list when given
        #[arg(long = "category", value_name = "NAME")]
        categories: Vec<String>,
    },
    /// Parse an `/add` command and convert it into the user's currency
    Add {
        text: String,

        #[arg(long, default_value_t = 0)]
        user_id: i64,

        #[arg(long = "category", value_name = "NAME")]
        categories: Vec<String>,

        /// Skip currency conversion
        #[arg(long)]
        no_convert: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file_path.as_deref());

    let (config, config_path) =
        AppConfig::load(cli.config.as_deref()).context("Failed to load spendbot config")?;
    tracing::info!("Loaded config from {:?}", config_path);

    let recognized = match cli.command {
        Command::Parse { text, categories } => {
            let parser = build_parser(&config, categories);
            match parser.parse(&text) {
                ParseOutcome::Parsed(expense) => {
                    println!("{}", serde_json::to_string_pretty(&expense)?);
                    true
                }
                ParseOutcome::NotAnExpense => false,
            }
        }
        Command::Add {
            text,
            user_id,
            categories,
            no_convert,
        } => {
            let parser = build_parser(&config, categories);
            match parser.parse_add_command(&text) {
                ParseOutcome::Parsed(expense) => {
                    let converted = if no_convert {
                        None
                    } else {
                        let converter = build_converter(&config);
                        let currency = expense.currency.clone().unwrap_or_default();
                        Some(
                            converter
                                .convert_expense_currency(
                                    user_id,
                                    expense.amount,
                                    &currency,
                                    &expense.description,
                                )
                                .await,
                        )
                    };
                    let output = serde_json::json!({
                        "parsed": expense,
                        "converted": converted,
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                    true
                }
                ParseOutcome::NotAnExpense => false,
            }
        }
    };

    if !recognized {
        println!("not an expense");
        std::process::exit(1);
    }

    Ok(())
}

fn build_parser(config: &AppConfig, categories: Vec<String>) -> ExpenseInputParser {
    if categories.is_empty() {
        ExpenseInputParser::with_categories(config.category_names())
    } else {
        ExpenseInputParser::with_categories(categories)
    }
}

fn build_converter(config: &AppConfig) -> CurrencyConverter {
    let rates_config = config.rates();
    let rates: Option<Arc<dyn RateConverter>> = if rates_config.enabled {
        match HttpRateConverter::new(&rates_config) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::warn!("Rate service client unavailable: {}", e);
                None
            }
        }
    } else {
        None
    };

    CurrencyConverter::new(Arc::new(ConfigPreferences::from_config(config)), rates)
}

fn init_tracing(log_file_path: Option<&str>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("spendbot.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
