//! mock-pay CLI
//!
//! Interactive payment screen flow, plus one-shot commands that drive the
//! same flow without a terminal UI.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;

use mock_pay::config::{load_config, Config};
use mock_pay::error::Result;
use mock_pay::format::{format_receipt, format_recipients};
use mock_pay::logging::{default_log_path, init_file, init_stderr};
use mock_pay::tui::run::run;
use mock_pay::tui::script::send;
use mock_pay::types::{OutputFormat, Yen};

#[derive(Parser)]
#[command(name = "mock-pay")]
#[command(about = "Mock mobile payment flow in the terminal")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/mock-pay/config.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive payment screens (default)
    Run {
        /// Opening balance in yen
        #[arg(long)]
        balance: Option<Yen>,

        /// Log file (default: <data dir>/mock-pay/mock-pay.log)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// List the people money can be sent to
    Recipients {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Send money without the interactive screens and print the receipt
    Send {
        /// Recipient id
        #[arg(long)]
        to: String,

        /// Amount in whole yen
        #[arg(long)]
        amount: String,

        /// Opening balance in yen
        #[arg(long)]
        balance: Option<Yen>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config;

    let result = match cli.command.unwrap_or(Commands::Run {
        balance: None,
        log_file: None,
    }) {
        Commands::Run { balance, log_file } => cmd_run(config_path, balance, log_file),
        Commands::Recipients { format } => cmd_recipients(config_path, format.into()),
        Commands::Send {
            to,
            amount,
            balance,
            format,
        } => cmd_send(config_path, &to, &amount, balance, format.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_run(config_path: Option<PathBuf>, balance: Option<Yen>, log_file: Option<PathBuf>) -> Result<()> {
    let log_path = log_file.unwrap_or_else(default_log_path);
    init_file(&log_path)?;

    let config = resolve_config(config_path, balance)?;
    run(&config)?;
    Ok(())
}

fn cmd_recipients(config_path: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    init_stderr()?;
    let config = resolve_config(config_path, None)?;
    print!("{}", format_recipients(&config.recipients, format)?);
    Ok(())
}

fn cmd_send(
    config_path: Option<PathBuf>,
    to: &str,
    amount: &str,
    balance: Option<Yen>,
    format: OutputFormat,
) -> Result<()> {
    init_stderr()?;
    let config = resolve_config(config_path, balance)?;

    let txn = send(&config, to, amount, Utc::now())?;
    let balance_after = config.initial_balance - txn.amount;
    info!(id = %txn.id, "receipt issued");

    print!("{}", format_receipt(&txn, balance_after, format)?);
    Ok(())
}

// ============================================================================
// CONFIG RESOLUTION
// ============================================================================

fn resolve_config(path: Option<PathBuf>, balance: Option<Yen>) -> Result<Config> {
    load_config(path.as_deref()).map(|c| c.with_balance(balance))
}
