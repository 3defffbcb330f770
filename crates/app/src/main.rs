use std::{io, path::PathBuf};

use clap::{Parser, Subcommand};
use ledger::{Money, SettlementRequest, UserId};
use serde::Serialize;
use uuid::Uuid;

use crate::{error::Result, settings::Settings};

mod commands;
mod error;
mod settings;

#[derive(Debug, Parser)]
#[command(name = "splibiz", about = "Balances and settlements for a SpliBiz group")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override the log level (e.g. debug).
    #[arg(long, global = true)]
    level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Net balance of every member.
    Balances {
        #[arg(long)]
        snapshot: PathBuf,
    },
    /// Balances of one member against each other member.
    Pairwise {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long)]
        viewer: String,
    },
    /// Spending totals and rows that do not add up.
    Summary {
        #[arg(long)]
        snapshot: PathBuf,
    },
    /// Shares of a new expense.
    Split {
        #[arg(long)]
        amount: Money,
        #[arg(long, value_delimiter = ',', required = true)]
        participants: Vec<String>,
    },
    /// Rows recording `payer` paying `recipient` back.
    Settle {
        #[arg(long)]
        group: Uuid,
        #[arg(long)]
        payer: String,
        #[arg(long)]
        recipient: String,
        #[arg(long)]
        amount: Money,
        /// Defaults to the payer.
        #[arg(long)]
        created_by: Option<String>,
        /// Used to put member names in the title.
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Rows clearing every open balance of `viewer`.
    SettleUp {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long)]
        group: Uuid,
        #[arg(long)]
        viewer: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::new(cli.config.as_deref())?;
    if let Some(level) = cli.level {
        settings.level = level;
    }

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(format!(
            "splibiz={level},ledger={level}",
            level = settings.level
        ))
        .init();

    let epsilon = settings.epsilon()?;
    let policy = settings.split_policy()?;
    tracing::debug!(?settings, "settings loaded");

    match cli.command {
        Command::Balances { snapshot } => {
            let snapshot = commands::load_snapshot(&snapshot)?;
            print_json(&commands::balances(&snapshot))
        }
        Command::Pairwise { snapshot, viewer } => {
            let snapshot = commands::load_snapshot(&snapshot)?;
            print_json(&commands::pairwise(&snapshot, &UserId::from(viewer), epsilon))
        }
        Command::Summary { snapshot } => {
            let snapshot = commands::load_snapshot(&snapshot)?;
            print_json(&commands::summary(&snapshot))
        }
        Command::Split {
            amount,
            participants,
        } => {
            let participants: Vec<UserId> = participants
                .into_iter()
                .map(|id| UserId::from(id.trim()))
                .filter(|id| !id.as_str().is_empty())
                .collect();
            print_json(&commands::split_amount(amount, &participants, policy))
        }
        Command::Settle {
            group,
            payer,
            recipient,
            amount,
            created_by,
            snapshot,
        } => {
            let snapshot = snapshot
                .as_deref()
                .map(commands::load_snapshot)
                .transpose()?;
            let created_by = created_by.unwrap_or_else(|| payer.clone());
            let request = SettlementRequest::new(group, payer, recipient, amount, created_by);
            print_json(&commands::settle(request, snapshot.as_ref())?)
        }
        Command::SettleUp {
            snapshot,
            group,
            viewer,
        } => {
            let snapshot = commands::load_snapshot(&snapshot)?;
            let writes = commands::settle_up(&snapshot, &UserId::from(viewer), group, epsilon)?;
            tracing::info!(settlements = writes.len(), "settle-up rows built");
            print_json(&writes)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), value)?;
    println!();
    Ok(())
}
