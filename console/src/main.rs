use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use medicine_console::{load_settings, shell, FlowOutcome, Session, TerminalUi, UreqTransport};
use medicine_core::{DeleteAction, InventoryClient, UpdateAction};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "medicine", about = "Browse and edit the medicine inventory")]
struct Cli {
    /// Inventory service origin.
    #[arg(long, env = "MEDICINE_API_URL", global = true)]
    base_url: Option<String>,
    /// TOML config file (defaults to ./medicine.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the inventory and the average price.
    Show,
    /// Add a medicine.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        price: String,
    },
    /// Overwrite the price of a medicine.
    Update {
        #[arg(long)]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        price: String,
    },
    /// Remove a medicine.
    Delete {
        #[arg(long)]
        name: String,
    },
    /// Interactive session.
    Shell,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref(), cli.base_url)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build runtime")?;

    let client = InventoryClient::new(&settings.base_url);
    let mut session = Session::new(client, UreqTransport::new(), TerminalUi);

    runtime.block_on(async move {
        let outcome = match cli.command.unwrap_or(Command::Show) {
            Command::Show => {
                session.reload().await;
                FlowOutcome::Reloaded
            }
            Command::Create { name, price } => {
                session.open_create();
                session.set_name(&name)?;
                session.set_price(&price)?;
                session.submit().await
            }
            Command::Update { name, price } => {
                session.open_update_with(&UpdateAction { name, price });
                session.submit().await
            }
            Command::Delete { name } => {
                session.open_delete_with(&DeleteAction { name });
                session.confirm_delete().await
            }
            Command::Shell => {
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                shell::run(&mut session, stdin).await?;
                FlowOutcome::Reloaded
            }
        };
        Ok::<_, anyhow::Error>(if outcome.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    })
}
