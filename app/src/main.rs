#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;
mod store;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use command::{
    BatchInput, BatchStrategy, ClassifyInput, ClassifyStrategy, CommandStrategy, InfoStrategy,
    InitStrategy, ParseInput, ParseStrategy, UnitsStrategy, VersionStrategy,
};
use pedidos_core::OrderStatus;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "pedidos")]
#[command(about = "Grocery order parser for chat messages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an order message into items
    Parse {
        /// Message text
        #[arg(short = 'm', long)]
        message: String,
    },
    /// Show how a message would be routed
    Classify {
        /// Message text
        #[arg(short = 'm', long)]
        message: String,

        /// Sender identity
        #[arg(short = 's', long, default_value = "cli")]
        sender: String,

        /// Id of the sender's latest order
        #[arg(short = 'o', long)]
        active_order: Option<String>,

        /// Status of that order
        #[arg(long, default_value = "pending")]
        status: OrderStatus,
    },
    /// Process a JSON Lines file of inbound messages
    Batch {
        /// Input file
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Merge unknown units into the vocabulary
        #[arg(long)]
        learn: bool,
    },
    /// List known units
    Units,
    /// Initialize configuration
    Init,
    /// Show configuration information
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { message } => {
            ParseStrategy.execute(ParseInput { message }).await?;
        }
        Commands::Classify {
            message,
            sender,
            active_order,
            status,
        } => {
            ClassifyStrategy
                .execute(ClassifyInput {
                    message,
                    sender,
                    active_order,
                    status,
                })
                .await?;
        }
        Commands::Batch { input, learn } => {
            BatchStrategy.execute(BatchInput { input, learn }).await?;
        }
        Commands::Units => UnitsStrategy.execute(()).await?,
        Commands::Init => InitStrategy.execute(()).await?,
        Commands::Info => InfoStrategy.execute(()).await?,
        Commands::Version => VersionStrategy.execute(()).await?,
    }

    Ok(())
}
