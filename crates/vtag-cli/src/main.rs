mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vtag", about = "Product authenticity registry CLI for Stellar")]
struct Cli {
    /// Emit machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Create the local registrar profile
    Init,
    /// Show or update profile configuration
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
    /// Grant or revoke a manufacturer's registration privilege (admin only)
    Authorize {
        /// Manufacturer address (G...)
        manufacturer: String,
        /// Revoke instead of grant
        #[arg(long)]
        revoke: bool,
    },
    /// Register a product batch from plaintext serial numbers
    Register {
        /// Batch id (nonzero)
        batch_id: u64,
        /// Product name
        #[arg(long)]
        name: String,
        /// Brand
        #[arg(long)]
        brand: String,
        /// Comma-separated serial numbers
        #[arg(long, conflicts_with = "serials_file")]
        serials: Option<String>,
        /// File with one serial number per line
        #[arg(long)]
        serials_file: Option<PathBuf>,
    },
    /// Check a serial number's authenticity (consumes it if authentic)
    Verify {
        /// Batch id printed on the product
        batch_id: u64,
        /// Plaintext serial number, or a commitment hex with --commitment
        serial: String,
        /// Treat `serial` as a precomputed commitment (64 hex chars)
        #[arg(long)]
        commitment: bool,
    },
    /// Look up a registered batch
    Product { batch_id: u64 },
    /// Show profile, contract, and indexer status
    Status,
}

#[derive(Subcommand)]
enum ConfigCmd {
    /// Update one profile key
    Set { key: String, value: String },
    /// Print the profile (secrets masked)
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    output::set_json_mode(cli.json);
    match cli.command {
        Cmd::Init => commands::init::run()?,
        Cmd::Config { action } => match action {
            ConfigCmd::Set { key, value } => commands::config::set(&key, &value)?,
            ConfigCmd::Show => commands::config::show()?,
        },
        Cmd::Authorize {
            manufacturer,
            revoke,
        } => commands::authorize::run(&manufacturer, !revoke).await?,
        Cmd::Register {
            batch_id,
            name,
            brand,
            serials,
            serials_file,
        } => commands::register::run(batch_id, &name, &brand, serials, serials_file).await?,
        Cmd::Verify {
            batch_id,
            serial,
            commitment,
        } => commands::verify::run(batch_id, &serial, commitment).await?,
        Cmd::Product { batch_id } => commands::product::run(batch_id).await?,
        Cmd::Status => commands::status::run().await?,
    }
    Ok(())
}
