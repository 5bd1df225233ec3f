//! CRM CLI
//!
//! Command-line interface over the record manager, backed by a SQLite file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crm_core::errors::ExError;
use crm_core::logging_facility::{self, Profile};
use crm_engine::RecordManager;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "crm")]
#[command(about = "CRM - Record management over a local store", long_about = None)]
struct Cli {
    /// SQLite database file (created on first use)
    #[arg(long, env = "CRM_DB", default_value = ".crm/store.db", global = true)]
    db: PathBuf,

    /// Log profile: development or production
    #[arg(long, env = "CRM_LOG", default_value = "development", global = true)]
    log: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Account operations
    Account(commands::account::AccountArgs),
    /// Contact operations
    Contact(commands::contact::ContactArgs),
    /// Opportunity operations
    Opportunity(commands::opportunity::OpportunityArgs),
    /// Lead operations
    Lead(commands::lead::LeadArgs),
    /// Case operations
    Case(commands::case::CaseArgs),
    /// Print every record of a kind as JSON lines
    List(commands::list::ListArgs),
}

fn run(cli: Cli) -> crm_core::Result<()> {
    let mut crm = RecordManager::open(&cli.db)?;
    tracing::debug!(db = %cli.db.display(), "opened store");

    match cli.command {
        Commands::Account(args) => commands::account::execute(args, &mut crm),
        Commands::Contact(args) => commands::contact::execute(args, &mut crm),
        Commands::Opportunity(args) => commands::opportunity::execute(args, &mut crm),
        Commands::Lead(args) => commands::lead::execute(args, &mut crm),
        Commands::Case(args) => commands::case::execute(args, &mut crm),
        Commands::List(args) => commands::list::execute(args, &crm),
    }
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging_facility::init(cli.log);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", ExError::from(e));
        std::process::exit(1);
    }
}
