//! Account commands

use clap::{Args, Subcommand};
use crm_core::{RecordId, Result};

use super::{print_id, Manager};

#[derive(Debug, Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Create an account with exactly these fields
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        industry: Option<String>,
    },
    /// Create an account named after the current time
    New,
    /// Insert or update the account with this name
    Upsert {
        #[arg(long)]
        name: String,
    },
    /// Set an account's industry
    SetIndustry {
        #[arg(long)]
        id: String,
        #[arg(long)]
        industry: String,
    },
}

pub fn execute(args: AccountArgs, crm: &mut Manager) -> Result<()> {
    match args.command {
        AccountCommand::Create { name, industry } => print_id(&crm.create_account(name, industry)?),
        AccountCommand::New => print_id(&crm.insert_new_account()?),
        AccountCommand::Upsert { name } => print_id(&crm.upsert_account(&name)?),
        AccountCommand::SetIndustry { id, industry } => {
            crm.update_account_industry(&RecordId::from(id), industry)?
        }
    }
    Ok(())
}
