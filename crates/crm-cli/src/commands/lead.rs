//! Lead commands

use clap::{Args, Subcommand};
use crm_core::Result;

use super::{print_id, print_ids, Manager};

#[derive(Debug, Args)]
pub struct LeadArgs {
    #[command(subcommand)]
    pub command: LeadCommand,
}

#[derive(Debug, Subcommand)]
pub enum LeadCommand {
    /// Create a lead with the placeholder company
    Create {
        #[arg(long)]
        last_name: String,
    },
    /// Insert leads and delete them again; prints the ids they held
    Churn {
        #[arg(long = "last-name", required = true, num_args = 1..)]
        last_names: Vec<String>,
    },
}

pub fn execute(args: LeadArgs, crm: &mut Manager) -> Result<()> {
    match args.command {
        LeadCommand::Create { last_name } => print_id(&crm.create_lead(last_name)?),
        LeadCommand::Churn { last_names } => print_ids(&crm.insert_and_delete_leads(&last_names)?),
    }
    Ok(())
}
