//! Opportunity commands

use clap::{Args, Subcommand};
use crm_core::model::{Opportunity, OpportunityStage};
use crm_core::{Clock, RecordId, Result};

use super::{print_id, print_ids, Manager};

#[derive(Debug, Args)]
pub struct OpportunityArgs {
    #[command(subcommand)]
    pub command: OpportunityCommand,
}

#[derive(Debug, Subcommand)]
pub enum OpportunityCommand {
    /// Create an opportunity in the Prospecting stage
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        account_id: Option<String>,
    },
    /// Ensure an account has one opportunity per name
    Upsert {
        /// Account name; created if missing
        #[arg(long)]
        account: String,
        #[arg(long = "name", required = true, num_args = 1..)]
        names: Vec<String>,
    },
    /// Force stage, close date and amount on existing and new opportunities
    Normalize {
        /// Existing opportunity ids
        #[arg(long = "id", num_args = 1..)]
        ids: Vec<String>,
        /// Names of opportunities to create
        #[arg(long = "new", num_args = 1..)]
        new: Vec<String>,
        /// Account for the new opportunities
        #[arg(long)]
        account_id: Option<String>,
    },
    /// Move an opportunity to another stage
    SetStage {
        #[arg(long)]
        id: String,
        #[arg(long)]
        stage: OpportunityStage,
    },
}

pub fn execute(args: OpportunityArgs, crm: &mut Manager) -> Result<()> {
    match args.command {
        OpportunityCommand::Create { name, account_id } => {
            print_id(&crm.create_opportunity(name, account_id.map(RecordId::from))?)
        }
        OpportunityCommand::Upsert { account, names } => {
            print_ids(&crm.upsert_opportunities(&account, &names)?)
        }
        OpportunityCommand::Normalize {
            ids,
            new,
            account_id,
        } => {
            let mut opportunities = ids
                .into_iter()
                .map(|id| crm.get::<Opportunity>(&RecordId::from(id)))
                .collect::<Result<Vec<_>>>()?;

            let today = crm.clock().today();
            let account_id = account_id.map(RecordId::from);
            opportunities.extend(new.into_iter().map(|name| {
                let mut opp = Opportunity::new(name, OpportunityStage::Prospecting, today);
                opp.account_id = account_id.clone();
                opp
            }));

            print_ids(&crm.upsert_opportunity_list(opportunities)?)
        }
        OpportunityCommand::SetStage { id, stage } => {
            crm.update_opportunity_stage(&RecordId::from(id), stage)?
        }
    }
    Ok(())
}
