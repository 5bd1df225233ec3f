//! Case commands

use clap::{Args, Subcommand};
use crm_core::model::CaseStatus;
use crm_core::{RecordId, Result};

use super::{print_id, Manager};

#[derive(Debug, Args)]
pub struct CaseArgs {
    #[command(subcommand)]
    pub command: CaseCommand,
}

#[derive(Debug, Subcommand)]
pub enum CaseCommand {
    /// Open a case (status New, origin Web)
    Create {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        account_id: Option<String>,
    },
    /// Change a case's status
    SetStatus {
        #[arg(long)]
        id: String,
        #[arg(long)]
        status: CaseStatus,
    },
}

pub fn execute(args: CaseArgs, crm: &mut Manager) -> Result<()> {
    match args.command {
        CaseCommand::Create {
            subject,
            account_id,
        } => print_id(&crm.create_case(subject, account_id.map(RecordId::from))?),
        CaseCommand::SetStatus { id, status } => {
            crm.update_case_status(&RecordId::from(id), status)?
        }
    }
    Ok(())
}
