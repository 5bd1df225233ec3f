//! Contact commands

use clap::{Args, Subcommand};
use crm_core::model::Contact;
use crm_core::{RecordId, Result};

use super::{print_id, print_ids, Manager};

#[derive(Debug, Args)]
pub struct ContactArgs {
    #[command(subcommand)]
    pub command: ContactCommand,
}

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Create a contact
    Create {
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        account_id: Option<String>,
    },
    /// Change a contact's last name
    Rename {
        #[arg(long)]
        id: String,
        #[arg(long)]
        last_name: String,
    },
    /// Create contacts, each linked to an account named after its last name
    Link {
        #[arg(long = "last-name", required = true, num_args = 1..)]
        last_names: Vec<String>,
    },
}

pub fn execute(args: ContactArgs, crm: &mut Manager) -> Result<()> {
    match args.command {
        ContactCommand::Create {
            last_name,
            account_id,
        } => print_id(&crm.create_contact(last_name, account_id.map(RecordId::from))?),
        ContactCommand::Rename { id, last_name } => {
            crm.update_contact_last_name(&RecordId::from(id), last_name)?
        }
        ContactCommand::Link { last_names } => {
            let contacts = last_names.into_iter().map(Contact::new).collect();
            print_ids(&crm.upsert_accounts_with_contacts(contacts)?)
        }
    }
    Ok(())
}
