//! Command inventory for record operations
//!
//! Every operation the manager exposes has a variant here, so a caller can
//! describe an operation as data and run it through `apply()`.

use crm_core_types::RecordId;

use crate::model::{CaseStatus, Contact, Opportunity, OpportunityStage};

/// One record operation with its inputs
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create an Account with the given name and industry
    AccountCreate {
        name: String,
        industry: Option<String>,
    },

    /// Create an Account named after the current instant
    AccountInsertNew,

    /// Set an existing Account's industry
    AccountUpdateIndustry {
        account_id: RecordId,
        industry: String,
    },

    /// Insert or update the Account with this name
    AccountUpsert { name: String },

    /// Create a Contact
    ContactCreate {
        last_name: String,
        account_id: Option<RecordId>,
    },

    /// Change a Contact's last name
    ContactUpdateLastName {
        contact_id: RecordId,
        last_name: String,
    },

    /// Link each Contact to an Account named after its last name
    ContactUpsertWithAccounts { contacts: Vec<Contact> },

    /// Create an Opportunity with default stage and close date
    OpportunityCreate {
        name: String,
        account_id: Option<RecordId>,
    },

    /// Ensure the named Account has one Opportunity per name
    OpportunityUpsertForAccount {
        account_name: String,
        names: Vec<String>,
    },

    /// Normalize stage, close date and amount, then save
    OpportunityUpsertList { opportunities: Vec<Opportunity> },

    /// Move an Opportunity to another stage
    OpportunityUpdateStage {
        opportunity_id: RecordId,
        stage: OpportunityStage,
    },

    /// Create a Lead with the placeholder company
    LeadCreate { last_name: String },

    /// Insert Leads and delete the same batch
    LeadInsertAndDelete { last_names: Vec<String> },

    /// Open a Case
    CaseCreate {
        subject: String,
        account_id: Option<RecordId>,
    },

    /// Change a Case's status
    CaseUpdateStatus {
        case_id: RecordId,
        status: CaseStatus,
    },
}

impl Command {
    /// Operation name used in log events
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::AccountCreate { .. } => "create_account",
            Command::AccountInsertNew => "insert_new_account",
            Command::AccountUpdateIndustry { .. } => "update_account_industry",
            Command::AccountUpsert { .. } => "upsert_account",
            Command::ContactCreate { .. } => "create_contact",
            Command::ContactUpdateLastName { .. } => "update_contact_last_name",
            Command::ContactUpsertWithAccounts { .. } => "upsert_accounts_with_contacts",
            Command::OpportunityCreate { .. } => "create_opportunity",
            Command::OpportunityUpsertForAccount { .. } => "upsert_opportunities",
            Command::OpportunityUpsertList { .. } => "upsert_opportunity_list",
            Command::OpportunityUpdateStage { .. } => "update_opportunity_stage",
            Command::LeadCreate { .. } => "create_lead",
            Command::LeadInsertAndDelete { .. } => "insert_and_delete_leads",
            Command::CaseCreate { .. } => "create_case",
            Command::CaseUpdateStatus { .. } => "update_case_status",
        }
    }
}

/// What a successful command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A single record was written
    Id(RecordId),
    /// A batch was written; ids follow the operation's documented order
    Ids(Vec<RecordId>),
    /// An existing record was updated in place
    Updated,
}

impl CommandOutcome {
    /// Ids carried by the outcome, if any
    pub fn ids(&self) -> Vec<RecordId> {
        match self {
            CommandOutcome::Id(id) => vec![id.clone()],
            CommandOutcome::Ids(ids) => ids.clone(),
            CommandOutcome::Updated => Vec::new(),
        }
    }
}
