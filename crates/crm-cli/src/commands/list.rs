//! Record listing

use clap::{Args, ValueEnum};
use crm_core::model::EntityKind;
use crm_core::Result;
use crm_engine::{apply_engine_query, EngineQuery, EngineQueryResult};

use super::Manager;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Kind {
    Accounts,
    Contacts,
    Opportunities,
    Leads,
    Cases,
}

impl From<Kind> for EntityKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Accounts => EntityKind::Account,
            Kind::Contacts => EntityKind::Contact,
            Kind::Opportunities => EntityKind::Opportunity,
            Kind::Leads => EntityKind::Lead,
            Kind::Cases => EntityKind::Case,
        }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    pub kind: Kind,

    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn execute(args: ListArgs, crm: &Manager) -> Result<()> {
    let query = EngineQuery::List {
        kind: args.kind.into(),
        filter: crm_core::Filter::All,
        limit: args.limit,
    };

    if let EngineQueryResult::Records(rows) = apply_engine_query(query, crm.store())? {
        for row in rows {
            println!("{}", row);
        }
    }
    Ok(())
}
