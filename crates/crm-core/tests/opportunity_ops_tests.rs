#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{all_accounts, all_opportunities, clock, date, names, new_store};
use crm_core::errors::CrmError;
use crm_core::model::{Account, Amount, EntityKind, Opportunity, OpportunityStage};
use crm_core::ops::account_ops::create_account;
use crm_core::ops::opportunity_ops::{
    create_opportunity, update_opportunity_stage, upsert_opportunities, upsert_opportunity_list,
};
use crm_core::{Filter, Query, RecordId, RecordStore};

#[test]
fn test_create_opportunity_defaults() {
    let mut store = new_store();

    let id = create_opportunity(&mut store, &clock(), "Deal".to_string(), None).unwrap();

    let opp: Opportunity = store.get(&id).unwrap();
    assert_eq!(opp.stage, OpportunityStage::Prospecting);
    assert_eq!(opp.close_date, date(2024, 2, 29));
    assert_eq!(opp.amount, None);
}

#[test]
fn test_upsert_opportunities_dedups_and_reuses() {
    let mut store = new_store();
    let clock = clock();

    let first = upsert_opportunities(&mut store, &clock, "Acme", &names(&["A", "B", "A"])).unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(store.len(EntityKind::Opportunity), 2);

    let accounts = all_accounts(&store);
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name, "Acme");
    assert!(all_opportunities(&store)
        .iter()
        .all(|o| o.account_id == accounts[0].id));

    let second = upsert_opportunities(&mut store, &clock, "Acme", &names(&["A", "C"])).unwrap();
    assert_eq!(second[0], first[0]);
    assert_eq!(store.len(EntityKind::Opportunity), 3);
    assert_eq!(store.len(EntityKind::Account), 1);

    let a_count = store
        .count::<Opportunity>(&Filter::eq("name", "A"))
        .unwrap();
    assert_eq!(a_count, 1);
}

#[test]
fn test_upsert_opportunities_new_defaults() {
    let mut store = new_store();

    let ids = upsert_opportunities(&mut store, &clock(), "Acme", &names(&["A"])).unwrap();

    let opp: Opportunity = store.get(&ids[0]).unwrap();
    assert_eq!(opp.stage, OpportunityStage::Prospecting);
    assert_eq!(opp.close_date, date(2024, 2, 29));
}

#[test]
fn test_upsert_opportunities_leaves_existing_fields_alone() {
    let mut store = new_store();
    let ids = upsert_opportunities(&mut store, &clock(), "Acme", &names(&["A"])).unwrap();
    update_opportunity_stage(&mut store, &ids[0], OpportunityStage::NeedsAnalysis).unwrap();

    upsert_opportunities(&mut store, &clock(), "Acme", &names(&["A"])).unwrap();

    let opp: Opportunity = store.get(&ids[0]).unwrap();
    assert_eq!(opp.stage, OpportunityStage::NeedsAnalysis);
}

#[test]
fn test_upsert_opportunities_scoped_to_account() {
    let mut store = new_store();
    let clock = clock();

    upsert_opportunities(&mut store, &clock, "Acme", &names(&["A"])).unwrap();
    upsert_opportunities(&mut store, &clock, "Globex", &names(&["A"])).unwrap();

    assert_eq!(store.len(EntityKind::Account), 2);
    assert_eq!(store.len(EntityKind::Opportunity), 2);
}

#[test]
fn test_upsert_opportunities_existing_account_is_used() {
    let mut store = new_store();
    let account_id =
        create_account(&mut store, "Acme".to_string(), Some("Energy".to_string())).unwrap();

    let ids = upsert_opportunities(&mut store, &clock(), "Acme", &names(&["A"])).unwrap();

    let opp: Opportunity = store.get(&ids[0]).unwrap();
    assert_eq!(opp.account_id, Some(account_id.clone()));
    let account: Account = store.get(&account_id).unwrap();
    assert_eq!(account.industry.as_deref(), Some("Energy"));
}

#[test]
fn test_upsert_opportunity_list_overwrites_every_record() {
    let mut store = new_store();
    let clock = clock();
    let existing_id = create_opportunity(&mut store, &clock, "Old".to_string(), None).unwrap();
    update_opportunity_stage(&mut store, &existing_id, OpportunityStage::ClosedWon).unwrap();
    let mut existing: Opportunity = store.get(&existing_id).unwrap();
    existing.amount = Some(Amount::from_units(7));

    let fresh = Opportunity::new("Fresh", OpportunityStage::Prospecting, date(2030, 1, 1));

    let ids = upsert_opportunity_list(&mut store, &clock, vec![existing, fresh]).unwrap();

    assert_eq!(ids.len(), 2);
    assert_eq!(ids[0], existing_id);
    assert_eq!(store.len(EntityKind::Opportunity), 2);

    for id in &ids {
        let opp: Opportunity = store.get(id).unwrap();
        assert_eq!(opp.stage, OpportunityStage::Qualification);
        assert_eq!(opp.close_date, date(2024, 4, 30));
        assert_eq!(opp.amount, Some(Amount::from_units(50_000)));
    }
}

#[test]
fn test_update_opportunity_stage_unknown_id() {
    let mut store = new_store();

    let result = update_opportunity_stage(
        &mut store,
        &RecordId::from("006nope"),
        OpportunityStage::ClosedLost,
    );

    assert!(matches!(result, Err(CrmError::NotFound { .. })));
}

#[test]
fn test_query_by_stage() {
    let mut store = new_store();
    let clock = clock();
    let id = create_opportunity(&mut store, &clock, "A".to_string(), None).unwrap();
    create_opportunity(&mut store, &clock, "B".to_string(), None).unwrap();
    update_opportunity_stage(&mut store, &id, OpportunityStage::ValueProposition).unwrap();

    let found: Vec<Opportunity> = store
        .query(&Query::new(Filter::eq("stage", "Value Proposition")))
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "A");
}
