//! End-to-end coverage for the stored repositories over the SQLite store.
//!
//! Latency is disabled unless a test is specifically about the simulated
//! delays, in which case the tokio clock is paused.

mod support;

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use seller_console_core::{
    find_duplicate, ConversionOptions, ConversionService, LeadsRepository, NamespacedStorage,
    OpportunitiesRepository,
};
use seller_console_domain::constants::{LEAD_OVERRIDES_KEY, OPPORTUNITIES_KEY};
use seller_console_domain::utils::sort::sort_by_key;
use seller_console_domain::{
    ConsoleError, LatencyConfig, LeadStatus, LeadUpdate, Opportunity, OpportunityInput,
    OpportunitySortKey, SortDirection, Stage,
};
use seller_console_infra::{StaticLeadSeed, StoredLeadsRepository, StoredOpportunitiesRepository};
use support::{lead, TestDatabase};

fn leads_repository(storage: NamespacedStorage) -> StoredLeadsRepository {
    let seed = StaticLeadSeed::new(vec![
        lead("1", "Ann", "ann@acme.com", 10),
        lead("2", "Bob", "bob@acme.com", 80),
    ]);
    StoredLeadsRepository::new(Arc::new(seed), storage, LatencyConfig::none())
}

#[tokio::test]
async fn overrides_merge_onto_the_seed() {
    let db = TestDatabase::new();
    let repository = leads_repository(db.storage());

    let stored = repository
        .update_lead("1", LeadUpdate::status(LeadStatus::Qualified))
        .await
        .expect("update succeeds");
    assert_eq!(stored.status, Some(LeadStatus::Qualified));

    let leads = repository.fetch_leads().await.expect("fetch succeeds");
    let ann = leads.iter().find(|lead| lead.id == "1").expect("ann is present");
    assert_eq!(ann.score, 10);
    assert_eq!(ann.status, LeadStatus::Qualified);
    assert_eq!(ann.email, "ann@acme.com");
    assert_eq!(leads.iter().map(|lead| lead.id.as_str()).collect::<Vec<_>>(), ["1", "2"]);
}

#[tokio::test]
async fn successive_updates_accumulate_in_one_override() {
    let db = TestDatabase::new();
    let repository = leads_repository(db.storage());

    repository.update_lead("2", LeadUpdate::email("bob@globex.io")).await.unwrap();
    let merged =
        repository.update_lead("2", LeadUpdate::status(LeadStatus::Contacted)).await.unwrap();

    assert_eq!(merged.email.as_deref(), Some("bob@globex.io"));
    assert_eq!(merged.status, Some(LeadStatus::Contacted));
    assert_eq!(repository.overrides().len(), 1);
}

#[tokio::test]
async fn undecodable_override_entry_is_skipped_and_kept() {
    let db = TestDatabase::new();
    let storage = db.storage();
    storage.set(
        LEAD_OVERRIDES_KEY,
        &serde_json::json!({
            "1": { "status": "bogus" },
            "2": { "email": "bob@globex.io" }
        }),
    );
    let repository = leads_repository(storage.clone());

    let leads = repository.fetch_leads().await.unwrap();
    assert_eq!(leads[0].status, LeadStatus::New);
    assert_eq!(leads[1].email, "bob@globex.io");
    assert_eq!(repository.overrides().len(), 1);

    repository.update_lead("2", LeadUpdate::status(LeadStatus::Contacted)).await.unwrap();

    let raw: serde_json::Value = storage.get_opt(LEAD_OVERRIDES_KEY).unwrap();
    assert_eq!(raw["1"], serde_json::json!({ "status": "bogus" }));
    assert_eq!(raw["2"]["email"], "bob@globex.io");
    assert_eq!(raw["2"]["status"], "contacted");
}

#[tokio::test]
async fn overrides_survive_reopening_the_database() {
    let db = TestDatabase::new();
    leads_repository(db.storage())
        .update_lead("1", LeadUpdate::email("ann@new.example"))
        .await
        .unwrap();

    let reopened = seller_console_infra::SqliteKeyValueStore::open(db.path(), 1).unwrap();
    let storage = NamespacedStorage::with_default_namespace(Arc::new(reopened));
    let leads = leads_repository(storage).fetch_leads().await.unwrap();

    assert_eq!(leads[0].email, "ann@new.example");
}

#[tokio::test]
async fn clearing_overrides_restores_the_seed() {
    let db = TestDatabase::new();
    let repository = leads_repository(db.storage());

    repository.update_lead("1", LeadUpdate::status(LeadStatus::Unqualified)).await.unwrap();
    repository.update_lead("2", LeadUpdate::status(LeadStatus::Qualified)).await.unwrap();

    repository.clear_lead_override("1").await.unwrap();
    let leads = repository.fetch_leads().await.unwrap();
    assert_eq!(leads[0].status, LeadStatus::New);
    assert_eq!(leads[1].status, LeadStatus::Qualified);

    repository.clear_all_lead_overrides().await.unwrap();
    assert!(db.storage().get_opt::<serde_json::Value>(LEAD_OVERRIDES_KEY).is_none());
    assert!(repository.fetch_leads().await.unwrap().iter().all(|l| l.status == LeadStatus::New));
}

#[tokio::test(start_paused = true)]
async fn fetch_waits_for_the_configured_latency() {
    let db = TestDatabase::new();
    let seed = StaticLeadSeed::new(vec![lead("1", "Ann", "ann@acme.com", 10)]);
    let repository =
        StoredLeadsRepository::new(Arc::new(seed), db.storage(), LatencyConfig::default());

    let started = tokio::time::Instant::now();
    repository.fetch_leads().await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(800));
}

#[tokio::test]
async fn empty_collection_is_bootstrapped_once() {
    let db = TestDatabase::new();
    let repository = StoredOpportunitiesRepository::new(db.storage(), LatencyConfig::none());

    let items = repository.list_opportunities(None).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Acme - Website Revamp");
    assert_eq!(items[0].value, Some(12_000.0));
    assert!(items[0].id.starts_with("opp_"));

    let again = StoredOpportunitiesRepository::new(db.storage(), LatencyConfig::none());
    assert_eq!(again.list_opportunities(None).await.unwrap(), items);
}

#[tokio::test]
async fn create_fills_defaults_and_prepends() {
    let db = TestDatabase::new();
    let repository = StoredOpportunitiesRepository::new(db.storage(), LatencyConfig::none());

    let created = repository.create_opportunity(OpportunityInput::default()).await.unwrap();
    assert_eq!(created.name, "Untitled");
    assert_eq!(created.company.as_deref(), Some(""));
    assert_eq!(created.email.as_deref(), Some(""));
    assert_eq!(created.notes.as_deref(), Some(""));
    assert_eq!(created.value, Some(0.0));
    assert_eq!(created.stage, Stage::Prospecting);

    let items = repository.list_opportunities(None).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0], created);
}

#[tokio::test]
async fn update_merges_and_missing_ids_are_not_found() {
    let db = TestDatabase::new();
    let repository = StoredOpportunitiesRepository::new(db.storage(), LatencyConfig::none());
    let created = repository
        .create_opportunity(OpportunityInput::named("Renewal").with_value(500.0))
        .await
        .unwrap();

    let updated = repository
        .update_opportunity(&created.id, OpportunityInput::default().with_stage(Stage::Won))
        .await
        .unwrap();
    assert_eq!(updated.stage, Stage::Won);
    assert_eq!(updated.name, "Renewal");
    assert_eq!(updated.value, Some(500.0));
    assert_eq!(updated.created_at, created.created_at);

    let err = repository
        .update_opportunity("opp_missing", OpportunityInput::named("x"))
        .await
        .unwrap_err();
    assert_eq!(err, ConsoleError::NotFound("Opportunity not found".to_string()));
}

#[tokio::test]
async fn deleting_an_absent_id_leaves_the_collection_unchanged() {
    let db = TestDatabase::new();
    let repository = StoredOpportunitiesRepository::new(db.storage(), LatencyConfig::none());
    let before = repository.list_opportunities(None).await.unwrap();

    let err = repository.delete_opportunity("opp_missing").await.unwrap_err();
    assert!(matches!(err, ConsoleError::NotFound(_)));
    assert_eq!(repository.list_opportunities(None).await.unwrap(), before);

    repository.delete_opportunity(&before[0].id).await.unwrap();
    assert!(repository.list_opportunities(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn reset_empties_and_optionally_reseeds() {
    let db = TestDatabase::new();
    let repository = StoredOpportunitiesRepository::new(db.storage(), LatencyConfig::none());
    repository.create_opportunity(OpportunityInput::named("Extra")).await.unwrap();

    repository.reset_opportunities(false).await.unwrap();
    assert!(repository.list_opportunities(None).await.unwrap().is_empty());

    repository.reset_opportunities(true).await.unwrap();
    let items = repository.list_opportunities(None).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].company.as_deref(), Some("Acme Inc."));
}

#[tokio::test]
async fn stored_collection_sorts_by_value_then_created_at() {
    let db = TestDatabase::new();
    let storage = db.storage();
    let now = Utc::now();
    let record = |id: &str, value: Option<f64>, age_days: i64| Opportunity {
        id: id.to_string(),
        lead_id: None,
        name: id.to_string(),
        company: None,
        email: None,
        value,
        stage: Stage::Prospecting,
        created_at: now - ChronoDuration::days(age_days),
        notes: None,
    };
    storage.set(
        OPPORTUNITIES_KEY,
        &vec![record("a", Some(300.0), 3), record("b", None, 1), record("c", Some(50.0), 2)],
    );

    let repository = StoredOpportunitiesRepository::new(storage, LatencyConfig::none());
    let items = repository.list_opportunities(None).await.unwrap();

    let by_value =
        sort_by_key(&items, |item| OpportunitySortKey::Value.extract(item), SortDirection::Desc);
    assert_eq!(by_value.iter().map(|o| o.id.as_str()).collect::<Vec<_>>(), ["a", "c", "b"]);

    let by_age =
        sort_by_key(&items, |item| OpportunitySortKey::CreatedAt.extract(item), SortDirection::Asc);
    assert_eq!(by_age.iter().map(|o| o.id.as_str()).collect::<Vec<_>>(), ["a", "c", "b"]);
}

#[tokio::test]
async fn converting_the_same_lead_twice_is_rejected() {
    let db = TestDatabase::new();
    let repository: Arc<dyn OpportunitiesRepository> =
        Arc::new(StoredOpportunitiesRepository::new(db.storage(), LatencyConfig::none()));
    let service = ConversionService::new(Arc::clone(&repository));
    let ann = lead("1", "Ann", "ann@acme.com", 10);

    let created = service.convert_lead(&ann, ConversionOptions::default()).await.unwrap();
    assert_eq!(created.lead_id.as_deref(), Some("1"));
    assert_eq!(created.name, "Ann");
    assert_eq!(created.email.as_deref(), Some("ann@acme.com"));

    let err = service.convert_lead(&ann, ConversionOptions::default()).await.unwrap_err();
    assert_eq!(err, ConsoleError::DuplicateConversion { lead_id: "1".to_string() });

    let items = repository.list_opportunities(None).await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(find_duplicate(&ann, &items).is_some());
}
