//! Query façade tests — the three read operations end to end.

use chrono::{TimeZone, Utc};
use rewards_core::clock::FixedClock;
use rewards_core::error::RewardsError;
use rewards_core::service::RewardsService;
use rewards_core::store::{DataStore, MemorySource};

const DATASET: &str = r#"{
    "customers": [
        { "id": "u1", "name": "Aarav" },
        { "id": "u2", "name": "Rian" },
        { "id": 3, "name": "Maya" }
    ],
    "transactions": [
        { "id": "t1", "userId": "u1", "amount": 120, "date": "2026-07-10T00:00:00Z" },
        { "id": "t2", "userId": "u1", "amount": 45, "date": "2026-06-15T00:00:00Z" },
        { "id": "t3", "userId": "u2", "amount": 51, "date": "2026-07-05T00:00:00Z" },
        { "id": "t4", "userId": "u1", "amount": 150, "date": "2026-03-01T00:00:00Z" },
        { "id": "t5", "userId": "u9", "amount": 75, "date": "2026-07-22T00:00:00Z" },
        { "id": "t6", "userId": "u2", "amount": 60, "date": "not-a-date" }
    ]
}"#;

fn service(json: &str) -> RewardsService {
    RewardsService::with_clock(
        DataStore::new(MemorySource::new(json)),
        Box::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap(),
        )),
    )
}

#[test]
fn customer_points_defaults_to_three_months() {
    let summaries = service(DATASET).customer_points(None).unwrap();

    let u1 = summaries.iter().find(|s| s.customer_id == "u1").unwrap();
    assert_eq!(u1.total_points, 90, "t4 is outside the default window");
    assert_eq!(u1.total_amount_spent, 165.0);

    let u2 = summaries.iter().find(|s| s.customer_id == "u2").unwrap();
    assert_eq!(u2.total_points, 1, "the bad-date transaction drops out");
}

#[test]
fn customer_points_honors_a_wider_window() {
    let summaries = service(DATASET).customer_points(Some(6)).unwrap();

    let u1 = summaries.iter().find(|s| s.customer_id == "u1").unwrap();
    assert_eq!(u1.total_points, 240, "t4 (150 -> 150 pts) joins at 6 months");
    assert_eq!(u1.total_amount_spent, 315.0);
}

#[test]
fn empty_dataset_yields_an_empty_summary_list() {
    let svc = service(r#"{"customers":[],"transactions":[]}"#);
    assert!(svc.customer_points(None).unwrap().is_empty());
}

#[test]
fn unknown_customer_is_not_found() {
    let err = service(DATASET)
        .customer_transactions("missing-id", None)
        .unwrap_err();
    assert!(
        matches!(&err, RewardsError::CustomerNotFound { customer_id } if customer_id == "missing-id"),
        "got {err}"
    );
}

#[test]
fn detail_windows_the_transactions_but_not_the_existence_check() {
    // u1 exists regardless of the window; only t1 and t2 are recent.
    let detail = service(DATASET).customer_transactions("u1", None).unwrap();

    assert_eq!(detail.customer_id, "u1");
    assert_eq!(detail.customer_name, "Aarav");
    assert_eq!(detail.transactions.len(), 2);

    let ids: Vec<_> = detail
        .transactions
        .iter()
        .map(|t| t.transaction_id.as_str())
        .collect();
    assert_eq!(ids, ["t1", "t2"], "ledger order, windowed set only");
    assert_eq!(detail.transactions[0].points, 90);
    assert_eq!(detail.transactions[1].points, 0);
}

#[test]
fn numeric_ids_resolve_through_canonicalization() {
    let detail = service(DATASET).customer_transactions("3", None).unwrap();
    assert_eq!(detail.customer_id, "3");
    assert_eq!(detail.customer_name, "Maya");
    assert!(detail.transactions.is_empty());
}

#[test]
fn all_transactions_ignores_the_window() {
    let enriched = service(DATASET).all_transactions().unwrap();
    assert_eq!(
        enriched.len(),
        6,
        "old and bad-date transactions still appear unwindowed"
    );

    let t4 = enriched.iter().find(|t| t.id == "t4").unwrap();
    assert_eq!(t4.points, 150);
    assert_eq!(t4.customer.as_ref().unwrap().name, "Aarav");

    let orphan = enriched.iter().find(|t| t.id == "t5").unwrap();
    assert!(orphan.customer.is_none());
}

#[test]
fn load_failures_propagate_to_every_operation() {
    let svc = service("{nope");
    assert!(matches!(
        svc.customer_points(None).unwrap_err(),
        RewardsError::MalformedData(_)
    ));
    assert!(matches!(
        svc.customer_transactions("u1", None).unwrap_err(),
        RewardsError::MalformedData(_)
    ));
    assert!(matches!(
        svc.all_transactions().unwrap_err(),
        RewardsError::MalformedData(_)
    ));
}

#[test]
fn edits_to_the_backing_store_show_up_on_the_next_request() {
    let source = MemorySource::new(r#"{"customers":[],"transactions":[]}"#);
    let svc = RewardsService::with_clock(
        DataStore::new(source.clone()),
        Box::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap(),
        )),
    );

    assert!(svc.customer_points(None).unwrap().is_empty());

    source.update(r#"{"customers":[{"id":"u1","name":"Aarav"}],"transactions":[]}"#);
    assert_eq!(svc.customer_points(None).unwrap().len(), 1);
}
