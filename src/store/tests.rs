use super::*;
use crate::cache::CacheKey;
use crate::model::{EntityKind, EventKind, PartyKind, Role, TargetKind};

fn new_worker(name: &str, phone: &str) -> NewUser {
    NewUser {
        role: Role::Worker,
        name: name.to_string(),
        phone: phone.to_string(),
        skills: "housekeeping".to_string(),
        ..Default::default()
    }
}

fn new_job(title: &str) -> NewJob {
    NewJob {
        company_id: None,
        title: title.to_string(),
        company_name: "Dar Hotel".to_string(),
        description: "Seasonal hotel work".to_string(),
        required_skills: "housekeeping".to_string(),
        location: "Sousse".to_string(),
        job_type: "micro-job".to_string(),
        start_date: String::new(),
        end_date: String::new(),
    }
}

fn event(actor_id: u64, target_id: u64, kind: EventKind) -> NewEvent {
    NewEvent {
        actor_id,
        actor_kind: PartyKind::Worker,
        target_kind: TargetKind::Job,
        target_id,
        kind,
        dwell_seconds: 0,
    }
}

fn rating(target_id: u64, stars: u8) -> NewRating {
    NewRating {
        rater_id: 99,
        rater_kind: PartyKind::Worker,
        target_id,
        target_kind: PartyKind::Company,
        stars,
        note: String::new(),
    }
}

#[test]
fn test_insert_user_assigns_increasing_ids() {
    let store = MemoryStore::new();
    let a = store.insert_user(new_worker("Amine", "20000001")).unwrap();
    let b = store.insert_user(new_worker("Sarra", "20000002")).unwrap();

    assert_eq!(a.id, 1);
    assert_eq!(b.id, 2);
    assert_eq!(store.list_users()[0].id, 2);
}

#[test]
fn test_insert_user_rejects_duplicate_phone() {
    let store = MemoryStore::new();
    store.insert_user(new_worker("Amine", "20000001")).unwrap();

    let err = store
        .insert_user(new_worker("Other", "20000001"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));
}

#[test]
fn test_insert_user_validates_fields() {
    let store = MemoryStore::new();

    let err = store.insert_user(new_worker("A", "20000001")).unwrap_err();
    assert!(matches!(err, StoreError::Validation { field: "name", .. }));

    let err = store.insert_user(new_worker("Amine", "123")).unwrap_err();
    assert!(matches!(err, StoreError::Validation { field: "phone", .. }));
}

#[test]
fn test_insert_job_validates_description() {
    let store = MemoryStore::new();
    let mut job = new_job("Cook");
    job.description = "fry".to_string();

    let err = store.insert_job(job).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation {
            field: "description",
            ..
        }
    ));
}

#[test]
fn test_append_rating_rejects_out_of_range_stars() {
    let store = MemoryStore::new();
    assert!(store.append_rating(rating(1, 0)).is_err());
    assert!(store.append_rating(rating(1, 6)).is_err());
    assert!(store.append_rating(rating(1, 5)).is_ok());
}

#[test]
fn test_append_event_rejects_long_dwell() {
    let store = MemoryStore::new();
    let mut e = event(1, 1, EventKind::View);
    e.dwell_seconds = 3_601;
    assert!(store.append_event(e).is_err());
}

#[tokio::test]
async fn test_recent_ratings_most_recent_first_and_limited() {
    let store = MemoryStore::new();
    for stars in [1, 2, 3, 4, 5] {
        store.append_rating(rating(7, stars)).unwrap();
    }
    store.append_rating(rating(8, 1)).unwrap();

    let recent = store
        .read_recent_ratings(7, PartyKind::Company, 3)
        .await
        .unwrap();
    let stars: Vec<u8> = recent.iter().map(|r| r.stars).collect();
    assert_eq!(stars, vec![5, 4, 3]);

    let none = store
        .read_recent_ratings(7, PartyKind::Worker, 10)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_event_counts_scoped_to_actor_and_target() {
    let store = MemoryStore::new();
    store.append_event(event(1, 10, EventKind::Apply)).unwrap();
    store.append_event(event(1, 10, EventKind::Apply)).unwrap();
    store.append_event(event(1, 10, EventKind::Skip)).unwrap();
    store.append_event(event(1, 11, EventKind::Save)).unwrap();
    store.append_event(event(2, 10, EventKind::Click)).unwrap();

    let counts = store
        .read_event_counts(1, TargetKind::Job, 10)
        .await
        .unwrap();
    assert_eq!(counts.apply, 2);
    assert_eq!(counts.skip, 1);
    assert_eq!(counts.save, 0);
    assert_eq!(counts.click, 0);
}

#[tokio::test]
async fn test_count_cancel_events_across_targets() {
    let store = MemoryStore::new();
    store.append_event(event(3, 10, EventKind::Cancel)).unwrap();
    store.append_event(event(3, 11, EventKind::Cancel)).unwrap();
    store.append_event(event(3, 11, EventKind::Apply)).unwrap();
    store.append_event(event(4, 11, EventKind::Cancel)).unwrap();

    assert_eq!(store.count_cancel_events(3).await.unwrap(), 2);
    assert_eq!(store.count_cancel_events(5).await.unwrap(), 0);
}

#[tokio::test]
async fn test_insert_vector_if_absent_keeps_first_value() {
    let store = MemoryStore::new();
    let key = CacheKey::for_text(EntityKind::Job, 1, "title: Cook");

    assert!(
        store
            .insert_vector_if_absent(key, vec![1.0, 0.0].into())
            .await
            .unwrap()
    );
    assert!(
        !store
            .insert_vector_if_absent(key, vec![0.0, 1.0].into())
            .await
            .unwrap()
    );

    let stored = store.read_cached_vector(&key).await.unwrap().unwrap();
    assert_eq!(&*stored, &[1.0, 0.0]);
    assert_eq!(store.vector_count(), 1);
}

#[tokio::test]
async fn test_recent_workers_filters_companies() {
    let store = MemoryStore::new();
    store.insert_user(new_worker("Amine", "20000001")).unwrap();
    store
        .insert_user(NewUser {
            role: Role::Company,
            name: "Dar Hotel".to_string(),
            phone: "70000001".to_string(),
            ..Default::default()
        })
        .unwrap();
    store.insert_user(new_worker("Sarra", "20000002")).unwrap();

    let workers = store.recent_workers(10).await.unwrap();
    let ids: Vec<u64> = workers.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

#[tokio::test]
async fn test_recent_jobs_newest_first() {
    let store = MemoryStore::new();
    for title in ["Cook", "Waiter", "Guide"] {
        store.insert_job(new_job(title)).unwrap();
    }

    let jobs = store.recent_jobs(2).await.unwrap();
    let titles: Vec<&str> = jobs.iter().map(|j| j.title.as_str()).collect();
    assert_eq!(titles, vec!["Guide", "Waiter"]);
}

#[tokio::test]
async fn test_unavailable_store_fails_reads() {
    let store = MemoryStore::new();
    store.set_unavailable(true);

    let err = store.get_user(1).await.unwrap_err();
    assert!(matches!(err, StoreError::Unavailable { .. }));

    store.set_unavailable(false);
    assert!(store.get_user(1).await.unwrap().is_none());
}

#[test]
fn test_from_snapshot_keeps_ids() {
    let snapshot: Snapshot = serde_json::from_str(
        r#"{
            "users": [{"id": 12, "name": "Amine", "phone": "20000001", "skills": "carpentry"}],
            "jobs": [{"id": 40, "title": "Cook", "company_name": "Dar Hotel",
                      "description": "Kitchen help", "required_skills": "cooking"}],
            "events": [{"actor_id": 12, "actor_kind": "worker", "target_kind": "job",
                        "target_id": 40, "kind": "view"}],
            "ratings": []
        }"#,
    )
    .unwrap();

    let store = MemoryStore::from_snapshot(snapshot).unwrap();
    assert_eq!(store.list_users()[0].id, 12);
    assert_eq!(store.list_jobs()[0].id, 40);

    let next = store.insert_job(new_job("Waiter")).unwrap();
    assert_eq!(next.id, 41);
}

#[test]
fn test_load_json_reports_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = MemoryStore::load_json(&path).unwrap_err();
    assert!(matches!(err, StoreError::Snapshot { .. }));
}

fn snapshot_with(users: &str, events: &str, ratings: &str) -> Snapshot {
    serde_json::from_str(&format!(
        r#"{{"users": [{users}], "jobs": [], "events": [{events}], "ratings": [{ratings}]}}"#
    ))
    .unwrap()
}

const AMINE: &str = r#"{"id": 1, "name": "Amine", "phone": "20000001"}"#;

#[test]
fn test_from_snapshot_rejects_out_of_range_stars() {
    for stars in [0, 6, 200] {
        let rating = format!(
            r#"{{"rater_id": 1, "rater_kind": "worker", "target_id": 1,
                 "target_kind": "company", "stars": {stars}}}"#
        );
        let err = MemoryStore::from_snapshot(snapshot_with(AMINE, "", &rating)).unwrap_err();
        assert!(
            matches!(err, StoreError::Validation { field: "stars", .. }),
            "stars {stars} accepted"
        );
    }
}

#[test]
fn test_from_snapshot_rejects_invalid_users() {
    let blank_name = r#"{"id": 1, "name": " ", "phone": "20000001"}"#;
    let err = MemoryStore::from_snapshot(snapshot_with(blank_name, "", "")).unwrap_err();
    assert!(matches!(err, StoreError::Validation { field: "name", .. }));

    let short_phone = r#"{"id": 1, "name": "Amine", "phone": "123"}"#;
    let err = MemoryStore::from_snapshot(snapshot_with(short_phone, "", "")).unwrap_err();
    assert!(matches!(err, StoreError::Validation { field: "phone", .. }));

    let zero_id = r#"{"id": 0, "name": "Amine", "phone": "20000001"}"#;
    let err = MemoryStore::from_snapshot(snapshot_with(zero_id, "", "")).unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));
}

#[test]
fn test_from_snapshot_rejects_invalid_events() {
    let zero_actor = r#"{"actor_id": 0, "actor_kind": "worker", "target_kind": "job",
                         "target_id": 4, "kind": "view"}"#;
    let err = MemoryStore::from_snapshot(snapshot_with(AMINE, zero_actor, "")).unwrap_err();
    assert!(matches!(err, StoreError::Validation { field: "actor_id", .. }));

    let long_dwell = r#"{"actor_id": 1, "actor_kind": "worker", "target_kind": "job",
                         "target_id": 4, "kind": "view", "dwell_seconds": 999999}"#;
    let err = MemoryStore::from_snapshot(snapshot_with(AMINE, long_dwell, "")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation {
            field: "dwell_seconds",
            ..
        }
    ));
}

#[test]
fn test_from_snapshot_rejects_incomplete_job() {
    let snapshot: Snapshot = serde_json::from_str(
        r#"{"jobs": [{"id": 3, "title": "Cook", "company_name": "Dar Hotel",
                      "description": "Cook", "required_skills": "cooking"}]}"#,
    )
    .unwrap();

    let err = MemoryStore::from_snapshot(snapshot).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation {
            field: "description",
            ..
        }
    ));
}
