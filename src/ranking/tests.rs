use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::constants::FALLBACK_EXPLANATION;
use crate::embedding::MockEmbedder;
use crate::explain::{Explainer, MockExplanationProvider};
use crate::model::{EventKind, Job, PartyKind, Role, TargetKind, User};
use crate::store::{MemoryStore, NewEvent, NewJob, NewRating, NewUser};

const EPS: f64 = 1e-9;

fn add_worker(store: &MemoryStore, name: &str, skills: &str, location: &str) -> User {
    store
        .insert_user(NewUser {
            role: Role::Worker,
            name: name.to_string(),
            phone: format!("2{:07}", store.list_users().len() + 1),
            skills: skills.to_string(),
            availability: "weekends".to_string(),
            location: location.to_string(),
            ..Default::default()
        })
        .unwrap()
}

fn add_job(store: &MemoryStore, title: &str, location: &str, job_type: &str) -> Job {
    store
        .insert_job(NewJob {
            company_id: None,
            title: title.to_string(),
            company_name: "Hotel Riadh".to_string(),
            description: format!("{title} for the summer season"),
            required_skills: title.to_lowercase(),
            location: location.to_string(),
            job_type: job_type.to_string(),
            start_date: String::new(),
            end_date: String::new(),
        })
        .unwrap()
}

fn ranker(
    store: &MemoryStore,
    embedder: Arc<MockEmbedder>,
    explainer: Explainer,
) -> FeedRanker<MemoryStore> {
    let policy = RankingPolicy {
        explore_rate: 0.0,
        ..RankingPolicy::default()
    };
    FeedRanker::new(store.clone(), embedder, explainer, policy)
        .with_rng(StdRng::seed_from_u64(1))
}

#[tokio::test]
async fn test_job_breakdown_for_nearby_short_shift() {
    let store = MemoryStore::new();
    let worker = add_worker(&store, "Sarra", "waitress", "Sousse");
    let job = add_job(&store, "Waitress", "Monastir", "micro-job");
    let ranker = ranker(&store, Arc::new(MockEmbedder::new()), Explainer::disabled());

    let page = ranker
        .rank_jobs_for_worker(&worker, vec![job], 20)
        .await
        .unwrap();

    assert_eq!(page.len(), 1);
    let item = &page.items[0];
    assert!((item.breakdown.location - 0.8).abs() < EPS);
    assert!((item.breakdown.availability - 0.9).abs() < EPS);
    assert!((item.breakdown.trust - 0.8).abs() < EPS);
    assert_eq!(item.breakdown.behavior, 0.5);
    assert!((item.breakdown.freshness.unwrap() - (0.6 + 1.0 / 51.0)).abs() < EPS);
    assert!(item.breakdown.similarity > 0.5);
    assert!(item.breakdown.is_in_range());
    assert_eq!(item.score, (item.final_score * 100.0).round() as u32);
    assert_eq!(item.explanation, FALLBACK_EXPLANATION);
    assert_eq!(page.skipped, 0);
    assert_eq!(page.degraded, 0);
}

#[tokio::test]
async fn test_page_is_truncated_after_mixing() {
    let store = MemoryStore::new();
    let worker = add_worker(&store, "Sarra", "cooking", "Tunis");
    let jobs: Vec<Job> = (0..12)
        .map(|i| add_job(&store, &format!("Cook {i}"), "Tunis", "full-time"))
        .collect();
    let ranker = ranker(&store, Arc::new(MockEmbedder::new()), Explainer::disabled());

    let page = ranker.rank_jobs_for_worker(&worker, jobs, 5).await.unwrap();
    assert_eq!(page.len(), 5);
    for pair in page.items.windows(2) {
        assert!(pair[0].final_score >= pair[1].final_score);
    }
}

#[tokio::test]
async fn test_malformed_candidates_are_skipped() {
    let store = MemoryStore::new();
    let worker = add_worker(&store, "Sarra", "cleaning", "Sousse");
    let good = add_job(&store, "Cleaner", "Sousse", "micro-job");
    let mut blank = add_job(&store, "Porter", "Sousse", "micro-job");
    blank.description = "   ".to_string();
    let ranker = ranker(&store, Arc::new(MockEmbedder::new()), Explainer::disabled());

    let page = ranker
        .rank_jobs_for_worker(&worker, vec![good.clone(), blank], 20)
        .await
        .unwrap();
    assert_eq!(page.skipped, 1);
    assert_eq!(page.len(), 1);
    assert_eq!(page.items[0].job.id, good.id);
}

#[tokio::test]
async fn test_candidate_embedding_failure_degrades_item() {
    let store = MemoryStore::new();
    let worker = add_worker(&store, "Sarra", "swimming", "Sousse");
    let a = add_job(&store, "Lifeguard", "Sousse", "micro-job");
    let b = add_job(&store, "Swim Coach", "Sousse", "micro-job");
    let embedder = Arc::new(MockEmbedder::new());
    embedder.fail_on("title: Lifeguard");
    let ranker = ranker(&store, embedder, Explainer::disabled());

    let page = ranker
        .rank_jobs_for_worker(&worker, vec![a.clone(), b], 20)
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.degraded, 1);
    let lifeguard = page.items.iter().find(|i| i.job.id == a.id).unwrap();
    assert_eq!(lifeguard.breakdown.similarity, 0.0);
    assert!(lifeguard.final_score > 0.0);
}

#[tokio::test]
async fn test_actor_embedding_failure_degrades_every_item() {
    let store = MemoryStore::new();
    let worker = add_worker(&store, "Sarra", "guiding", "Tunis");
    let jobs = vec![
        add_job(&store, "Guide", "Tunis", "micro-job"),
        add_job(&store, "Driver", "Ariana", "micro-job"),
    ];
    let embedder = Arc::new(MockEmbedder::new());
    embedder.fail_on("skills: guiding");
    let ranker = ranker(&store, embedder.clone(), Explainer::disabled());

    let page = ranker.rank_jobs_for_worker(&worker, jobs, 20).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.degraded, 2);
    assert!(page.items.iter().all(|i| i.breakdown.similarity == 0.0));
    assert_eq!(embedder.calls(), 1);
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let store = MemoryStore::new();
    let worker = add_worker(&store, "Sarra", "cleaning", "Sousse");
    let job = add_job(&store, "Cleaner", "Sousse", "micro-job");
    let ranker = ranker(&store, Arc::new(MockEmbedder::new()), Explainer::disabled());
    store.set_unavailable(true);

    let err = ranker
        .rank_jobs_for_worker(&worker, vec![job], 20)
        .await
        .unwrap_err();
    assert!(matches!(err, RankingError::Store(_)));
}

#[tokio::test]
async fn test_company_trust_and_worker_behavior_feed_job_scores() {
    let store = MemoryStore::new();
    let company = store
        .insert_user(NewUser {
            role: Role::Company,
            name: "Hotel Riadh".to_string(),
            phone: "71000000".to_string(),
            ..Default::default()
        })
        .unwrap();
    let worker = add_worker(&store, "Sarra", "reception", "Sousse");
    let mut job = store
        .insert_job(NewJob {
            company_id: Some(company.id),
            title: "Receptionist".to_string(),
            company_name: "Hotel Riadh".to_string(),
            description: "Front desk evenings".to_string(),
            required_skills: "reception".to_string(),
            location: "Sousse".to_string(),
            job_type: "micro-job".to_string(),
            start_date: String::new(),
            end_date: String::new(),
        })
        .unwrap();
    store
        .append_rating(NewRating {
            rater_id: worker.id,
            rater_kind: PartyKind::Worker,
            target_id: company.id,
            target_kind: PartyKind::Company,
            stars: 5,
            note: String::new(),
        })
        .unwrap();
    store
        .append_event(NewEvent {
            actor_id: worker.id,
            actor_kind: PartyKind::Worker,
            target_kind: TargetKind::Job,
            target_id: job.id,
            kind: EventKind::Save,
            dwell_seconds: 12,
        })
        .unwrap();
    let ranker = ranker(&store, Arc::new(MockEmbedder::new()), Explainer::disabled());

    let page = ranker
        .rank_jobs_for_worker(&worker, vec![job.clone()], 20)
        .await
        .unwrap();
    let item = &page.items[0];
    assert!((item.breakdown.trust - 1.0).abs() < EPS);
    assert!((item.breakdown.behavior - 1.0 / (1.0 + (-0.5f64).exp())).abs() < EPS);

    job.company_id = None;
    let page = ranker.rank_jobs_for_worker(&worker, vec![job], 20).await.unwrap();
    assert!((page.items[0].breakdown.trust - 0.8).abs() < EPS);
}

#[tokio::test]
async fn test_explanations_cover_first_items_only() {
    let store = MemoryStore::new();
    let worker = add_worker(&store, "Sarra", "housekeeping", "Djerba");
    let jobs: Vec<Job> = (0..10)
        .map(|i| add_job(&store, &format!("Housekeeper {i}"), "Djerba", "micro-job"))
        .collect();
    let provider = Arc::new(MockExplanationProvider::new());
    let explainer = Explainer::new(provider.clone()).with_limit(8);
    let ranker = ranker(&store, Arc::new(MockEmbedder::new()), explainer);

    let page = ranker.rank_jobs_for_worker(&worker, jobs, 20).await.unwrap();
    assert_eq!(page.len(), 10);
    assert_eq!(provider.calls(), 8);
    for item in &page.items[..8] {
        assert_eq!(item.explanation, format!("{} fits your skills", item.job.title));
    }
    assert!(page.items[8..].iter().all(|i| i.explanation == FALLBACK_EXPLANATION));
}

#[tokio::test]
async fn test_seeded_rankers_agree() {
    let store = MemoryStore::new();
    let worker = add_worker(&store, "Sarra", "bartending", "Hammamet");
    let jobs: Vec<Job> = (0..15)
        .map(|i| add_job(&store, &format!("Bartender {i}"), "Hammamet", "micro-job"))
        .collect();
    let policy = RankingPolicy {
        explore_rate: 0.5,
        ..RankingPolicy::default()
    };
    let build = || {
        FeedRanker::new(
            store.clone(),
            Arc::new(MockEmbedder::new()),
            Explainer::disabled(),
            policy.clone(),
        )
        .with_rng(StdRng::seed_from_u64(99))
    };

    let a = build().rank_jobs_for_worker(&worker, jobs.clone(), 15).await.unwrap();
    let b = build().rank_jobs_for_worker(&worker, jobs, 15).await.unwrap();
    let ids = |p: &RankedPage<JobFeedItem>| p.items.iter().map(|i| i.job.id).collect::<Vec<_>>();
    assert_eq!(ids(&a), ids(&b));
}

#[tokio::test]
async fn test_workers_for_job_sorted_without_freshness() {
    let store = MemoryStore::new();
    let near = add_worker(&store, "Amine", "diving instructor", "Monastir");
    let far = add_worker(&store, "Nour", "diving instructor", "Tozeur");
    let company = store
        .insert_user(NewUser {
            role: Role::Company,
            name: "Blue Dive".to_string(),
            phone: "73000000".to_string(),
            skills: "diving".to_string(),
            ..Default::default()
        })
        .unwrap();
    let job = add_job(&store, "Diving Instructor", "Sousse", "micro-job");
    let ranker = ranker(&store, Arc::new(MockEmbedder::new()), Explainer::disabled());

    let page = ranker
        .rank_workers_for_job(&job, vec![far.clone(), near.clone(), company], 20)
        .await
        .unwrap();

    assert_eq!(page.skipped, 1);
    assert_eq!(page.len(), 2);
    assert_eq!(page.items[0].worker.id, near.id);
    assert_eq!(page.items[1].worker.id, far.id);
    assert!(page.items[0].final_score > page.items[1].final_score);
    assert!(page.items.iter().all(|m| m.breakdown.freshness.is_none()));
    assert!((page.items[0].breakdown.location - 0.8).abs() < EPS);
}

#[tokio::test]
async fn test_workers_for_job_use_worker_trust_and_history() {
    let store = MemoryStore::new();
    let steady = add_worker(&store, "Amine", "cleaning", "Sousse");
    let flaky = add_worker(&store, "Nour", "cleaning", "Sousse");
    let job = add_job(&store, "Cleaner", "Sousse", "micro-job");
    for _ in 0..3 {
        store
            .append_event(NewEvent {
                actor_id: flaky.id,
                actor_kind: PartyKind::Worker,
                target_kind: TargetKind::Job,
                target_id: job.id,
                kind: EventKind::Cancel,
                dwell_seconds: 0,
            })
            .unwrap();
    }
    let ranker = ranker(&store, Arc::new(MockEmbedder::new()), Explainer::disabled());

    let page = ranker
        .rank_workers_for_job(&job, vec![flaky.clone(), steady.clone()], 20)
        .await
        .unwrap();
    assert_eq!(page.items[0].worker.id, steady.id);
    let flaky_match = &page.items[1];
    assert!((flaky_match.breakdown.trust - (0.8 - 0.15)).abs() < EPS);
    assert!(flaky_match.breakdown.behavior < 0.5);
}
