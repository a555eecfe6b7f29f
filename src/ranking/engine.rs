use std::sync::Arc;

use futures_util::stream::{self, StreamExt, TryStreamExt};
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

use super::error::RankingResult;
use super::types::{JobFeedItem, RankedPage, RankingPolicy, WorkerMatch};
use crate::cache::{EmbeddingCache, Vector};
use crate::embedding::EmbeddingProvider;
use crate::exploration::ExplorationMixer;
use crate::explain::{ExplanationContext, Explainer};
use crate::model::{EntityKind, Job, PartyKind, TargetKind, User};
use crate::scoring::{ScoredCandidate, SignalBreakdown, WeightProfile, sort_by_score_desc};
use crate::signals::{
    availability_fit, freshness, load_behavior_score, load_trust_score, location_fit, similarity,
    trust_score,
};
use crate::store::{SignalStore, VectorStore};

/// Ranks jobs for workers and workers for jobs.
pub struct FeedRanker<S: VectorStore + SignalStore> {
    cache: EmbeddingCache<S>,
    explainer: Explainer,
    mixer: ExplorationMixer,
    policy: RankingPolicy,
    rng: Mutex<StdRng>,
}

impl<S: VectorStore + SignalStore> std::fmt::Debug for FeedRanker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedRanker")
            .field("cache", &self.cache)
            .field("explainer", &self.explainer)
            .field("policy", &self.policy)
            .finish()
    }
}

impl<S: VectorStore + SignalStore> FeedRanker<S> {
    pub fn new(
        store: S,
        embedder: Arc<dyn EmbeddingProvider>,
        explainer: Explainer,
        policy: RankingPolicy,
    ) -> Self {
        let cache = EmbeddingCache::with_capacity(
            store,
            embedder,
            policy.provider_timeout,
            policy.l1_capacity,
        );
        Self {
            cache,
            explainer,
            mixer: ExplorationMixer::new(policy.explore_rate),
            policy,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replaces the exploration RNG, e.g. with a seeded one.
    pub fn with_rng(self, rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            ..self
        }
    }

    pub fn store(&self) -> &S {
        self.cache.store()
    }

    pub fn cache(&self) -> &EmbeddingCache<S> {
        &self.cache
    }

    pub fn policy(&self) -> &RankingPolicy {
        &self.policy
    }

    /// Ranks `jobs` for `worker`: score, mix, cut to `page_size`, explain.
    #[instrument(skip(self, worker, jobs), fields(worker_id = worker.id, pool = jobs.len()))]
    pub async fn rank_jobs_for_worker(
        &self,
        worker: &User,
        jobs: Vec<Job>,
        page_size: usize,
    ) -> RankingResult<RankedPage<JobFeedItem>> {
        let (jobs, skipped) = drop_malformed(jobs, |job| job.missing_text(), |job| job.id);
        let actor = self
            .actor_vector(EntityKind::Worker, worker.id, &worker.embedding_text())
            .await;

        let scored: Vec<ScoredCandidate<Job>> = stream::iter(jobs)
            .map(|job| self.score_job(worker, actor.as_ref(), job))
            .buffered(self.max_concurrency())
            .try_collect()
            .await?;
        let degraded = scored.iter().filter(|c| c.degraded).count();

        let mut page = {
            let mut rng = self.rng.lock();
            self.mixer.mix(scored, &mut *rng)
        };
        page.truncate(page_size);

        let contexts = page
            .iter()
            .map(|c| ExplanationContext::new(worker, &c.candidate, c.display_score()))
            .collect();
        let explanations = self.explainer.explain_page(contexts).await;

        let items: Vec<JobFeedItem> = page
            .into_iter()
            .zip(explanations)
            .map(|(c, explanation)| JobFeedItem {
                score: c.display_score(),
                job: c.candidate,
                breakdown: c.breakdown,
                final_score: c.final_score,
                explanation,
            })
            .collect();

        info!(
            returned = items.len(),
            skipped, degraded, "Job feed ranked"
        );
        Ok(RankedPage {
            items,
            skipped,
            degraded,
        })
    }

    /// Ranks `workers` for `job` by score alone: no exploration, no explanations.
    #[instrument(skip(self, job, workers), fields(job_id = job.id, pool = workers.len()))]
    pub async fn rank_workers_for_job(
        &self,
        job: &Job,
        workers: Vec<User>,
        page_size: usize,
    ) -> RankingResult<RankedPage<WorkerMatch>> {
        let (workers, skipped) = drop_malformed(
            workers,
            |user| {
                if user.is_worker() {
                    user.missing_text()
                } else {
                    Some("role")
                }
            },
            |user| user.id,
        );
        let actor = self
            .actor_vector(EntityKind::Job, job.id, &job.embedding_text())
            .await;

        let mut scored: Vec<ScoredCandidate<User>> = stream::iter(workers)
            .map(|worker| self.score_worker(job, actor.as_ref(), worker))
            .buffered(self.max_concurrency())
            .try_collect()
            .await?;
        let degraded = scored.iter().filter(|c| c.degraded).count();

        sort_by_score_desc(&mut scored);
        scored.truncate(page_size);

        let items: Vec<WorkerMatch> = scored
            .into_iter()
            .map(|c| WorkerMatch {
                score: c.display_score(),
                worker: c.candidate,
                breakdown: c.breakdown,
                final_score: c.final_score,
            })
            .collect();

        info!(
            returned = items.len(),
            skipped, degraded, "Candidate list ranked"
        );
        Ok(RankedPage {
            items,
            skipped,
            degraded,
        })
    }

    async fn score_job(
        &self,
        worker: &User,
        actor: Option<&Vector>,
        job: Job,
    ) -> RankingResult<ScoredCandidate<Job>> {
        let signals = &self.policy.signals;
        let (sim, degraded) = self
            .candidate_similarity(actor, EntityKind::Job, job.id, &job.embedding_text())
            .await;

        let trust = match job.company_id {
            Some(company_id) => {
                load_trust_score(self.store(), &signals.trust, company_id, PartyKind::Company)
                    .await?
            }
            None => trust_score(&[], 0, &signals.trust),
        };
        let behavior = load_behavior_score(
            self.store(),
            &signals.behavior,
            worker.id,
            TargetKind::Job,
            job.id,
        )
        .await?;

        let breakdown = SignalBreakdown {
            similarity: sim,
            location: location_fit(&worker.location, &job.location),
            availability: availability_fit(&worker.availability, &job.job_type),
            trust,
            behavior,
            freshness: Some(freshness(job.id)),
        };
        let final_score = WeightProfile::WorkerSeesJobs.weights().score(&breakdown);

        Ok(ScoredCandidate {
            candidate: job,
            breakdown,
            final_score,
            degraded,
        })
    }

    async fn score_worker(
        &self,
        job: &Job,
        actor: Option<&Vector>,
        worker: User,
    ) -> RankingResult<ScoredCandidate<User>> {
        let signals = &self.policy.signals;
        let (sim, degraded) = self
            .candidate_similarity(actor, EntityKind::Worker, worker.id, &worker.embedding_text())
            .await;

        let trust =
            load_trust_score(self.store(), &signals.trust, worker.id, PartyKind::Worker).await?;
        let behavior = load_behavior_score(
            self.store(),
            &signals.behavior,
            worker.id,
            TargetKind::Job,
            job.id,
        )
        .await?;

        let breakdown = SignalBreakdown {
            similarity: sim,
            location: location_fit(&worker.location, &job.location),
            availability: availability_fit(&worker.availability, &job.job_type),
            trust,
            behavior,
            freshness: None,
        };
        let final_score = WeightProfile::CompanySeesWorkers.weights().score(&breakdown);

        Ok(ScoredCandidate {
            candidate: worker,
            breakdown,
            final_score,
            degraded,
        })
    }

    async fn actor_vector(&self, kind: EntityKind, id: u64, text: &str) -> Option<Vector> {
        match self.cache.resolve_vector(kind, id, text).await {
            Ok(vector) => Some(vector),
            Err(e) => {
                warn!(%kind, id, error = %e, "Actor embedding unavailable; similarity disabled for this request");
                None
            }
        }
    }

    /// Similarity against the actor, and whether it had to fall back to 0.
    async fn candidate_similarity(
        &self,
        actor: Option<&Vector>,
        kind: EntityKind,
        id: u64,
        text: &str,
    ) -> (f64, bool) {
        let Some(actor) = actor else {
            return (0.0, true);
        };
        match self.cache.resolve_vector(kind, id, text).await {
            Ok(vector) => (similarity(Some(&actor[..]), Some(&vector[..])), false),
            Err(e) => {
                warn!(%kind, id, error = %e, "Candidate embedding unavailable; similarity set to 0");
                (0.0, true)
            }
        }
    }

    fn max_concurrency(&self) -> usize {
        self.policy.max_concurrency.max(1)
    }
}

/// Splits off candidates that cannot be ranked; returns the rest and the count dropped.
fn drop_malformed<T>(
    candidates: Vec<T>,
    missing: impl Fn(&T) -> Option<&'static str>,
    id: impl Fn(&T) -> u64,
) -> (Vec<T>, usize) {
    let total = candidates.len();
    let kept: Vec<T> = candidates
        .into_iter()
        .filter(|c| match missing(c) {
            Some(field) => {
                debug!(id = id(c), field, "Skipping malformed candidate");
                false
            }
            None => true,
        })
        .collect();
    let skipped = total - kept.len();
    (kept, skipped)
}
