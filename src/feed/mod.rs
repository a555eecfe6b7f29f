//! Request-level surface over [`FeedRanker`]: actor lookup, role checks,
//! candidate pool loading and page-size clamping.

mod error;


pub use error::FeedError;

use tracing::{debug, instrument};

use crate::constants::{
    DEFAULT_JOB_POOL_LIMIT, DEFAULT_PAGE_SIZE, DEFAULT_WORKER_POOL_LIMIT, MAX_PAGE_SIZE,
    MIN_PAGE_SIZE,
};
use crate::ranking::{FeedRanker, JobFeedItem, RankedPage, WorkerMatch};
use crate::store::{RecordStore, SignalStore, VectorStore};

/// Clamps a requested page size to `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]`.
pub fn clamp_page_size(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
}

#[derive(Debug)]
pub struct FeedService<S: VectorStore + SignalStore + RecordStore> {
    ranker: FeedRanker<S>,
    job_pool_limit: usize,
    worker_pool_limit: usize,
}

impl<S: VectorStore + SignalStore + RecordStore> FeedService<S> {
    pub fn new(ranker: FeedRanker<S>) -> Self {
        Self {
            ranker,
            job_pool_limit: DEFAULT_JOB_POOL_LIMIT,
            worker_pool_limit: DEFAULT_WORKER_POOL_LIMIT,
        }
    }

    /// Sets how many of the newest jobs and workers are considered per request.
    pub fn with_pool_limits(mut self, job_pool_limit: usize, worker_pool_limit: usize) -> Self {
        self.job_pool_limit = job_pool_limit;
        self.worker_pool_limit = worker_pool_limit;
        self
    }

    pub fn ranker(&self) -> &FeedRanker<S> {
        &self.ranker
    }

    /// Job feed for a worker.
    #[instrument(skip(self))]
    pub async fn jobs_feed(
        &self,
        worker_id: u64,
        limit: Option<usize>,
    ) -> Result<RankedPage<JobFeedItem>, FeedError> {
        let store = self.ranker.store();
        let worker = store
            .get_user(worker_id)
            .await?
            .ok_or(FeedError::NotFound {
                kind: "user",
                id: worker_id,
            })?;
        if !worker.is_worker() {
            return Err(FeedError::NotAWorker { id: worker_id });
        }

        let jobs = store.recent_jobs(self.job_pool_limit).await?;
        let page_size = clamp_page_size(limit);
        debug!(pool = jobs.len(), page_size, "Job pool loaded");

        Ok(self
            .ranker
            .rank_jobs_for_worker(&worker, jobs, page_size)
            .await?)
    }

    /// Candidate list for a job.
    #[instrument(skip(self))]
    pub async fn candidates_feed(
        &self,
        job_id: u64,
        limit: Option<usize>,
    ) -> Result<RankedPage<WorkerMatch>, FeedError> {
        let store = self.ranker.store();
        let job = store.get_job(job_id).await?.ok_or(FeedError::NotFound {
            kind: "job",
            id: job_id,
        })?;

        let workers = store.recent_workers(self.worker_pool_limit).await?;
        let page_size = clamp_page_size(limit);
        debug!(pool = workers.len(), page_size, "Worker pool loaded");

        Ok(self
            .ranker
            .rank_workers_for_job(&job, workers, page_size)
            .await?)
    }
}
