//! In-memory store with the same insert semantics as the relational schema
//! it stands in for: autoincrement ids, unique phone numbers, append-only
//! logs, and an insert-or-ignore embedding table.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
#[cfg(any(test, feature = "mock"))]
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::{debug, info};

use super::error::StoreError;
use super::{RecordStore, SignalStore, StoreResult, VectorStore};
use crate::cache::{CacheKey, Vector};
use crate::constants::{LIST_LIMIT, MAX_DWELL_SECONDS};
use crate::model::{
    EventCounts, EventKind, InteractionEvent, Job, PartyKind, Rating, Role, TargetKind, User,
    default_job_type,
};

/// Input for [`MemoryStore::insert_user`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub role: Role,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub location: String,
}

/// Input for [`MemoryStore::insert_job`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    #[serde(default)]
    pub company_id: Option<u64>,
    pub title: String,
    pub company_name: String,
    pub description: String,
    pub required_skills: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_job_type")]
    pub job_type: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Input for [`MemoryStore::append_event`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    pub actor_id: u64,
    pub actor_kind: PartyKind,
    pub target_kind: TargetKind,
    pub target_id: u64,
    pub kind: EventKind,
    #[serde(default)]
    pub dwell_seconds: u32,
}

/// Input for [`MemoryStore::append_rating`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewRating {
    pub rater_id: u64,
    pub rater_kind: PartyKind,
    pub target_id: u64,
    pub target_kind: PartyKind,
    pub stars: u8,
    #[serde(default)]
    pub note: String,
}

/// Full store contents as loaded by the binary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub events: Vec<InteractionEvent>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

#[derive(Default)]
struct Inner {
    users: BTreeMap<u64, User>,
    jobs: BTreeMap<u64, Job>,
    events: Vec<InteractionEvent>,
    ratings: Vec<Rating>,
    vectors: HashMap<CacheKey, Vector>,
}

impl Inner {
    fn next_user_id(&self) -> u64 {
        self.users.keys().next_back().map_or(1, |id| id + 1)
    }

    fn next_job_id(&self) -> u64 {
        self.jobs.keys().next_back().map_or(1, |id| id + 1)
    }
}

/// Cloneable handle to a shared in-memory store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
    #[cfg(any(test, feature = "mock"))]
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from snapshot records, keeping their ids.
    ///
    /// Records go through the same field checks as the insert methods.
    pub fn from_snapshot(snapshot: Snapshot) -> StoreResult<Self> {
        let store = Self::new();
        {
            let mut inner = store.inner.write();
            for user in snapshot.users {
                require_positive("user id", user.id)?;
                check_user(&user.name, &user.phone)?;
                if inner.users.values().any(|u| u.phone == user.phone) {
                    return Err(StoreError::Conflict {
                        reason: format!("phone {} already exists", user.phone),
                    });
                }
                if inner.users.insert(user.id, user).is_some() {
                    return Err(StoreError::Snapshot {
                        reason: "duplicate user id".to_string(),
                    });
                }
            }
            for job in snapshot.jobs {
                let id = job.id;
                require_positive("job id", id)?;
                check_job(
                    &job.title,
                    &job.company_name,
                    &job.description,
                    &job.required_skills,
                    job.company_id,
                )?;
                if inner.jobs.insert(id, job).is_some() {
                    return Err(StoreError::Snapshot {
                        reason: format!("duplicate job id {id}"),
                    });
                }
            }
            for event in &snapshot.events {
                check_event(event.actor_id, event.target_id, event.dwell_seconds)?;
            }
            for rating in &snapshot.ratings {
                check_rating(rating.rater_id, rating.target_id, rating.stars)?;
            }
            inner.events = snapshot.events;
            inner.ratings = snapshot.ratings;

            info!(
                users = inner.users.len(),
                jobs = inner.jobs.len(),
                events = inner.events.len(),
                ratings = inner.ratings.len(),
                "Loaded store snapshot"
            );
        }
        Ok(store)
    }

    /// Reads a JSON [`Snapshot`] from disk.
    pub fn load_json(path: &Path) -> StoreResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        Self::from_snapshot(snapshot)
    }

    pub fn insert_user(&self, new: NewUser) -> StoreResult<User> {
        self.check_available()?;
        check_user(&new.name, &new.phone)?;

        let mut inner = self.inner.write();
        if inner.users.values().any(|u| u.phone == new.phone) {
            return Err(StoreError::Conflict {
                reason: "phone already exists".to_string(),
            });
        }

        let user = User {
            id: inner.next_user_id(),
            role: new.role,
            name: new.name,
            phone: new.phone,
            skills: new.skills,
            experience: new.experience,
            availability: new.availability,
            location: new.location,
            created_at: Utc::now(),
        };
        inner.users.insert(user.id, user.clone());
        debug!(user_id = user.id, role = ?user.role, "User inserted");
        Ok(user)
    }

    pub fn insert_job(&self, new: NewJob) -> StoreResult<Job> {
        self.check_available()?;
        check_job(
            &new.title,
            &new.company_name,
            &new.description,
            &new.required_skills,
            new.company_id,
        )?;

        let mut inner = self.inner.write();
        let job = Job {
            id: inner.next_job_id(),
            company_id: new.company_id,
            title: new.title,
            company_name: new.company_name,
            description: new.description,
            required_skills: new.required_skills,
            location: new.location,
            job_type: new.job_type,
            start_date: new.start_date,
            end_date: new.end_date,
            created_at: Utc::now(),
        };
        inner.jobs.insert(job.id, job.clone());
        debug!(job_id = job.id, "Job inserted");
        Ok(job)
    }

    pub fn append_event(&self, new: NewEvent) -> StoreResult<()> {
        self.check_available()?;
        check_event(new.actor_id, new.target_id, new.dwell_seconds)?;

        self.inner.write().events.push(InteractionEvent {
            actor_id: new.actor_id,
            actor_kind: new.actor_kind,
            target_kind: new.target_kind,
            target_id: new.target_id,
            kind: new.kind,
            dwell_seconds: new.dwell_seconds,
            created_at: Utc::now(),
        });
        Ok(())
    }

    pub fn append_rating(&self, new: NewRating) -> StoreResult<()> {
        self.check_available()?;
        check_rating(new.rater_id, new.target_id, new.stars)?;

        self.inner.write().ratings.push(Rating {
            rater_id: new.rater_id,
            rater_kind: new.rater_kind,
            target_id: new.target_id,
            target_kind: new.target_kind,
            stars: new.stars,
            note: new.note,
            created_at: Utc::now(),
        });
        Ok(())
    }

    /// Newest users first, capped at [`LIST_LIMIT`].
    pub fn list_users(&self) -> Vec<User> {
        self.inner
            .read()
            .users
            .values()
            .rev()
            .take(LIST_LIMIT)
            .cloned()
            .collect()
    }

    /// Newest jobs first, capped at [`LIST_LIMIT`].
    pub fn list_jobs(&self) -> Vec<Job> {
        self.inner
            .read()
            .jobs
            .values()
            .rev()
            .take(LIST_LIMIT)
            .cloned()
            .collect()
    }

    /// Number of persisted embedding vectors.
    pub fn vector_count(&self) -> usize {
        self.inner.read().vectors.len()
    }

    /// Makes every subsequent call fail with [`StoreError::Unavailable`].
    #[cfg(any(test, feature = "mock"))]
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Release);
    }

    #[cfg(any(test, feature = "mock"))]
    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::Acquire) {
            return Err(StoreError::Unavailable {
                reason: "store marked unavailable".to_string(),
            });
        }
        Ok(())
    }

    #[cfg(not(any(test, feature = "mock")))]
    #[inline]
    fn check_available(&self) -> StoreResult<()> {
        Ok(())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("MemoryStore")
            .field("users", &inner.users.len())
            .field("jobs", &inner.jobs.len())
            .field("events", &inner.events.len())
            .field("ratings", &inner.ratings.len())
            .field("vectors", &inner.vectors.len())
            .finish()
    }
}

// Record checks shared by the insert methods and snapshot loading.

fn check_user(name: &str, phone: &str) -> StoreResult<()> {
    require_min_chars("name", name, 2)?;
    require_min_chars("phone", phone, 6)
}

fn check_job(
    title: &str,
    company_name: &str,
    description: &str,
    required_skills: &str,
    company_id: Option<u64>,
) -> StoreResult<()> {
    require_min_chars("title", title, 2)?;
    require_min_chars("company_name", company_name, 2)?;
    require_min_chars("description", description, 5)?;
    require_min_chars("required_skills", required_skills, 2)?;
    if company_id == Some(0) {
        return Err(StoreError::validation("company_id", "must be positive"));
    }
    Ok(())
}

fn check_event(actor_id: u64, target_id: u64, dwell_seconds: u32) -> StoreResult<()> {
    require_positive("actor_id", actor_id)?;
    require_positive("target_id", target_id)?;
    if dwell_seconds > MAX_DWELL_SECONDS {
        return Err(StoreError::validation(
            "dwell_seconds",
            format!("must be at most {MAX_DWELL_SECONDS}"),
        ));
    }
    Ok(())
}

fn check_rating(rater_id: u64, target_id: u64, stars: u8) -> StoreResult<()> {
    require_positive("rater_id", rater_id)?;
    require_positive("target_id", target_id)?;
    if !(1..=5).contains(&stars) {
        return Err(StoreError::validation("stars", "must be between 1 and 5"));
    }
    Ok(())
}

fn require_min_chars(field: &'static str, value: &str, min: usize) -> StoreResult<()> {
    if value.chars().count() < min {
        return Err(StoreError::validation(
            field,
            format!("must be at least {min} characters"),
        ));
    }
    Ok(())
}

fn require_positive(field: &'static str, value: u64) -> StoreResult<()> {
    if value == 0 {
        return Err(StoreError::validation(field, "must be positive"));
    }
    Ok(())
}

impl VectorStore for MemoryStore {
    async fn read_cached_vector(&self, key: &CacheKey) -> StoreResult<Option<Vector>> {
        self.check_available()?;
        Ok(self.inner.read().vectors.get(key).cloned())
    }

    async fn insert_vector_if_absent(&self, key: CacheKey, vector: Vector) -> StoreResult<bool> {
        self.check_available()?;
        let mut inner = self.inner.write();
        if inner.vectors.contains_key(&key) {
            return Ok(false);
        }
        inner.vectors.insert(key, vector);
        Ok(true)
    }
}

impl SignalStore for MemoryStore {
    async fn read_recent_ratings(
        &self,
        target_id: u64,
        target_kind: PartyKind,
        limit: usize,
    ) -> StoreResult<Vec<Rating>> {
        self.check_available()?;
        Ok(self
            .inner
            .read()
            .ratings
            .iter()
            .rev()
            .filter(|r| r.target_id == target_id && r.target_kind == target_kind)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_cancel_events(&self, actor_id: u64) -> StoreResult<u32> {
        self.check_available()?;
        let count = self
            .inner
            .read()
            .events
            .iter()
            .filter(|e| e.actor_id == actor_id && e.kind == EventKind::Cancel)
            .count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn read_event_counts(
        &self,
        actor_id: u64,
        target_kind: TargetKind,
        target_id: u64,
    ) -> StoreResult<EventCounts> {
        self.check_available()?;
        let mut counts = EventCounts::default();
        for event in self.inner.read().events.iter().filter(|e| {
            e.actor_id == actor_id && e.target_kind == target_kind && e.target_id == target_id
        }) {
            counts.record(event.kind);
        }
        Ok(counts)
    }
}

impl RecordStore for MemoryStore {
    async fn get_user(&self, id: u64) -> StoreResult<Option<User>> {
        self.check_available()?;
        Ok(self.inner.read().users.get(&id).cloned())
    }

    async fn get_job(&self, id: u64) -> StoreResult<Option<Job>> {
        self.check_available()?;
        Ok(self.inner.read().jobs.get(&id).cloned())
    }

    async fn recent_jobs(&self, limit: usize) -> StoreResult<Vec<Job>> {
        self.check_available()?;
        Ok(self
            .inner
            .read()
            .jobs
            .values()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn recent_workers(&self, limit: usize) -> StoreResult<Vec<User>> {
        self.check_available()?;
        Ok(self
            .inner
            .read()
            .users
            .values()
            .rev()
            .filter(|u| u.is_worker())
            .take(limit)
            .cloned()
            .collect())
    }
}
