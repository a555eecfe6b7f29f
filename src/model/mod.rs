//! Records ranked by the feed: users (workers and companies), jobs, and the
//! append-only interaction and rating logs.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a [`User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Worker,
    Company,
}

/// A worker or a company account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
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
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_worker(&self) -> bool {
        self.role == Role::Worker
    }

    /// Text fed to the embedding provider for this worker.
    pub fn embedding_text(&self) -> String {
        format!(
            "skills: {}\nexperience: {}\navailability: {}\nlocation: {}",
            self.skills, self.experience, self.availability, self.location
        )
    }

    /// Returns the reason this record cannot be ranked, if any.
    pub fn missing_text(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            return Some("name");
        }
        if self.skills.trim().is_empty() && self.experience.trim().is_empty() {
            return Some("skills");
        }
        None
    }
}

/// A job posting, optionally owned by a company user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
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
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

pub(crate) fn default_job_type() -> String {
    "micro-job".to_string()
}

impl Job {
    /// Text fed to the embedding provider for this job.
    pub fn embedding_text(&self) -> String {
        format!(
            "title: {}\ndesc: {}\nrequired: {}\nlocation: {}\ntype: {}",
            self.title, self.description, self.required_skills, self.location, self.job_type
        )
    }

    /// Returns the first required text field that is blank, if any.
    pub fn missing_text(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            Some("title")
        } else if self.description.trim().is_empty() {
            Some("description")
        } else if self.required_skills.trim().is_empty() {
            Some("required_skills")
        } else {
            None
        }
    }
}

/// Entity kind component of an embedding cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Worker,
    Job,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Worker => "worker",
            EntityKind::Job => "job",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Party kind used for event actors, raters and rating targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    Worker,
    Company,
}

impl From<Role> for PartyKind {
    fn from(role: Role) -> Self {
        match role {
            Role::Worker => PartyKind::Worker,
            Role::Company => PartyKind::Company,
        }
    }
}

/// What an interaction event points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Job,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    View,
    Click,
    Save,
    Apply,
    Skip,
    Cancel,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::View,
        EventKind::Click,
        EventKind::Save,
        EventKind::Apply,
        EventKind::Skip,
        EventKind::Cancel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::View => "view",
            EventKind::Click => "click",
            EventKind::Save => "save",
            EventKind::Apply => "apply",
            EventKind::Skip => "skip",
            EventKind::Cancel => "cancel",
        }
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown event kind: {}", s))
    }
}

/// One entry of the append-only interaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub actor_id: u64,
    pub actor_kind: PartyKind,
    pub target_kind: TargetKind,
    pub target_id: u64,
    pub kind: EventKind,
    #[serde(default)]
    pub dwell_seconds: u32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// One entry of the append-only rating log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rater_id: u64,
    pub rater_kind: PartyKind,
    pub target_id: u64,
    pub target_kind: PartyKind,
    pub stars: u8,
    #[serde(default)]
    pub note: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Per-kind event counts for one (actor, target) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCounts {
    pub view: u32,
    pub click: u32,
    pub save: u32,
    pub apply: u32,
    pub skip: u32,
    pub cancel: u32,
}

impl EventCounts {
    pub fn record(&mut self, kind: EventKind) {
        *self.slot(kind) += 1;
    }

    pub fn get(&self, kind: EventKind) -> u32 {
        match kind {
            EventKind::View => self.view,
            EventKind::Click => self.click,
            EventKind::Save => self.save,
            EventKind::Apply => self.apply,
            EventKind::Skip => self.skip,
            EventKind::Cancel => self.cancel,
        }
    }

    pub fn total(&self) -> u32 {
        EventKind::ALL.iter().map(|k| self.get(*k)).sum()
    }

    fn slot(&mut self, kind: EventKind) -> &mut u32 {
        match kind {
            EventKind::View => &mut self.view,
            EventKind::Click => &mut self.click,
            EventKind::Save => &mut self.save,
            EventKind::Apply => &mut self.apply,
            EventKind::Skip => &mut self.skip,
            EventKind::Cancel => &mut self.cancel,
        }
    }
}
