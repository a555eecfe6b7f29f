use serde::Serialize;

use crate::model::{Job, User};

/// Worker fields shown to the explanation provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerSummary {
    pub skills: String,
    pub experience: String,
    pub availability: String,
    pub location: String,
}

/// Job fields shown to the explanation provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSummary {
    pub title: String,
    pub required_skills: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub location: String,
}

/// Structured input for one explanation, sent to the provider as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplanationContext {
    pub worker: WorkerSummary,
    pub job: JobSummary,
    /// Display score (0..=100).
    pub score: u32,
}

impl ExplanationContext {
    pub fn new(worker: &User, job: &Job, score: u32) -> Self {
        Self {
            worker: WorkerSummary {
                skills: worker.skills.clone(),
                experience: worker.experience.clone(),
                availability: worker.availability.clone(),
                location: worker.location.clone(),
            },
            job: JobSummary {
                title: job.title.clone(),
                required_skills: job.required_skills.clone(),
                job_type: job.job_type.clone(),
                location: job.location.clone(),
            },
            score,
        }
    }
}
