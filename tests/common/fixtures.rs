//! Test fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use feed::embedding::MockEmbedder;
use feed::explain::Explainer;
use feed::model::{Job, Role, User};
use feed::ranking::{FeedRanker, RankingPolicy};
use feed::store::{MemoryStore, NewJob, NewUser};

pub const SEED: u64 = 20_240_601;

#[derive(Default)]
pub struct WorkerBuilder {
    name: Option<String>,
    phone: Option<String>,
    skills: String,
    experience: String,
    availability: String,
    location: String,
}

impl WorkerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    pub fn skills(mut self, skills: &str) -> Self {
        self.skills = skills.to_string();
        self
    }

    pub fn experience(mut self, experience: &str) -> Self {
        self.experience = experience.to_string();
        self
    }

    pub fn availability(mut self, availability: &str) -> Self {
        self.availability = availability.to_string();
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    pub fn insert(self, store: &MemoryStore) -> User {
        let phone = self
            .phone
            .unwrap_or_else(|| format!("2{:07}", store.list_users().len() + 1));
        store
            .insert_user(NewUser {
                role: Role::Worker,
                name: self.name.unwrap_or_else(|| "Test Worker".to_string()),
                phone,
                skills: self.skills,
                experience: self.experience,
                availability: self.availability,
                location: self.location,
            })
            .expect("worker fixture should be valid")
    }
}

pub struct JobBuilder {
    company_id: Option<u64>,
    title: String,
    company_name: String,
    description: String,
    required_skills: String,
    location: String,
    job_type: String,
}

impl JobBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            company_id: None,
            title: title.to_string(),
            company_name: "Hotel Mouradi".to_string(),
            description: format!("{title} needed this season"),
            required_skills: title.to_lowercase(),
            location: String::new(),
            job_type: "micro-job".to_string(),
        }
    }

    pub fn company(mut self, company_id: u64) -> Self {
        self.company_id = Some(company_id);
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn required_skills(mut self, skills: &str) -> Self {
        self.required_skills = skills.to_string();
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    pub fn job_type(mut self, job_type: &str) -> Self {
        self.job_type = job_type.to_string();
        self
    }

    pub fn insert(self, store: &MemoryStore) -> Job {
        store
            .insert_job(NewJob {
                company_id: self.company_id,
                title: self.title,
                company_name: self.company_name,
                description: self.description,
                required_skills: self.required_skills,
                location: self.location,
                job_type: self.job_type,
                start_date: String::new(),
                end_date: String::new(),
            })
            .expect("job fixture should be valid")
    }
}

pub fn insert_company(store: &MemoryStore, name: &str, phone: &str) -> User {
    store
        .insert_user(NewUser {
            role: Role::Company,
            name: name.to_string(),
            phone: phone.to_string(),
            ..Default::default()
        })
        .expect("company fixture should be valid")
}

/// Policy with no random tail beyond the single mandatory exploration slot.
pub fn exploit_policy() -> RankingPolicy {
    RankingPolicy {
        explore_rate: 0.0,
        ..RankingPolicy::default()
    }
}

pub fn seeded_ranker(
    store: &MemoryStore,
    embedder: Arc<MockEmbedder>,
    explainer: Explainer,
    policy: RankingPolicy,
) -> FeedRanker<MemoryStore> {
    use rand::SeedableRng;

    FeedRanker::new(store.clone(), embedder, explainer, policy)
        .with_rng(rand::rngs::StdRng::seed_from_u64(SEED))
}

/// Worker in Sousse available on weekends, and five jobs of which two are
/// short-shift waiting jobs in Sousse and neighbouring Monastir.
pub struct SousseScenario {
    pub worker: User,
    pub monastir_waiter: Job,
    pub sousse_waiter: Job,
    pub jobs: Vec<Job>,
}

pub fn sousse_scenario(store: &MemoryStore) -> SousseScenario {
    let worker = WorkerBuilder::new()
        .name("Sarra")
        .skills("waiter, serving tables, french")
        .experience("two summers as waiter in a beach restaurant")
        .availability("weekends")
        .location("Sousse")
        .insert(store);

    let accountant = JobBuilder::new("Accountant")
        .description("Bookkeeping and payroll for the head office")
        .required_skills("accounting, excel")
        .location("Tunis")
        .job_type("full-time")
        .insert(store);
    let monastir_waiter = JobBuilder::new("Waiter")
        .description("Serving tables at a marina restaurant")
        .required_skills("waiter, serving tables")
        .location("Monastir")
        .job_type("micro-job")
        .insert(store);
    let mechanic = JobBuilder::new("Mechanic")
        .description("Maintain the quad bike fleet")
        .required_skills("engines, repair")
        .location("Djerba")
        .job_type("full-time")
        .insert(store);
    let sousse_waiter = JobBuilder::new("Waiter")
        .description("Serving tables for weekend beach events")
        .required_skills("waiter, serving tables")
        .location("Sousse")
        .job_type("micro-job")
        .insert(store);
    let receptionist = JobBuilder::new("Night Receptionist")
        .description("Front desk check-ins overnight")
        .required_skills("reception, english")
        .location("Sfax")
        .job_type("full-time")
        .insert(store);

    SousseScenario {
        worker,
        jobs: vec![
            accountant,
            monastir_waiter.clone(),
            mechanic,
            sousse_waiter.clone(),
            receptionist,
        ],
        monastir_waiter,
        sousse_waiter,
    }
}

/// Weekend carpenter in Sousse, and five jobs of which one is a weekend
/// carpentry gig in neighbouring Monastir.
pub struct CarpenterScenario {
    pub worker: User,
    pub monastir_carpenter: Job,
    pub jobs: Vec<Job>,
}

pub fn carpenter_scenario(store: &MemoryStore) -> CarpenterScenario {
    let worker = WorkerBuilder::new()
        .name("Youssef")
        .skills("carpentry, painting")
        .availability("weekends")
        .location("Sousse")
        .insert(store);

    let accountant = JobBuilder::new("Accountant")
        .description("Bookkeeping and payroll for the head office")
        .required_skills("accounting, excel")
        .location("Tunis")
        .job_type("full-time")
        .insert(store);
    let monastir_carpenter = JobBuilder::new("Weekend Carpenter — Monastir")
        .description("Repair wooden beach cabins on weekends")
        .required_skills("carpentry")
        .location("Monastir")
        .job_type("micro-job")
        .insert(store);
    let chef = JobBuilder::new("Chef")
        .description("Run the hotel kitchen for the summer season")
        .required_skills("cooking, menu planning")
        .location("Djerba")
        .job_type("full-time")
        .insert(store);
    let receptionist = JobBuilder::new("Night Receptionist")
        .description("Front desk check-ins overnight")
        .required_skills("reception, english")
        .location("Sfax")
        .job_type("full-time")
        .insert(store);
    let lifeguard = JobBuilder::new("Lifeguard")
        .description("Watch the hotel pool and beach")
        .required_skills("swimming, first aid")
        .location("Hammamet")
        .job_type("full-time")
        .insert(store);

    CarpenterScenario {
        worker,
        jobs: vec![
            accountant,
            monastir_carpenter.clone(),
            chef,
            receptionist,
            lifeguard,
        ],
        monastir_carpenter,
    }
}
