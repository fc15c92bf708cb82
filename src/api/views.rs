//! Denormalized read views.
//!
//! Job postings are returned with their skill-set rows and hiring manager
//! inlined; applications with their job posting and job seeker inlined. All
//! functions here only read from the store.

use futures_util::future::try_join_all;
use serde::Serialize;

use crate::api::application::models::{Application, ApplicationStatus};
use crate::api::hiring_manager::models::{HiringManager, HiringManagerRepository};
use crate::api::job_posting::models::{JobPosting, JobPostingRepository};
use crate::api::job_seeker::models::{JobSeeker, JobSeekerRepository};
use crate::api::skill_set::models::{JOB_POSTING_REF, SkillSetRepository};
use crate::db::{RecordId, RecordStore, Stored, StoreError};

/// A job posting with its skills and hiring manager
#[derive(Debug, Serialize)]
pub struct JobPostingView {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(flatten)]
    pub posting: JobPosting,
    pub skills: Vec<String>,
    pub hiring_manager: Option<HiringManager>,
}

impl JobPostingView {
    /// Single-record reads do not echo the identifier
    pub fn without_id(self) -> Self {
        Self { id: None, ..self }
    }
}

/// The job posting nested inside an application view
#[derive(Debug, Serialize)]
pub struct ApplicationPostingView {
    #[serde(flatten)]
    pub posting: JobPosting,
    pub hiring_manager: Option<HiringManager>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationView {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub job_posting: Option<ApplicationPostingView>,
    pub job_seeker: Option<JobSeeker>,
    pub status: ApplicationStatus,
}

impl ApplicationView {
    pub fn without_id(self) -> Self {
        Self { id: None, ..self }
    }
}

async fn hiring_manager_of(store: &dyn RecordStore, posting: &JobPosting) -> Result<Option<HiringManager>, StoreError> {
    HiringManagerRepository::find_by_id(store, posting.hiring_manager_id).await
}

/// Attach skills (store order) and the hiring manager (or null) to a posting
pub async fn assemble_job_posting_view(
    store: &dyn RecordStore,
    posting: Stored<JobPosting>,
) -> Result<JobPostingView, StoreError> {
    let skills = SkillSetRepository::find_by_reference(store, JOB_POSTING_REF, posting.id)
        .await?
        .into_iter()
        .map(|skill_set| skill_set.record.skill)
        .collect();
    let hiring_manager = hiring_manager_of(store, &posting.record).await?;

    Ok(JobPostingView {
        id: Some(posting.id),
        posting: posting.record,
        skills,
        hiring_manager,
    })
}

/// Assemble every posting; the first failure fails the whole list
pub async fn assemble_job_posting_views(
    store: &dyn RecordStore,
    postings: Vec<Stored<JobPosting>>,
) -> Result<Vec<JobPostingView>, StoreError> {
    try_join_all(
        postings
            .into_iter()
            .map(|posting| assemble_job_posting_view(store, posting)),
    )
    .await
}

/// Attach the job posting (with hiring manager) and the job seeker to an application
pub async fn assemble_application_view(
    store: &dyn RecordStore,
    application: Stored<Application>,
) -> Result<ApplicationView, StoreError> {
    let Stored { id, record } = application;

    // The nested posting carries its hiring manager but not its skills,
    // unlike JobPostingView. Clients rely on this shape; keep it.
    let job_posting = match JobPostingRepository::find_by_id(store, record.job_posting_id).await? {
        Some(posting) => {
            let hiring_manager = hiring_manager_of(store, &posting).await?;
            Some(ApplicationPostingView {
                posting,
                hiring_manager,
            })
        }
        None => None,
    };
    let job_seeker = JobSeekerRepository::find_by_id(store, record.job_seeker_id).await?;

    Ok(ApplicationView {
        id: Some(id),
        job_posting,
        job_seeker,
        status: record.status,
    })
}

pub async fn assemble_application_views(
    store: &dyn RecordStore,
    applications: Vec<Stored<Application>>,
) -> Result<Vec<ApplicationView>, StoreError> {
    try_join_all(
        applications
            .into_iter()
            .map(|application| assemble_application_view(store, application)),
    )
    .await
}
