use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::{Collection, Entity, RecordId, Repository, StoreError};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct JobPosting {
    pub job_title: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub hiring_manager_id: RecordId,
}

impl Entity for JobPosting {
    const COLLECTION: Collection = Collection::JobPostings;
}

pub type JobPostingRepository = Repository<JobPosting>;

/// Request body for creating or replacing a job posting
///
/// `skills`, when present, becomes the posting's complete set of skill-set rows.
#[derive(Debug, Deserialize, Validate)]
pub struct JobPostingInput {
    #[validate(length(min = 1, message = "Job title must not be empty"))]
    pub job_title: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub hiring_manager_id: String,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

impl JobPostingInput {
    /// Split into the stored posting and its optional skill list
    pub fn into_parts(self) -> Result<(JobPosting, Option<Vec<String>>), StoreError> {
        let posting = JobPosting {
            job_title: self.job_title,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            hiring_manager_id: RecordId::parse(&self.hiring_manager_id)?,
        };
        Ok((posting, self.skills))
    }
}
