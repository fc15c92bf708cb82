use tracing::{debug, info};

use super::models::{JobPosting, JobPostingInput, JobPostingRepository};
use crate::api::error::ApiError;
use crate::api::skill_set::models::{JOB_POSTING_REF, SkillSet, SkillSetRepository};
use crate::db::{Collection, RecordId, RecordStore, StoreError};

const NOT_FOUND: &str = "Job Posting not found";

/// Write-side operations on job postings and the skill-set rows they own
pub struct JobPostingService;

impl JobPostingService {
    /// Store the posting, then one skill-set row per submitted skill
    pub async fn create(store: &dyn RecordStore, input: JobPostingInput) -> Result<RecordId, ApiError> {
        let (posting, skills) = input.into_parts()?;
        let id = JobPostingRepository::insert(store, &posting).await?;

        if let Some(skills) = skills {
            Self::attach_skills(store, id, skills).await?;
        }

        info!("Created job posting id={} title={}", id, posting.job_title);
        Ok(id)
    }

    /// Overwrite the posting; a submitted skill list replaces all existing skill-set rows
    pub async fn replace(store: &dyn RecordStore, id: RecordId, input: JobPostingInput) -> Result<(), ApiError> {
        let (posting, skills) = input.into_parts()?;
        if JobPostingRepository::replace_by_id(store, id, &posting).await? == 0 {
            return Err(ApiError::NotFound(NOT_FOUND));
        }

        if let Some(skills) = skills {
            let removed = SkillSetRepository::delete_by_reference(store, JOB_POSTING_REF, id).await?;
            debug!("Removed {} skill sets from job posting {}", removed, id);
            Self::attach_skills(store, id, skills).await?;
        }

        info!("Updated job posting id={}", id);
        Ok(())
    }

    /// Delete the posting and its skill-set rows in one store operation.
    /// Orphaned skill rows are removed even when the posting no longer exists.
    pub async fn delete(store: &dyn RecordStore, id: RecordId) -> Result<(), ApiError> {
        let deleted = store
            .delete_cascade(Collection::JobPostings, id, Collection::SkillSets, JOB_POSTING_REF)
            .await?;
        if deleted == 0 {
            return Err(ApiError::NotFound(NOT_FOUND));
        }

        info!("Deleted job posting id={}", id);
        Ok(())
    }

    async fn attach_skills(store: &dyn RecordStore, id: RecordId, skills: Vec<String>) -> Result<(), StoreError> {
        let count = skills.len();
        for skill in skills {
            SkillSetRepository::insert(
                store,
                &SkillSet {
                    job_posting_id: id,
                    skill,
                },
            )
            .await?;
        }
        debug!("Attached {} skills to job posting {}", count, id);
        Ok(())
    }

    pub async fn read(store: &dyn RecordStore, id: RecordId) -> Result<Option<JobPosting>, StoreError> {
        JobPostingRepository::find_by_id(store, id).await
    }
}
