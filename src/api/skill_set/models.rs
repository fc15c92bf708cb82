use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::{Collection, Entity, RecordId, Repository, StoreError};

/// Field linking a skill set to its owning job posting
pub const JOB_POSTING_REF: &str = "job_posting_id";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SkillSet {
    pub job_posting_id: RecordId,
    pub skill: String,
}

impl Entity for SkillSet {
    const COLLECTION: Collection = Collection::SkillSets;
}

pub type SkillSetRepository = Repository<SkillSet>;

/// Request body for creating or replacing a skill set
#[derive(Debug, Deserialize, Validate)]
pub struct SkillSetInput {
    pub job_posting_id: String,
    #[validate(length(min = 1, message = "Skill must not be empty"))]
    pub skill: String,
}

impl TryFrom<SkillSetInput> for SkillSet {
    type Error = StoreError;

    fn try_from(input: SkillSetInput) -> Result<Self, Self::Error> {
        Ok(SkillSet {
            job_posting_id: RecordId::parse(&input.job_posting_id)?,
            skill: input.skill,
        })
    }
}
