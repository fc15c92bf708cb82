use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::db::{Collection, Entity, Repository};

/// Job seeker profile; skills are kept inline rather than as skill-set rows.
/// `status`, `experience`, `bio` and `availability` are stored exactly as sent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
pub struct JobSeeker {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub status: Value,
    pub skills: Vec<String>,
    pub experience: Value,
    pub bio: Value,
    pub availability: Value,
}

impl Entity for JobSeeker {
    const COLLECTION: Collection = Collection::JobSeekers;
}

pub type JobSeekerRepository = Repository<JobSeeker>;
