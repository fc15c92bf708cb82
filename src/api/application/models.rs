use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::{Collection, Entity, RecordId, Repository, StoreError};

/// Review state of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Pending" => Some(ApplicationStatus::Pending),
            "Reviewed" => Some(ApplicationStatus::Reviewed),
            "Accepted" => Some(ApplicationStatus::Accepted),
            "Rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Application {
    pub job_posting_id: RecordId,
    pub job_seeker_id: RecordId,
    pub status: ApplicationStatus,
}

impl Entity for Application {
    const COLLECTION: Collection = Collection::Applications;
}

pub type ApplicationRepository = Repository<Application>;

/// Request body for submitting an application; any client-sent status is ignored
#[derive(Debug, Deserialize, Validate)]
pub struct NewApplication {
    pub job_posting_id: String,
    pub job_seeker_id: String,
}

impl NewApplication {
    pub fn into_pending(self) -> Result<Application, StoreError> {
        Ok(Application {
            job_posting_id: RecordId::parse(&self.job_posting_id)?,
            job_seeker_id: RecordId::parse(&self.job_seeker_id)?,
            status: ApplicationStatus::Pending,
        })
    }
}

/// Request body for `PUT /applications/{id}`
#[derive(Debug, Deserialize, Validate)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: Option<String>,
}
