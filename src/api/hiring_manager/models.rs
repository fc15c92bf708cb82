use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::{Collection, Entity, Repository};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
pub struct HiringManager {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
}

impl Entity for HiringManager {
    const COLLECTION: Collection = Collection::HiringManagers;
}

pub type HiringManagerRepository = Repository<HiringManager>;
