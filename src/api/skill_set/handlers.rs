use actix_web::{
    HttpResponse, delete, get, post, put,
    web::{Data, Path, ServiceConfig, scope},
};
use actix_web_validator::Json;
use tracing::info;

use super::models::{SkillSet, SkillSetInput, SkillSetRepository};
use crate::api::dto::MessageResponse;
use crate::api::error::ApiError;
use crate::db::{RecordId, RecordStore};

const NOT_FOUND: &str = "Skill Set not found";

#[get("")]
async fn list_skill_sets(store: Data<dyn RecordStore>) -> Result<HttpResponse, ApiError> {
    let skill_sets = SkillSetRepository::find_all(store.get_ref())
        .await
        .map_err(ApiError::internal("Error listing skill sets"))?;
    Ok(HttpResponse::Ok().json(skill_sets))
}

#[get("/{id}")]
async fn read_skill_set(store: Data<dyn RecordStore>, path: Path<String>) -> Result<HttpResponse, ApiError> {
    let id = RecordId::parse(&path.into_inner())?;
    SkillSetRepository::find_by_id(store.get_ref(), id)
        .await?
        .map(|skill_set| HttpResponse::Ok().json(skill_set))
        .ok_or(ApiError::NotFound(NOT_FOUND))
}

/// Associate a skill with a job posting
#[post("")]
async fn create_skill_set(store: Data<dyn RecordStore>, body: Json<SkillSetInput>) -> Result<HttpResponse, ApiError> {
    let skill_set = SkillSet::try_from(body.into_inner())?;
    let id = SkillSetRepository::insert(store.get_ref(), &skill_set).await?;
    info!("Associated skill '{}' with job posting {}", skill_set.skill, skill_set.job_posting_id);
    Ok(HttpResponse::Created().json(id))
}

#[put("/{id}")]
async fn update_skill_set(
    store: Data<dyn RecordStore>,
    path: Path<String>,
    body: Json<SkillSetInput>,
) -> Result<HttpResponse, ApiError> {
    let id = RecordId::parse(&path.into_inner())?;
    let skill_set = SkillSet::try_from(body.into_inner())?;
    if SkillSetRepository::replace_by_id(store.get_ref(), id, &skill_set).await? == 0 {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    Ok(HttpResponse::Ok().json(MessageResponse::new("Skill Set updated successfully")))
}

/// Disassociate a skill from its job posting
#[delete("/{id}")]
async fn delete_skill_set(store: Data<dyn RecordStore>, path: Path<String>) -> Result<HttpResponse, ApiError> {
    let id = RecordId::parse(&path.into_inner())?;
    if SkillSetRepository::delete_by_id(store.get_ref(), id).await? == 0 {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    Ok(HttpResponse::Ok().json(MessageResponse::new("Skill Set disassociated successfully")))
}

pub fn skill_set_config(config: &mut ServiceConfig) {
    config.service(
        scope("/skill-sets")
            .service(list_skill_sets)
            .service(read_skill_set)
            .service(create_skill_set)
            .service(update_skill_set)
            .service(delete_skill_set),
    );
}
