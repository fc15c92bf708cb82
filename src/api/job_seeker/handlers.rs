use actix_web::{
    HttpResponse, delete, get, post, put,
    web::{Data, Path, ServiceConfig, scope},
};
use actix_web_validator::Json;
use tracing::info;

use super::models::{JobSeeker, JobSeekerRepository};
use crate::api::dto::MessageResponse;
use crate::api::error::ApiError;
use crate::db::{RecordId, RecordStore};

const NOT_FOUND: &str = "Job Seeker not found";

#[get("")]
async fn list_job_seekers(store: Data<dyn RecordStore>) -> Result<HttpResponse, ApiError> {
    let seekers = JobSeekerRepository::find_all(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(seekers))
}

#[get("/{id}")]
async fn read_job_seeker(store: Data<dyn RecordStore>, path: Path<String>) -> Result<HttpResponse, ApiError> {
    let id = RecordId::parse(&path.into_inner())?;
    match JobSeekerRepository::find_by_id(store.get_ref(), id).await? {
        Some(seeker) => Ok(HttpResponse::Ok().json(seeker)),
        None => Err(ApiError::NotFound(NOT_FOUND)),
    }
}

#[post("")]
async fn create_job_seeker(store: Data<dyn RecordStore>, body: Json<JobSeeker>) -> Result<HttpResponse, ApiError> {
    let seeker = body.into_inner();
    let id = JobSeekerRepository::insert(store.get_ref(), &seeker).await?;
    info!("Created job seeker id={} name={}", id, seeker.name);
    Ok(HttpResponse::Created().json(id))
}

#[put("/{id}")]
async fn update_job_seeker(
    store: Data<dyn RecordStore>,
    path: Path<String>,
    body: Json<JobSeeker>,
) -> Result<HttpResponse, ApiError> {
    let id = RecordId::parse(&path.into_inner())?;
    if JobSeekerRepository::replace_by_id(store.get_ref(), id, &body.into_inner()).await? == 0 {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    Ok(HttpResponse::Ok().json(MessageResponse::new("Job Seeker updated successfully")))
}

#[delete("/{id}")]
async fn delete_job_seeker(store: Data<dyn RecordStore>, path: Path<String>) -> Result<HttpResponse, ApiError> {
    let id = RecordId::parse(&path.into_inner())?;
    if JobSeekerRepository::delete_by_id(store.get_ref(), id).await? == 0 {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    info!("Deleted job seeker id={}", id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Job Seeker deleted successfully")))
}

pub fn job_seeker_config(config: &mut ServiceConfig) {
    config.service(
        scope("/job-seekers")
            .service(list_job_seekers)
            .service(read_job_seeker)
            .service(create_job_seeker)
            .service(update_job_seeker)
            .service(delete_job_seeker),
    );
}
