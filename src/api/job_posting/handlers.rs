use actix_web::{
    HttpResponse, delete, get, post, put,
    web::{Data, Path, ServiceConfig, scope},
};
use actix_web_validator::Json;

use super::models::{JobPostingInput, JobPostingRepository};
use super::service::JobPostingService;
use crate::api::dto::MessageResponse;
use crate::api::error::ApiError;
use crate::api::views::{assemble_job_posting_view, assemble_job_posting_views};
use crate::db::{RecordId, RecordStore, Stored};

/// List all job postings with skills and hiring manager details
#[get("")]
async fn list_job_postings(store: Data<dyn RecordStore>) -> Result<HttpResponse, ApiError> {
    let store = store.get_ref();
    let context = "Error listing job postings";

    let postings = JobPostingRepository::find_all(store)
        .await
        .map_err(ApiError::internal(context))?;
    let views = assemble_job_posting_views(store, postings)
        .await
        .map_err(ApiError::internal(context))?;

    Ok(HttpResponse::Ok().json(views))
}

#[get("/{id}")]
async fn read_job_posting(store: Data<dyn RecordStore>, path: Path<String>) -> Result<HttpResponse, ApiError> {
    let store = store.get_ref();
    let context = "Error reading job posting";

    let id = RecordId::parse(&path.into_inner()).map_err(ApiError::internal(context))?;
    let Some(record) = JobPostingService::read(store, id)
        .await
        .map_err(ApiError::internal(context))?
    else {
        return Err(ApiError::NotFound("Job Posting not found"));
    };

    let view = assemble_job_posting_view(store, Stored { id, record })
        .await
        .map_err(ApiError::internal(context))?;
    Ok(HttpResponse::Ok().json(view.without_id()))
}

#[post("")]
async fn create_job_posting(store: Data<dyn RecordStore>, body: Json<JobPostingInput>) -> Result<HttpResponse, ApiError> {
    let id = JobPostingService::create(store.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(id))
}

#[put("/{id}")]
async fn update_job_posting(
    store: Data<dyn RecordStore>,
    path: Path<String>,
    body: Json<JobPostingInput>,
) -> Result<HttpResponse, ApiError> {
    let id = RecordId::parse(&path.into_inner())?;
    JobPostingService::replace(store.get_ref(), id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Job Posting updated successfully")))
}

#[delete("/{id}")]
async fn delete_job_posting(store: Data<dyn RecordStore>, path: Path<String>) -> Result<HttpResponse, ApiError> {
    let id = RecordId::parse(&path.into_inner())?;
    JobPostingService::delete(store.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Job Posting deleted successfully")))
}

pub fn job_posting_config(config: &mut ServiceConfig) {
    config.service(
        scope("/job-postings")
            .service(list_job_postings)
            .service(read_job_posting)
            .service(create_job_posting)
            .service(update_job_posting)
            .service(delete_job_posting),
    );
}
