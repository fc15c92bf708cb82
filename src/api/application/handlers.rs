use actix_web::{
    HttpResponse, delete, get, post, put,
    web::{Data, Path, ServiceConfig, scope},
};
use actix_web_validator::Json;
use tracing::info;

use super::models::{ApplicationRepository, ApplicationStatus, NewApplication, StatusUpdate};
use crate::api::dto::MessageResponse;
use crate::api::error::ApiError;
use crate::api::views::{assemble_application_view, assemble_application_views};
use crate::db::{RecordId, RecordStore, Stored};

const NOT_FOUND: &str = "Application not found";

/// Submit an application; it always starts as Pending
#[post("")]
async fn submit_application(store: Data<dyn RecordStore>, body: Json<NewApplication>) -> Result<HttpResponse, ApiError> {
    let application = body.into_inner().into_pending()?;
    let id = ApplicationRepository::insert(store.get_ref(), &application).await?;
    info!(
        "Application {} submitted by job seeker {} for job posting {}",
        id, application.job_seeker_id, application.job_posting_id
    );
    Ok(HttpResponse::Created().json(id))
}

/// List all applications with job posting and job seeker details.
/// An empty collection answers 404.
#[get("")]
async fn list_applications(store: Data<dyn RecordStore>) -> Result<HttpResponse, ApiError> {
    let store = store.get_ref();
    let context = "Error listing applications";

    let applications = ApplicationRepository::find_all(store)
        .await
        .map_err(ApiError::internal(context))?;
    if applications.is_empty() {
        return Err(ApiError::NotFound("No applications found"));
    }

    let views = assemble_application_views(store, applications)
        .await
        .map_err(ApiError::internal(context))?;
    Ok(HttpResponse::Ok().json(views))
}

#[get("/{id}")]
async fn read_application(store: Data<dyn RecordStore>, path: Path<String>) -> Result<HttpResponse, ApiError> {
    let store = store.get_ref();
    let context = "Error reading application";

    let id = RecordId::parse(&path.into_inner()).map_err(ApiError::internal(context))?;
    let Some(record) = ApplicationRepository::find_by_id(store, id)
        .await
        .map_err(ApiError::internal(context))?
    else {
        return Err(ApiError::NotFound(NOT_FOUND));
    };

    let view = assemble_application_view(store, Stored { id, record })
        .await
        .map_err(ApiError::internal(context))?;
    Ok(HttpResponse::Ok().json(view.without_id()))
}

/// Change only the status; every other field is kept
#[put("/{id}")]
async fn update_application_status(
    store: Data<dyn RecordStore>,
    path: Path<String>,
    body: Json<StatusUpdate>,
) -> Result<HttpResponse, ApiError> {
    let status = body
        .into_inner()
        .status
        .as_deref()
        .and_then(ApplicationStatus::parse)
        .ok_or(ApiError::InvalidStatus)?;

    let store = store.get_ref();
    let id = RecordId::parse(&path.into_inner())?;
    let mut application = ApplicationRepository::find_by_id(store, id)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    application.status = status;
    if ApplicationRepository::replace_by_id(store, id, &application).await? == 0 {
        return Err(ApiError::NotFound(NOT_FOUND));
    }

    info!("Application {} moved to {:?}", id, status);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Application status updated successfully")))
}

#[delete("/{id}")]
async fn delete_application(store: Data<dyn RecordStore>, path: Path<String>) -> Result<HttpResponse, ApiError> {
    let id = RecordId::parse(&path.into_inner())?;
    if ApplicationRepository::delete_by_id(store.get_ref(), id).await? == 0 {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    Ok(HttpResponse::Ok().json(MessageResponse::new("Application deleted successfully")))
}

pub fn application_config(config: &mut ServiceConfig) {
    config.service(
        scope("/applications")
            .service(list_applications)
            .service(read_application)
            .service(submit_application)
            .service(update_application_status)
            .service(delete_application),
    );
}
