use actix_web::{
    HttpResponse, delete, get, post, put,
    web::{Data, Path, ServiceConfig, scope},
};
use actix_web_validator::Json;
use tracing::info;

use super::models::{HiringManager, HiringManagerRepository};
use crate::api::dto::MessageResponse;
use crate::api::error::ApiError;
use crate::db::{RecordId, RecordStore};

const NOT_FOUND: &str = "Hiring Manager not found";

#[get("")]
async fn list_hiring_managers(store: Data<dyn RecordStore>) -> Result<HttpResponse, ApiError> {
    let managers = HiringManagerRepository::find_all(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(managers))
}

#[get("/{id}")]
async fn read_hiring_manager(store: Data<dyn RecordStore>, path: Path<String>) -> Result<HttpResponse, ApiError> {
    let id = RecordId::parse(&path.into_inner())?;
    HiringManagerRepository::find_by_id(store.get_ref(), id)
        .await?
        .map(|manager| HttpResponse::Ok().json(manager))
        .ok_or(ApiError::NotFound(NOT_FOUND))
}

#[post("")]
async fn create_hiring_manager(
    store: Data<dyn RecordStore>,
    body: Json<HiringManager>,
) -> Result<HttpResponse, ApiError> {
    let id = HiringManagerRepository::insert(store.get_ref(), &body.into_inner()).await?;
    info!("Created hiring manager id={}", id);
    Ok(HttpResponse::Created().json(id))
}

#[put("/{id}")]
async fn update_hiring_manager(
    store: Data<dyn RecordStore>,
    path: Path<String>,
    body: Json<HiringManager>,
) -> Result<HttpResponse, ApiError> {
    let id = RecordId::parse(&path.into_inner())?;
    if HiringManagerRepository::replace_by_id(store.get_ref(), id, &body.into_inner()).await? == 0 {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    Ok(HttpResponse::Ok().json(MessageResponse::new("Hiring Manager updated successfully")))
}

/// Postings that reference the deleted manager keep the dangling id and
/// render `hiring_manager: null` afterwards.
#[delete("/{id}")]
async fn delete_hiring_manager(store: Data<dyn RecordStore>, path: Path<String>) -> Result<HttpResponse, ApiError> {
    let id = RecordId::parse(&path.into_inner())?;
    if HiringManagerRepository::delete_by_id(store.get_ref(), id).await? == 0 {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    info!("Deleted hiring manager id={}", id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Hiring Manager deleted successfully")))
}

pub fn hiring_manager_config(config: &mut ServiceConfig) {
    config.service(
        scope("/hiring-managers")
            .service(list_hiring_managers)
            .service(read_hiring_manager)
            .service(create_hiring_manager)
            .service(update_hiring_manager)
            .service(delete_hiring_manager),
    );
}
