use actix_web::{HttpResponse, Responder, get, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use crate::db::RecordStore;

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    store: &'static str,
    checked_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl HealthResponse {
    fn new(status: &'static str, store: &'static str, error: Option<String>) -> Self {
        Self {
            status,
            store,
            checked_at: Utc::now(),
            error,
        }
    }
}

/// Health check endpoint
///
/// General health check including store connectivity.
/// Use for load balancers and uptime monitors.
#[get("/health")]
async fn health_check(store: web::Data<dyn RecordStore>) -> impl Responder {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse::new("healthy", "connected", None)),
        Err(e) => {
            error!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse::new(
                "unhealthy",
                "disconnected",
                Some(format!("Store error: {}", e)),
            ))
        }
    }
}

/// Readiness check endpoint
///
/// Returns 503 while the store is unreachable; recovers when it returns.
#[get("/ready")]
async fn readiness_check(store: web::Data<dyn RecordStore>) -> impl Responder {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse::new("ready", "connected", None)),
        Err(e) => {
            error!("Readiness check failed: store unavailable: {}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse::new(
                "not_ready",
                "disconnected",
                Some(format!("Store unavailable: {}", e)),
            ))
        }
    }
}

/// Liveness check endpoint. Does not check dependencies.
#[get("/live")]
async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::new("alive", "not_checked", None))
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config
        .service(health_check)
        .service(readiness_check)
        .service(liveness_check);
}
