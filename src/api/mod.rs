use actix_web::web::ServiceConfig;

pub mod application;
pub mod dto;
pub mod error;
pub mod health;
pub mod hiring_manager;
pub mod index;
pub mod job_posting;
pub mod job_seeker;
pub mod skill_set;
pub mod validation;
pub mod views;

#[cfg(test)]
mod tests;

/// Register every route of the service
pub fn routes(config: &mut ServiceConfig) {
    index::index_config(config);
    health::health_config(config);
    job_seeker::job_seeker_config(config);
    job_posting::job_posting_config(config);
    skill_set::skill_set_config(config);
    application::application_config(config);
    hiring_manager::hiring_manager_config(config);
}
