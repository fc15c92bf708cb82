pub mod handlers;
pub mod models;

pub use handlers::job_seeker_config;
