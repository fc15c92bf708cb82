pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::job_posting_config;
