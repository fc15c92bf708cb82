pub mod handlers;
pub mod models;

pub use handlers::application_config;
