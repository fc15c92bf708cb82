pub mod handlers;
pub mod models;

pub use handlers::hiring_manager_config;
