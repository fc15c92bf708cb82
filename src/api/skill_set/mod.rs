pub mod handlers;
pub mod models;

pub use handlers::skill_set_config;
