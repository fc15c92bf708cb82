use actix_web::{App, HttpServer, middleware::Logger, web};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

mod api;
mod cli;
mod config;
mod db;
mod logging;
mod shutdown;

use crate::api::validation;
use crate::cli::{Cli, Command};
use crate::db::{InMemoryRecordStore, PgRecordStore, RecordStore};
use crate::shutdown::ShutdownCoordinator;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    cli.check().map_err(std::io::Error::other)?;

    // Load configuration from environment
    let config = config::Config::from_env().map_err(std::io::Error::other)?;

    logging::init(&config.log_dir)?;

    info!("Starting job-matcher application");
    info!("Configuration loaded successfully:");
    info!("  - Listen address: {}:{}", config.host, config.port);
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Max database connections: {}", config.max_db_connections);

    let store: Arc<dyn RecordStore> = if cli.in_memory {
        info!("Using in-memory record store; records are lost on exit");
        Arc::new(InMemoryRecordStore::new())
    } else {
        let database_url = config.require_database_url().map_err(std::io::Error::other)?;
        let store = PgRecordStore::connect(database_url, config.max_db_connections)
            .await
            .map_err(std::io::Error::other)?;

        // Auto-migrate when starting the server
        store.migrate().await.map_err(std::io::Error::other)?;
        Arc::new(store)
    };

    if cli.command() == Command::Migrate {
        store.close().await;
        return Ok(());
    }

    let server_store = store.clone();
    let max_payload_size = config.max_payload_size;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::from(server_store.clone()))
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .app_data(validation::json_config().limit(max_payload_size))
            .configure(api::routes)
    });

    info!("Server starting on http://{}:{}", config.host, config.port);

    let server = server
        .bind((config.host.as_str(), config.port))?
        .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, store)
        .wait_for_shutdown()
        .await
}
