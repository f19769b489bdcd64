/*
 * MEROBase - Coral Reef Microbiology Sample Catalogue
 * Copyright (c) 2024 MEROBase Project
 *
 * This work is licensed under CC BY-NC-SA 4.0
 * https://creativecommons.org/licenses/by-nc-sa/4.0/
 */

use merobase_backend::{
    config::Config,
    database::Database,
    draft::{DraftService, FileDraftStore},
    error::AppResult,
    file_processing::{FileProcessingConfig, FileProcessor},
    handlers::AppState,
    repositories::{MemorySampleStore, SampleRepository, SampleStore},
    routes::create_app,
    services::SampleService,
    storage::LocalStorage,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Connects, verifies and migrates the database. `None` keeps the server up
/// without the sample endpoints.
async fn open_sample_store(config: &Config) -> Option<Arc<dyn SampleStore>> {
    if config.database.in_memory {
        tracing::warn!("using the in-memory sample store, records are lost on exit");
        return Some(Arc::new(MemorySampleStore::new()));
    }

    let db = match Database::new(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            tracing::warn!("database connection failed, starting without samples: {}", e);
            return None;
        }
    };

    if let Err(e) = db.verify_connection().await {
        tracing::warn!("database verification failed: {}", e);
    }
    if let Err(e) = db.migrate().await {
        tracing::warn!("schema migration failed, starting without samples: {}", e);
        return None;
    }

    Some(Arc::new(SampleRepository::new(db)))
}

#[tokio::main]
async fn main() -> AppResult<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "merobase_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load_or_init("config.toml")?;

    tracing::info!("server address: {}", config.server_addr());

    let storage = Arc::new(LocalStorage::new(&config.storage).await?);
    let file_processor = FileProcessor::new(FileProcessingConfig {
        max_file_size: config.storage.max_size,
    });

    let samples = open_sample_store(&config)
        .await
        .map(|store| SampleService::new(store, storage.clone(), file_processor));

    let drafts = DraftService::new(Arc::new(FileDraftStore::new(&config.drafts.dir).await?));

    let app_state = AppState {
        samples,
        drafts,
        config: Arc::new(config.clone()),
    };

    let app = create_app(app_state);

    let listener = tokio::net::TcpListener::bind(&config.server_addr()).await?;
    tracing::info!("listening on {}", config.server_addr());

    axum::serve(listener, app).await?;

    Ok(())
}
