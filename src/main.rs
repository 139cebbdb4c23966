use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;

use mpesa_callback_api::build_router;
use mpesa_callback_api::config::{AppConfig, ArchiveConfig};
use mpesa_callback_api::database::connection::get_db_client;
use mpesa_callback_api::services::archive_store::{
    CallbackArchive, FsCallbackArchive, GcsCallbackArchive,
};
use mpesa_callback_api::services::payment_store::MongoPaymentStore;
use mpesa_callback_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env();

    let db = match get_db_client(&config).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("❌ Failed to connect to MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = initialize_app_state(db, &config).await;
    let app = build_router(app_state);
    start_server(app, &config).await;
}

async fn initialize_app_state(db: mongodb::Database, config: &AppConfig) -> AppState {
    let payments = Arc::new(MongoPaymentStore::new(db));

    let archive: Arc<dyn CallbackArchive> = match &config.archive {
        ArchiveConfig::Local { root } => {
            create_archive_root(root).await;
            tracing::info!("✅ Archiving callbacks under {}", root);
            Arc::new(FsCallbackArchive::new(root.clone()))
        }
        ArchiveConfig::Gcs {
            bucket,
            access_token,
        } => {
            tracing::info!("✅ Archiving callbacks to GCS bucket {}", bucket);
            Arc::new(GcsCallbackArchive::new(
                bucket.clone(),
                access_token.clone(),
            ))
        }
    };

    AppState::new(payments, archive)
}

async fn create_archive_root(root: &str) {
    if let Err(e) = tokio::fs::create_dir_all(root).await {
        tracing::warn!("Failed to create {}: {}", root, e);
    }
}

async fn start_server(app: Router, config: &AppConfig) {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("HOST and PORT must form a valid socket address");

    tracing::info!("🚀 Server starting on {}", addr);

    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Server error: {}", e);
            }
        }
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    }
}
