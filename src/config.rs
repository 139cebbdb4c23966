// config.rs
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: String,
    pub host: String,
    pub port: u16,
    pub archive: ArchiveConfig,
}

/// Where raw callback payloads get archived.
#[derive(Debug, Clone)]
pub enum ArchiveConfig {
    Local { root: String },
    Gcs { bucket: String, access_token: String },
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "payments".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .expect("PORT must be a number"),
            archive: ArchiveConfig::from_env(),
        }
    }
}

impl ArchiveConfig {
    fn from_env() -> Self {
        match env::var("ARCHIVE_BACKEND").as_deref() {
            Ok("gcs") => ArchiveConfig::Gcs {
                bucket: env::var("GCS_BUCKET")
                    .expect("GCS_BUCKET must be set for the gcs archive backend"),
                access_token: env::var("GCS_ACCESS_TOKEN")
                    .expect("GCS_ACCESS_TOKEN must be set for the gcs archive backend"),
            },
            _ => ArchiveConfig::Local {
                root: env::var("ARCHIVE_ROOT").unwrap_or_else(|_| "archive".to_string()),
            },
        }
    }
}
