//! Archive backends for raw callback payloads.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use tracing::debug;

use crate::errors::{AppError, Result};

/// Blob store for verbatim callback payloads, keyed by the payment record id.
#[async_trait]
pub trait CallbackArchive: Send + Sync {
    async fn put(&self, key: &str, content: Bytes, content_type: &str) -> Result<()>;

    /// Backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;
}

/// Writes blobs under a local directory. Default backend.
pub struct FsCallbackArchive {
    root: PathBuf,
}

impl FsCallbackArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsCallbackArchive { root: root.into() }
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(key.trim_start_matches('/'))
    }
}

#[async_trait]
impl CallbackArchive for FsCallbackArchive {
    async fn put(&self, key: &str, content: Bytes, _content_type: &str) -> Result<()> {
        let path = self.blob_path(key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&path, &content).await?;
        debug!("PUT {} ({} bytes)", path.display(), content.len());

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}

/// Uploads blobs to a Google Cloud Storage bucket via the JSON media
/// endpoint.
pub struct GcsCallbackArchive {
    bucket: String,
    access_token: String,
    client: reqwest::Client,
}

impl GcsCallbackArchive {
    pub fn new(bucket: String, access_token: String) -> Self {
        GcsCallbackArchive {
            bucket,
            access_token,
            client: reqwest::Client::new(),
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "https://storage.googleapis.com/upload/storage/v1/b/{}/o",
            self.bucket
        )
    }
}

#[async_trait]
impl CallbackArchive for GcsCallbackArchive {
    async fn put(&self, key: &str, content: Bytes, content_type: &str) -> Result<()> {
        debug!("PUT gs://{}/{} ({} bytes)", self.bucket, key, content.len());

        let response = self
            .client
            .post(self.upload_url())
            .query(&[("uploadType", "media"), ("name", key)])
            .bearer_auth(&self.access_token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(content)
            .send()
            .await
            .map_err(|e| AppError::archive(format!("Upload failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::archive(format!("GCS API error: {}", error_text)));
        }

        let result: Value = response
            .json()
            .await
            .map_err(|e| AppError::archive(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = result.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown storage error");
            return Err(AppError::archive(error_msg.to_string()));
        }

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "gcs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_path_joins_under_root() {
        let archive = FsCallbackArchive::new("archive");

        assert_eq!(
            archive.blob_path("mpesa_callbacks/abc123.json"),
            PathBuf::from("archive/mpesa_callbacks/abc123.json")
        );
        assert_eq!(
            archive.blob_path("/mpesa_callbacks/abc123.json"),
            PathBuf::from("archive/mpesa_callbacks/abc123.json")
        );
    }

    #[test]
    fn gcs_upload_url_targets_the_bucket() {
        let archive = GcsCallbackArchive::new("callback-archive".to_string(), "tok".to_string());

        assert_eq!(
            archive.upload_url(),
            "https://storage.googleapis.com/upload/storage/v1/b/callback-archive/o"
        );
    }

    #[tokio::test]
    async fn fs_put_writes_the_blob() {
        let root = std::env::temp_dir().join("mpesa-archive-test");
        let archive = FsCallbackArchive::new(&root);

        let content = Bytes::from_static(b"{\"ok\":true}");
        archive
            .put("mpesa_callbacks/test.json", content.clone(), "application/json")
            .await
            .unwrap();

        let written = tokio::fs::read(root.join("mpesa_callbacks/test.json"))
            .await
            .unwrap();
        assert_eq!(written, content);

        tokio::fs::remove_dir_all(&root).await.ok();
    }
}
