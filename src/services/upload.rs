//! Event image upload to the public object-storage bucket.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Uploads the file and returns its public URL.
    async fn upload(&self, path: &Path) -> AppResult<String>;
}

pub struct ObjectStorageUploader {
    http: reqwest::Client,
    storage_url: String,
    bucket: String,
    anon_key: String,
    timeout: Duration,
}

impl ObjectStorageUploader {
    pub fn new(
        storage_url: impl Into<String>,
        bucket: impl Into<String>,
        anon_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            storage_url: storage_url.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
            anon_key: anon_key.into(),
            timeout,
        }
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        if cfg.storage_url.trim().is_empty() || cfg.storage_anon_key.trim().is_empty() {
            return Err(AppError::Config(
                "storage_url and storage_anon_key must be set to upload images".into(),
            ));
        }
        Ok(Self::new(
            cfg.storage_url.clone(),
            cfg.storage_bucket.clone(),
            cfg.storage_anon_key.clone(),
            Duration::from_secs(cfg.request_timeout_secs.max(1)),
        ))
    }

    pub fn public_url(&self, object: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.storage_url, self.bucket, object
        )
    }

    fn upload_url(&self, object: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.storage_url, self.bucket, object)
    }
}

/// `events/<millis>-<sanitized file name>`
pub fn object_name(path: &Path, millis: i64) -> String {
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());

    let clean: String = file
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();

    format!("events/{millis}-{clean}")
}

pub fn content_type_for(path: &Path) -> mime::Mime {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => mime::IMAGE_PNG,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "gif" => mime::IMAGE_GIF,
        "svg" => mime::IMAGE_SVG,
        "webp" => "image/webp"
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

#[async_trait]
impl ImageUploader for ObjectStorageUploader {
    async fn upload(&self, path: &Path) -> AppResult<String> {
        let bytes = tokio::fs::read(path).await?;
        let object = object_name(path, Utc::now().timestamp_millis());
        debug!(file = %path.display(), object = %object, size = bytes.len(), "uploading image");

        let response = self
            .http
            .post(self.upload_url(&object))
            .timeout(self.timeout)
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
            .header(CONTENT_TYPE, content_type_for(path).to_string())
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::Upload(format!("{status}: {}", detail.trim())));
        }

        let url = self.public_url(&object);
        info!(url = %url, "image uploaded");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn object_names_are_sanitized() {
        let p = PathBuf::from("/tmp/Foto Evento#1.PNG");
        assert_eq!(object_name(&p, 42), "events/42-foto-evento-1.png");
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for(Path::new("a.JPG")), mime::IMAGE_JPEG);
        assert_eq!(content_type_for(Path::new("a.webp")).essence_str(), "image/webp");
        assert_eq!(
            content_type_for(Path::new("a.bin")),
            mime::APPLICATION_OCTET_STREAM
        );
    }

    #[test]
    fn public_url_layout() {
        let up = ObjectStorageUploader::new(
            "https://store.example/",
            "event-images",
            "anon",
            Duration::from_secs(5),
        );
        assert_eq!(
            up.public_url("events/1-a.png"),
            "https://store.example/storage/v1/object/public/event-images/events/1-a.png"
        );
    }
}
