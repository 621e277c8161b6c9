//! Dish image storage
//!
//! Images live in a private S3 bucket. Uploads are validated,
//! re-encoded to JPEG and content-addressed by SHA-256, so the same
//! picture always lands on the same key. Stored references are either
//! absolute URLs (passed through) or object keys (resolved to
//! presigned URLs for display, with a proxy-route fallback).

use std::io::Cursor;
use std::time::Duration;

use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::presigning::PresigningConfig;
use image::codecs::jpeg::JpegEncoder;
use sha2::{Digest, Sha256};

use shared::error::AppError;

use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Maximum upload size (5MB)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// JPEG quality for re-encoded uploads
const JPEG_QUALITY: u8 = 85;

/// Presigned GET URL lifetime
const PRESIGN_EXPIRY_SECS: u64 = 3600;

/// Key prefix for dish images
const KEY_PREFIX: &str = "dishes";

fn object_key(hash: &str) -> String {
    format!("{KEY_PREFIX}/{hash}.jpg")
}

/// Reject empty keys and path traversal before touching the bucket
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.contains("..") && !key.starts_with('/')
}

fn content_type_for(key: &str) -> &'static str {
    let ext = key.rsplit('.').next().unwrap_or_default();
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// S3-backed image store
#[derive(Clone)]
pub struct ImageStore {
    client: S3Client,
    bucket: Option<String>,
    public_base_url: Option<String>,
}

impl ImageStore {
    pub async fn new(config: &Config) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: S3Client::new(&aws_config),
            bucket: config.s3_bucket.clone(),
            public_base_url: config.public_base_url.clone(),
        }
    }

    /// Validate, re-encode and upload an image. Returns the object key
    /// for storing in the database.
    pub async fn store(&self, data: &[u8]) -> Result<String, AppError> {
        let Some(bucket) = &self.bucket else {
            return Err(AppError::unavailable("Upload not configured; set S3_BUCKET"));
        };

        // Load and validate image content
        let img = image::load_from_memory(data)
            .map_err(|e| AppError::validation(format!("Invalid image: {e}")))?;

        // Compress to JPEG
        let mut buffer = Vec::new();
        {
            let mut cursor = Cursor::new(&mut buffer);
            let rgb_img = img.to_rgb8();
            let encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
            rgb_img
                .write_with_encoder(encoder)
                .map_err(|e| AppError::internal(format!("Image compression failed: {e}")))?;
        }

        // SHA256 hash — same content, same key
        let mut hasher = Sha256::new();
        hasher.update(&buffer);
        let hash = hex::encode(hasher.finalize());
        let key = object_key(&hash);

        self.client
            .put_object()
            .bucket(bucket)
            .key(&key)
            .body(buffer.into())
            .content_type("image/jpeg")
            .cache_control("public, max-age=31536000")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "S3 upload failed");
                AppError::internal("Image upload failed")
            })?;

        tracing::info!(key = %key, "Dish image uploaded");
        Ok(key)
    }

    /// Generate a presigned GET URL for an object
    async fn presigned_url(&self, key: &str) -> Result<String, BoxError> {
        let Some(bucket) = &self.bucket else {
            return Err("object storage not configured".into());
        };
        let presigning = PresigningConfig::expires_in(Duration::from_secs(PRESIGN_EXPIRY_SECS))?;
        let presigned = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning)
            .await?;
        Ok(presigned.uri().to_string())
    }

    /// Resolve a stored image reference to a displayable URL.
    ///
    /// Absolute URLs pass through; object keys resolve to presigned
    /// URLs, falling back to the proxy route when presigning is not
    /// available. Failures resolve to `None`, never an error.
    pub async fn resolve(&self, image: &str) -> Option<String> {
        if image.is_empty() {
            return None;
        }
        if image.starts_with("http://") || image.starts_with("https://") {
            return Some(image.to_string());
        }
        if self.bucket.is_none() {
            return self.proxy_url(image);
        }
        match self.presigned_url(image).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(key = %image, error = %e, "Presigned URL failed, using proxy fallback");
                self.proxy_url(image)
            }
        }
    }

    fn proxy_url(&self, key: &str) -> Option<String> {
        self.public_base_url
            .as_ref()
            .map(|base| format!("{base}/api/image/{key}"))
    }

    /// Fetch an object's bytes for the proxy route
    pub async fn fetch(&self, key: &str) -> Result<(Vec<u8>, &'static str), AppError> {
        let Some(bucket) = &self.bucket else {
            return Err(AppError::unavailable("Object storage not configured"));
        };

        match self.client.get_object().bucket(bucket).key(key).send().await {
            Ok(output) => {
                let bytes = output.body.collect().await.map_err(|e| {
                    tracing::error!(key = %key, error = %e, "Failed to read object body");
                    AppError::internal("Image fetch failed")
                })?;
                Ok((bytes.into_bytes().to_vec(), content_type_for(key)))
            }
            Err(e) => {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    return Err(AppError::not_found("Image"));
                }
                tracing::error!(key = %key, error = %e, "S3 fetch failed");
                Err(AppError::internal("Image fetch failed"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_keys_are_content_addressed_jpegs() {
        assert_eq!(object_key("abc123"), "dishes/abc123.jpg");
    }

    #[test]
    fn key_validation_rejects_traversal() {
        assert!(is_valid_key("dishes/abc.jpg"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("../secrets"));
        assert!(!is_valid_key("dishes/../../etc/passwd"));
        assert!(!is_valid_key("/absolute"));
    }

    #[test]
    fn content_types_follow_extension() {
        assert_eq!(content_type_for("dishes/a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("dishes/a.webp"), "image/webp");
        assert_eq!(content_type_for("dishes/a.bin"), "application/octet-stream");
    }
}
