use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;

use super::cloudinary_config::CloudinaryConfig;
use crate::media::application::domain::entities::{ImageTransform, ImageUpload};
use crate::media::application::ports::outgoing::image_host::{ImageHost, ImageHostError};

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    error: Option<UploadErrorBody>,
}

#[derive(Debug, Deserialize)]
struct UploadErrorBody {
    message: String,
}

/// Internal seam so the adapter can be tested without a network.
#[async_trait]
trait UploadClient: Send + Sync {
    /// Posts a url-encoded form and returns status code and raw body.
    async fn post_form(
        &self,
        url: &str,
        form: &[(&'static str, String)],
    ) -> Result<(u16, String), String>;
}

struct ReqwestUploadClient {
    http: reqwest::Client,
}

#[async_trait]
impl UploadClient for ReqwestUploadClient {
    async fn post_form(
        &self,
        url: &str,
        form: &[(&'static str, String)],
    ) -> Result<(u16, String), String> {
        let response = self
            .http
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| e.to_string())?;
        Ok((status, body))
    }
}

#[derive(Clone)]
pub struct CloudinaryImageHost {
    config: CloudinaryConfig,
    client: Arc<dyn UploadClient>,
}

impl CloudinaryImageHost {
    pub fn new(config: CloudinaryConfig) -> Result<Self, ImageHostError> {
        let http = reqwest::Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .map_err(|e| ImageHostError::UploadFailed(e.to_string()))?;

        Ok(Self {
            config,
            client: Arc::new(ReqwestUploadClient { http }),
        })
    }

    #[cfg(test)]
    fn with_client(config: CloudinaryConfig, client: Arc<dyn UploadClient>) -> Self {
        Self { config, client }
    }

    fn signed_form(
        &self,
        image: &ImageUpload,
        transform: Option<ImageTransform>,
        timestamp: i64,
    ) -> Vec<(&'static str, String)> {
        // Signed parameters, alphabetical.
        let mut signed: Vec<(&'static str, String)> = vec![("timestamp", timestamp.to_string())];
        if let Some(t) = transform {
            signed.push(("transformation", transformation_string(&t)));
        }

        let signature = sign(&signed, &self.config.api_secret);

        let mut form = signed;
        form.push(("file", image.to_data_uri()));
        form.push(("api_key", self.config.api_key.clone()));
        form.push(("signature_algorithm", "sha256".to_string()));
        form.push(("signature", signature));
        form
    }
}

fn transformation_string(t: &ImageTransform) -> String {
    format!("w_{},h_{},c_{}", t.width, t.height, t.crop.as_str())
}

fn sign(params: &[(&'static str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let digest = Sha256::digest(format!("{}{}", to_sign, api_secret).as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[async_trait]
impl ImageHost for CloudinaryImageHost {
    async fn upload(
        &self,
        image: ImageUpload,
        transform: Option<ImageTransform>,
    ) -> Result<String, ImageHostError> {
        let form = self.signed_form(&image, transform, chrono::Utc::now().timestamp());

        let (status, body) = self
            .client
            .post_form(&self.config.upload_url(), &form)
            .await
            .map_err(|e| {
                tracing::error!(file = %image.file_name(), error = %e, "Image upload request failed");
                ImageHostError::UploadFailed(e)
            })?;

        let parsed: UploadResponse = serde_json::from_str(&body)
            .map_err(|e| ImageHostError::InvalidResponse(e.to_string()))?;

        if !(200..300).contains(&status) {
            let message = parsed
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| format!("status {}", status));
            tracing::error!(status, message = %message, "Image host rejected upload");
            return Err(ImageHostError::UploadFailed(message));
        }

        let url = parsed
            .secure_url
            .ok_or_else(|| ImageHostError::InvalidResponse("missing secure_url".to_string()))?;

        tracing::info!(file = %image.file_name(), url = %url, "Image uploaded");
        Ok(url)
    }
}
