use std::env;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CloudinaryConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl CloudinaryConfig {
    /// Reads `CLOUD_NAME`, `CLOUD_API` and `API_SECRET`.
    pub fn from_env() -> Result<Self, CloudinaryConfigError> {
        Ok(Self {
            cloud_name: required("CLOUD_NAME")?,
            api_key: required("CLOUD_API")?,
            api_secret: required("API_SECRET")?,
        })
    }

    pub fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        )
    }
}

fn required(key: &'static str) -> Result<String, CloudinaryConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(CloudinaryConfigError::Missing(key))
}
