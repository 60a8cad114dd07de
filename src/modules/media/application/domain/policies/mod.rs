pub mod upload_policy;

pub use upload_policy::{ImageUploadError, UploadPolicy};
