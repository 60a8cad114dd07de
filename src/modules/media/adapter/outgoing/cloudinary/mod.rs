pub mod cloudinary_config;
pub mod image_host_cloudinary;

pub use cloudinary_config::{CloudinaryConfig, CloudinaryConfigError};
pub use image_host_cloudinary::CloudinaryImageHost;
