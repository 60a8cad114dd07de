use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer};

use super::policies::{ImageUploadError, UploadPolicy};

/// A validated image ready to be sent to the image host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    extension: String,
    bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Result<Self, ImageUploadError> {
        Self::with_policy(file_name, bytes, &UploadPolicy::default())
    }

    pub fn with_policy(
        file_name: &str,
        bytes: Vec<u8>,
        policy: &UploadPolicy,
    ) -> Result<Self, ImageUploadError> {
        let extension = policy.accepted_extension(file_name)?;
        policy.check_size(bytes.len())?;

        Ok(Self {
            file_name: file_name.trim().to_string(),
            extension,
            bytes,
        })
    }

    /// Accepts plain base64 or a `data:<mime>;base64,<payload>` URI.
    pub fn from_base64(file_name: &str, data: &str) -> Result<Self, ImageUploadError> {
        // Check the name first so a wrong file type is reported as such.
        UploadPolicy::default().accepted_extension(file_name)?;

        let payload = match data.split_once(";base64,") {
            Some((prefix, rest)) if prefix.starts_with("data:") => rest,
            _ => data,
        };
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|_| ImageUploadError::InvalidEncoding)?;

        Self::new(file_name, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        match self.extension.as_str() {
            "png" => "image/png",
            "gif" => "image/gif",
            _ => "image/jpeg",
        }
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(&self.bytes))
    }
}

/// Incoming JSON shape `{ "file_name": "...", "data": "<base64>" }`, validated
/// while deserializing.
impl<'de> Deserialize<'de> for ImageUpload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ImageUploadHelper {
            file_name: String,
            data: String,
        }

        let helper = ImageUploadHelper::deserialize(deserializer)?;
        ImageUpload::from_base64(&helper.file_name, &helper.data).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crop {
    Fill,
    Fit,
    Scale,
}

impl Crop {
    pub fn as_str(&self) -> &'static str {
        match self {
            Crop::Fill => "fill",
            Crop::Fit => "fit",
            Crop::Scale => "scale",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageTransform {
    pub width: u32,
    pub height: u32,
    pub crop: Crop,
}

impl ImageTransform {
    /// Square thumbnail used for avatars.
    pub fn avatar() -> Self {
        Self {
            width: 200,
            height: 200,
            crop: Crop::Fill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn decodes_plain_base64_and_data_uri() {
        let encoded = STANDARD.encode(PNG_BYTES);

        let plain = ImageUpload::from_base64("pic.png", &encoded).unwrap();
        let uri = ImageUpload::from_base64("pic.png", &format!("data:image/png;base64,{encoded}"))
            .unwrap();

        assert_eq!(plain.bytes(), PNG_BYTES);
        assert_eq!(plain, uri);
        assert_eq!(plain.mime_type(), "image/png");
    }

    #[test]
    fn wrong_extension_is_reported_before_decoding() {
        let result = ImageUpload::from_base64("doc.pdf", "%%%not base64%%%");
        assert_eq!(result, Err(ImageUploadError::InvalidFormat));
    }

    #[test]
    fn bad_base64_is_rejected() {
        let result = ImageUpload::from_base64("pic.jpg", "%%%not base64%%%");
        assert_eq!(result, Err(ImageUploadError::InvalidEncoding));
    }

    #[test]
    fn data_uri_round_trips_content() {
        let upload = ImageUpload::new("pic.JPEG", PNG_BYTES.to_vec()).unwrap();
        assert_eq!(upload.extension(), "jpeg");
        assert!(upload.to_data_uri().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn deserializes_with_validation() {
        let ok: ImageUpload = serde_json::from_value(json!({
            "file_name": "cover.gif",
            "data": STANDARD.encode(PNG_BYTES),
        }))
        .unwrap();
        assert_eq!(ok.file_name(), "cover.gif");

        let err = serde_json::from_value::<ImageUpload>(json!({
            "file_name": "cover.txt",
            "data": STANDARD.encode(PNG_BYTES),
        }))
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("Invalid file format. Please upload an image."));
    }

    #[test]
    fn avatar_transform_is_square_fill() {
        let t = ImageTransform::avatar();
        assert_eq!((t.width, t.height, t.crop), (200, 200, Crop::Fill));
    }
}
