use std::fmt;

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size_bytes: usize,
    pub max_file_name_len: usize,
    pub allowed_extensions: &'static [&'static str],
}

impl UploadPolicy {
    pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 5 * 1024 * 1024;
    pub const DEFAULT_ALLOWED_EXTENSIONS: &'static [&'static str] = &["jpg", "jpeg", "png", "gif"];

    /// Lower-cased extension of `file_name` when it is an accepted image type.
    pub fn accepted_extension(&self, file_name: &str) -> Result<String, ImageUploadError> {
        let file_name = file_name.trim();
        if file_name.is_empty() || file_name.len() > self.max_file_name_len {
            return Err(ImageUploadError::InvalidFormat);
        }

        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .ok_or(ImageUploadError::InvalidFormat)?;

        if self.allowed_extensions.contains(&extension.as_str()) {
            Ok(extension)
        } else {
            Err(ImageUploadError::InvalidFormat)
        }
    }

    pub fn check_size(&self, size: usize) -> Result<(), ImageUploadError> {
        if size == 0 {
            return Err(ImageUploadError::Empty);
        }
        if size > self.max_file_size_bytes {
            return Err(ImageUploadError::TooLarge {
                max_bytes: self.max_file_size_bytes,
            });
        }
        Ok(())
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: Self::DEFAULT_MAX_FILE_SIZE_BYTES,
            max_file_name_len: 255,
            allowed_extensions: Self::DEFAULT_ALLOWED_EXTENSIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageUploadError {
    InvalidFormat,
    InvalidEncoding,
    Empty,
    TooLarge { max_bytes: usize },
}

impl fmt::Display for ImageUploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageUploadError::InvalidFormat => {
                write!(f, "Invalid file format. Please upload an image.")
            }
            ImageUploadError::InvalidEncoding => write!(f, "Image data must be base64 encoded"),
            ImageUploadError::Empty => write!(f, "Image file is empty"),
            ImageUploadError::TooLarge { max_bytes } => {
                write!(f, "Image exceeds the maximum size of {} bytes", max_bytes)
            }
        }
    }
}

impl std::error::Error for ImageUploadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_image_extensions_case_insensitively() {
        let policy = UploadPolicy::default();

        assert_eq!(policy.accepted_extension("photo.JPG").unwrap(), "jpg");
        assert_eq!(policy.accepted_extension("a.b.jpeg").unwrap(), "jpeg");
        assert_eq!(policy.accepted_extension("x.png").unwrap(), "png");
        assert_eq!(policy.accepted_extension("anim.Gif").unwrap(), "gif");
    }

    #[test]
    fn rejects_other_files() {
        let policy = UploadPolicy::default();

        for name in ["notes.txt", "archive.tar.gz", "noextension", "", "image.webp"] {
            assert_eq!(
                policy.accepted_extension(name),
                Err(ImageUploadError::InvalidFormat),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn size_limits() {
        let policy = UploadPolicy::default();

        assert_eq!(policy.check_size(0), Err(ImageUploadError::Empty));
        assert!(policy.check_size(1).is_ok());
        assert!(policy.check_size(UploadPolicy::DEFAULT_MAX_FILE_SIZE_BYTES).is_ok());
        assert!(matches!(
            policy.check_size(UploadPolicy::DEFAULT_MAX_FILE_SIZE_BYTES + 1),
            Err(ImageUploadError::TooLarge { .. })
        ));
    }

    #[test]
    fn invalid_format_message() {
        assert_eq!(
            ImageUploadError::InvalidFormat.to_string(),
            "Invalid file format. Please upload an image."
        );
    }
}
