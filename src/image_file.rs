use image::ImageFormat;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// A file picked or dropped by the user, held in memory.
#[derive(Clone, PartialEq)]
pub struct ImageFile {
    name: String,
    media_type: String,
    bytes: Arc<[u8]>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Arc<[u8]>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Builds a file from a drop event, trusting the platform's media type
    /// when it reports one.
    pub fn from_dropped(name: &str, media_type: &str, bytes: Arc<[u8]>) -> Self {
        let media_type = if media_type.is_empty() {
            media_type_from_name(name)
        } else {
            media_type.to_string()
        };
        Self::new(name, media_type, bytes)
    }

    pub fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let media_type = media_type_from_name(&name);

        Ok(Self::new(name, media_type, bytes.into()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

pub fn media_type_from_name(name: &str) -> String {
    ImageFormat::from_path(name)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| UNKNOWN_MEDIA_TYPE.to_string())
}

/// Extensions offered by the browse dialog.
pub fn image_extensions() -> Vec<&'static str> {
    [
        ImageFormat::Png,
        ImageFormat::Jpeg,
        ImageFormat::Gif,
        ImageFormat::WebP,
        ImageFormat::Bmp,
        ImageFormat::Tiff,
    ]
    .iter()
    .flat_map(|format| format.extensions_str().iter().copied())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_extension() {
        assert_eq!(media_type_from_name("street.jpg"), "image/jpeg");
        assert_eq!(media_type_from_name("STREET.PNG"), "image/png");
        assert_eq!(media_type_from_name("notes.txt"), UNKNOWN_MEDIA_TYPE);
        assert_eq!(media_type_from_name("no_extension"), UNKNOWN_MEDIA_TYPE);
    }

    #[test]
    fn test_dropped_file_prefers_reported_media_type() {
        let file = ImageFile::from_dropped("photo.bin", "image/webp", Arc::from(vec![1u8]));
        assert_eq!(file.media_type(), "image/webp");
        assert!(file.is_image());

        let file = ImageFile::from_dropped("photo.gif", "", Arc::from(vec![1u8]));
        assert_eq!(file.media_type(), "image/gif");
    }

    #[test]
    fn test_non_image_is_rejected() {
        let file = ImageFile::new("report.pdf", "application/pdf", Arc::from(vec![1u8]));
        assert!(!file.is_image());
    }

    #[test]
    fn test_debug_does_not_print_bytes() {
        let file = ImageFile::new("a.png", "image/png", Arc::from(vec![7u8; 4096]));
        let debug = format!("{:?}", file);
        assert!(debug.contains("len: 4096"));
        assert!(!debug.contains("7, 7"));
    }

    #[test]
    fn test_browse_filter_contains_common_extensions() {
        let extensions = image_extensions();
        assert!(extensions.contains(&"png"));
        assert!(extensions.contains(&"jpg"));
        assert!(extensions.contains(&"jpeg"));
    }
}
