use crate::image_file::ImageFile;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PreviewId(pub u64);

impl fmt::Display for PreviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview-{}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("no se pudo decodificar la imagen: {0}")]
    Decode(#[from] image::ImageError),
}

/// Holds the decoded previews the page can show, one per `PreviewId`.
pub trait PreviewStore: Send + Sync {
    fn create(&self, preview_id: PreviewId, file: &ImageFile) -> Result<(), PreviewError>;

    /// Releasing an unknown id is a no-op.
    fn release(&self, preview_id: PreviewId);

    fn len(&self) -> usize;
}
