use std::path::PathBuf;

pub trait FilePicker: Send + Sync {
    /// Blocks until the user picks an image or cancels (`None`).
    fn pick_image(&self) -> Option<PathBuf>;
}
