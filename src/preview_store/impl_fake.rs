use crate::image_file::ImageFile;
use crate::preview_store::interface::{PreviewError, PreviewId, PreviewStore};
use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

/// Tracks live ids without decoding anything.
#[derive(Default)]
pub struct PreviewStoreFake {
    live: Mutex<BTreeSet<PreviewId>>,
}

impl PreviewStoreFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> Vec<PreviewId> {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }
}

impl PreviewStore for PreviewStoreFake {
    fn create(&self, preview_id: PreviewId, _file: &ImageFile) -> Result<(), PreviewError> {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(preview_id);
        Ok(())
    }

    fn release(&self, preview_id: PreviewId) {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&preview_id);
    }

    fn len(&self) -> usize {
        self.live.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
