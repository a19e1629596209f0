use crate::file_picker::interface::FilePicker;
use std::path::PathBuf;

pub struct FilePickerFake {
    picked: Option<PathBuf>,
}

impl FilePickerFake {
    pub fn new(picked: Option<PathBuf>) -> Self {
        Self { picked }
    }
}

impl FilePicker for FilePickerFake {
    fn pick_image(&self) -> Option<PathBuf> {
        self.picked.clone()
    }
}
