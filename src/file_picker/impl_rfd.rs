use crate::file_picker::interface::FilePicker;
use crate::image_file::image_extensions;
use std::path::PathBuf;

/// Native open dialog limited to image extensions.
pub struct FilePickerRfd {
    title: String,
}

impl FilePickerRfd {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl FilePicker for FilePickerRfd {
    fn pick_image(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title(&self.title)
            .add_filter("Imagen", image_extensions().as_slice())
            .pick_file()
    }
}
