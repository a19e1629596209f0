use crate::classifier_client::interface::ClassifierClient;
use crate::classifier_page::core::{Effect, Msg};
use crate::file_picker::interface::FilePicker;
use crate::image_file::ImageFile;
use crate::library::logger::interface::Logger;
use crate::preview_store::interface::PreviewStore;
use std::path::Path;
use std::sync::mpsc::Sender;
use std::sync::Arc;

pub type Wake = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct RunEffect {
    logger: Arc<dyn Logger + Send + Sync>,
    classifier_client: Arc<dyn ClassifierClient + Send + Sync>,
    file_picker: Arc<dyn FilePicker + Send + Sync>,
    preview_store: Arc<dyn PreviewStore + Send + Sync>,
    wake: Wake,
}

impl RunEffect {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        classifier_client: Arc<dyn ClassifierClient + Send + Sync>,
        file_picker: Arc<dyn FilePicker + Send + Sync>,
        preview_store: Arc<dyn PreviewStore + Send + Sync>,
        wake: Wake,
    ) -> Self {
        Self {
            logger: logger.with_namespace("effect"),
            classifier_client,
            file_picker,
            preview_store,
            wake,
        }
    }

    pub fn run_effect(&self, effect: Effect, event_sender: Sender<Msg>) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::PickFile => match self.file_picker.pick_image() {
                Some(path) => self.read_file(&path, &event_sender),
                None => {
                    let _ = self.logger.info("File dialog cancelled");
                }
            },
            Effect::ReadFile { path } => self.read_file(&path, &event_sender),
            Effect::CreatePreview { preview_id, file } => {
                let result = self
                    .preview_store
                    .create(preview_id, &file)
                    .map_err(|e| e.to_string());
                if let Err(message) = &result {
                    let _ = self
                        .logger
                        .error(&format!("{} for {}: {}", preview_id, file.name(), message));
                }
                self.send(&event_sender, Msg::PreviewLoaded { preview_id, result });
            }
            Effect::ReleasePreview { preview_id } => {
                self.preview_store.release(preview_id);
                let _ = self.logger.info(&format!(
                    "Released {} ({} live)",
                    preview_id,
                    self.preview_store.len()
                ));
            }
            Effect::Classify { request_id, file } => {
                let result = self.classifier_client.classify(&file);
                if let Err(e) = &result {
                    let _ = self.logger.error(&format!("Classification failed: {}", e));
                }
                self.send(&event_sender, Msg::ClassifyDone { request_id, result });
            }
        }
    }

    fn read_file(&self, path: &Path, event_sender: &Sender<Msg>) {
        match ImageFile::read(path) {
            Ok(file) => self.send(event_sender, Msg::FileSelected(file)),
            Err(e) => {
                let _ = self
                    .logger
                    .error(&format!("Could not read {}: {}", path.display(), e));
            }
        }
    }

    fn send(&self, event_sender: &Sender<Msg>, msg: Msg) {
        if event_sender.send(msg).is_ok() {
            (self.wake)();
        }
    }
}
