use crate::image_file::ImageFile;
use crate::preview_store::interface::{PreviewError, PreviewId, PreviewStore};
use eframe::egui;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Keeps one GPU texture per preview. Dropping a handle frees the texture.
pub struct PreviewStoreEgui {
    ctx: egui::Context,
    textures: Mutex<HashMap<PreviewId, egui::TextureHandle>>,
}

impl PreviewStoreEgui {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            textures: Mutex::new(HashMap::new()),
        }
    }

    pub fn texture(&self, preview_id: PreviewId) -> Option<egui::TextureHandle> {
        self.textures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&preview_id)
            .cloned()
    }

    pub fn clear(&self) {
        self.textures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

pub fn decode(file: &ImageFile) -> Result<egui::ColorImage, PreviewError> {
    let rgba = image::load_from_memory(file.bytes())?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        rgba.as_raw(),
    ))
}

impl PreviewStore for PreviewStoreEgui {
    fn create(&self, preview_id: PreviewId, file: &ImageFile) -> Result<(), PreviewError> {
        let color_image = decode(file)?;
        let texture = self.ctx.load_texture(
            preview_id.to_string(),
            color_image,
            egui::TextureOptions::LINEAR,
        );

        self.textures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(preview_id, texture);
        self.ctx.request_repaint();

        Ok(())
    }

    fn release(&self, preview_id: PreviewId) {
        self.textures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&preview_id);
    }

    fn len(&self) -> usize {
        self.textures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    fn png(width: u32, height: u32) -> ImageFile {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        ImageFile::new("tiny.png", "image/png", Arc::from(bytes))
    }

    #[test]
    fn test_decode_keeps_dimensions() {
        let color_image = decode(&png(3, 2)).unwrap();

        assert_eq!(color_image.size, [3, 2]);
        assert_eq!(color_image.pixels[0], egui::Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn test_create_and_release() {
        let store = PreviewStoreEgui::new(egui::Context::default());

        store.create(PreviewId(1), &png(2, 2)).unwrap();
        store.create(PreviewId(2), &png(2, 2)).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.texture(PreviewId(1)).is_some());

        store.release(PreviewId(1));
        assert_eq!(store.len(), 1);
        assert!(store.texture(PreviewId(1)).is_none());

        store.release(PreviewId(42));
        store.clear();
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let store = PreviewStoreEgui::new(egui::Context::default());
        let file = ImageFile::new("broken.png", "image/png", Arc::from(b"nope".to_vec()));

        assert!(matches!(
            store.create(PreviewId(1), &file),
            Err(PreviewError::Decode(_))
        ));
        assert_eq!(store.len(), 0);
    }
}
