use image::ImageFormat;
use serde::Serialize;
use tracing::warn;

use crate::models::SelectedFile;
use crate::utils::format::{format_file_size, truncate_display_name};

/// One tile of the preview grid.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewItem {
    pub index: usize,
    pub name: String,
    pub display_name: String,
    pub size_label: String,
    pub mime_type: String,
    /// PNG thumbnail, `None` when the image could not be decoded
    #[serde(skip)]
    pub thumbnail: Option<Vec<u8>>,
}

pub struct PreviewService {
    thumb_size: u32,
}

impl PreviewService {
    pub fn new(thumb_size: u32) -> Self {
        Self { thumb_size }
    }

    /// Decodes an image and encodes a bounded PNG thumbnail, keeping aspect ratio
    pub fn thumbnail(&self, data: &[u8]) -> Result<Vec<u8>, image::ImageError> {
        let img = image::load_from_memory(data)?;
        let thumb = img.thumbnail(self.thumb_size, self.thumb_size);

        let mut out = Vec::new();
        thumb.write_to(&mut std::io::Cursor::new(&mut out), ImageFormat::Png)?;
        Ok(out)
    }

    pub fn build(&self, index: usize, file: &SelectedFile) -> PreviewItem {
        let thumbnail = match self.thumbnail(&file.data) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("No preview for '{}': {}", file.name, e);
                None
            }
        };

        PreviewItem {
            index,
            name: file.name.clone(),
            display_name: truncate_display_name(&file.name),
            size_label: format_file_size(file.size),
            mime_type: file.mime_type.clone(),
            thumbnail,
        }
    }

    /// Regenerates the whole grid. Each item, thumbnail included, is handed to
    /// `render` and dropped right after, so nothing outlives the render pass.
    pub fn render_all<F>(&self, files: &[SelectedFile], mut render: F) -> usize
    where
        F: FnMut(&PreviewItem),
    {
        for (index, file) in files.iter().enumerate() {
            let item = self.build(index, file);
            render(&item);
        }
        files.len()
    }
}
