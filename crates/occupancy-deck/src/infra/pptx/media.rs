//! Loading embedded images.

use std::fs;
use std::io::Cursor;

use anyhow::{Context, Result, anyhow};
use image::ImageReader;

use crate::domain::model::Asset;

/// An image ready to be stored under `ppt/media/`.
#[derive(Debug, Clone)]
pub struct MediaPart {
    pub file_name: String,
    pub extension: &'static str,
    pub content_type: &'static str,
    pub width_px: u32,
    pub height_px: u32,
    pub data: Vec<u8>,
}

/// Read the asset's bytes and probe format and pixel size from its header.
pub fn load_media(asset: &Asset, index: usize) -> Result<MediaPart> {
    let path = asset.path();
    let data = fs::read(path)
        .with_context(|| format!("failed to read image asset {}", path.display()))?;

    let reader = ImageReader::new(Cursor::new(data.as_slice()))
        .with_guessed_format()
        .with_context(|| format!("failed to inspect image asset {}", path.display()))?;
    let format = reader
        .format()
        .ok_or_else(|| anyhow!("unrecognized image format: {}", path.display()))?;
    let (width_px, height_px) = reader
        .into_dimensions()
        .with_context(|| format!("failed to read image dimensions of {}", path.display()))?;

    let extension = format.extensions_str().first().copied().unwrap_or("bin");

    Ok(MediaPart {
        file_name: format!("image{}.{extension}", index + 1),
        extension,
        content_type: format.to_mime_type(),
        width_px,
        height_px,
        data,
    })
}
