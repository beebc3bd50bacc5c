use std::path::Path;

use anyhow::Context;

use crate::assets::layer::LayerBuffer;
use crate::foundation::core::TileImage;
use crate::foundation::error::JigsawResult;

/// Decode an encoded image (PNG, JPEG, ...) into straight-alpha RGBA8.
///
/// Grayscale and RGB inputs are expanded; alpha defaults to 255.
pub fn decode_layer(bytes: &[u8]) -> JigsawResult<LayerBuffer> {
    let dyn_img = image::load_from_memory(bytes).context("decode layer image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    LayerBuffer::from_rgba8(width, height, rgba.into_raw())
}

/// Write an RGB raster as PNG, creating parent directories as needed.
pub fn write_png(path: &Path, image: &TileImage) -> JigsawResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &image.data,
        image.width,
        image.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
