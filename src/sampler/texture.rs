//! Texture sampling: decode embedded images and cluster their pixels.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbImage};

use crate::cluster::dominant_colors;
use crate::color::Rgb;
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::model::{AssetDocument, Image};

/// Colors gathered from all images of a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureSamples {
    /// Per-image cluster colors, concatenated in image order.
    pub colors: Vec<Rgb>,
    /// Images that contributed at least one color.
    pub analyzed: usize,
    /// Images skipped because of an unsupported reference or a decode error.
    pub skipped: usize,
}

/// Decode an encoded image and shrink it so neither side exceeds `max_dimension`.
pub fn decode_texture(bytes: &[u8], max_dimension: u32) -> Result<RgbImage> {
    let img = image::load_from_memory(bytes)?;
    Ok(downsample(img, max_dimension.max(1)).to_rgb8())
}

fn downsample(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    if w <= max_dimension && h <= max_dimension {
        return img;
    }
    // `resize` keeps the aspect ratio and fits within the bounds.
    img.resize(max_dimension, max_dimension, FilterType::Lanczos3)
}

/// Flatten an image into pixels, dropping pure black and pure white.
pub fn filtered_pixels(img: &RgbImage) -> Vec<Rgb> {
    img.pixels()
        .map(|p| Rgb::from(p.0))
        .filter(|c| *c != Rgb::BLACK && *c != Rgb::WHITE)
        .collect()
}

/// Dominant colors of a single image. Images without a source yield nothing.
pub fn sample_image(
    document: &AssetDocument,
    image: &Image,
    config: &AnalyzerConfig,
) -> Result<Vec<Rgb>> {
    let Some(bytes) = document.image_data(image)? else {
        return Ok(Vec::new());
    };
    if let Some(mime_type) = image.mime_type() {
        tracing::trace!("Decoding {} bytes declared as {}", bytes.len(), mime_type);
    }

    let decoded = decode_texture(&bytes, config.texture_max_dimension)?;
    let pixels = filtered_pixels(&decoded);
    if pixels.is_empty() {
        return Ok(Vec::new());
    }

    Ok(dominant_colors(&pixels, config.effective_palette_cap(), &config.kmeans))
}

/// Sample every image of a document. Failing images are logged and skipped.
pub fn sample_textures(document: &AssetDocument, config: &AnalyzerConfig) -> TextureSamples {
    let mut samples = TextureSamples::default();

    for (index, image) in document.images.iter().enumerate() {
        match sample_image(document, image, config) {
            Ok(colors) => {
                tracing::debug!(
                    "Extracted {} color(s) from texture {}",
                    colors.len(),
                    image.label(index)
                );
                if !colors.is_empty() {
                    samples.analyzed += 1;
                    samples.colors.extend(colors);
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Skipping texture {} ({:?}): {}",
                    image.label(index),
                    e.kind(),
                    e
                );
                samples.skipped += 1;
            }
        }
    }

    samples
}
