//! Color sampling from materials and textures.

mod material;
mod texture;

pub use material::sample_materials;
pub use texture::{
    decode_texture, filtered_pixels, sample_image, sample_textures, TextureSamples,
};
