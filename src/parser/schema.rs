//! Serde view of the glTF JSON chunk, restricted to the parts the analyzer reads.

use serde::{Deserialize, Deserializer};

use crate::color::Rgb;
use crate::model::{AssetDocument, Buffer, BufferSource, BufferView, Image, ImageSource, Material};

/// Treat `null` the same as a missing array.
fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    #[serde(default)]
    pub asset: Option<RawAsset>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub materials: Vec<RawMaterial>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub images: Vec<RawImage>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub buffers: Vec<RawBuffer>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub buffer_views: Vec<RawBufferView>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAsset {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub generator: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterial {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pbr_metallic_roughness: Option<RawPbr>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPbr {
    #[serde(default)]
    pub base_color_factor: Option<Vec<f32>>,
    #[serde(default)]
    pub metallic_factor: Option<f32>,
    #[serde(default)]
    pub roughness_factor: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub buffer_view: Option<usize>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBuffer {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub byte_length: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBufferView {
    pub buffer: usize,
    #[serde(default)]
    pub byte_offset: usize,
    pub byte_length: usize,
}

impl From<RawMaterial> for Material {
    fn from(raw: RawMaterial) -> Self {
        let pbr = raw.pbr_metallic_roughness.unwrap_or_default();
        let base_color = pbr
            .base_color_factor
            .filter(|f| f.len() >= 3)
            .map(|f| Rgb::from_unit_floats(f[0], f[1], f[2]));

        Material {
            name: raw.name,
            base_color,
            metallic: pbr.metallic_factor,
            roughness: pbr.roughness_factor,
        }
    }
}

impl From<RawImage> for Image {
    fn from(raw: RawImage) -> Self {
        let source = match (raw.uri, raw.buffer_view) {
            (Some(uri), _) => Some(ImageSource::Uri(uri)),
            (None, Some(view)) => Some(ImageSource::View {
                view,
                mime_type: raw.mime_type,
            }),
            (None, None) => None,
        };
        Image {
            name: raw.name,
            source,
        }
    }
}

impl From<RawBuffer> for Buffer {
    fn from(raw: RawBuffer) -> Self {
        Buffer {
            byte_length: raw.byte_length,
            source: raw.uri.map_or(BufferSource::Binary, BufferSource::Uri),
        }
    }
}

impl From<RawBufferView> for BufferView {
    fn from(raw: RawBufferView) -> Self {
        BufferView {
            buffer: raw.buffer,
            byte_offset: raw.byte_offset,
            byte_length: raw.byte_length,
        }
    }
}

impl From<RawDocument> for AssetDocument {
    fn from(raw: RawDocument) -> Self {
        AssetDocument {
            materials: raw.materials.into_iter().map(Material::from).collect(),
            images: raw.images.into_iter().map(Image::from).collect(),
            buffers: raw.buffers.into_iter().map(Buffer::from).collect(),
            buffer_views: raw.buffer_views.into_iter().map(BufferView::from).collect(),
            generator: raw.asset.and_then(|a| a.generator),
            binary_chunk: None,
        }
    }
}
