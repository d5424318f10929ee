//! Parsed glTF document: materials, images and the buffers they point into.

use std::borrow::Cow;

use crate::color::Rgb;
use crate::error::{ExtractError, Result};
use crate::parser::decode_data_uri;

/// A material with its PBR base-color factor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    /// Material name, if the asset gives one.
    pub name: Option<String>,
    /// Base-color factor converted to 8-bit RGB. Alpha is discarded.
    pub base_color: Option<Rgb>,
    /// Metallic factor, if present.
    pub metallic: Option<f32>,
    /// Roughness factor, if present.
    pub roughness: Option<f32>,
}

/// Where an image's encoded bytes live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Data URI or external path.
    Uri(String),
    /// Slice of a buffer view.
    View {
        view: usize,
        mime_type: Option<String>,
    },
}

/// An embedded or referenced texture image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    /// Image name, if the asset gives one.
    pub name: Option<String>,
    /// `None` when the image declares neither a URI nor a buffer view.
    pub source: Option<ImageSource>,
}

/// Where a buffer's bytes live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferSource {
    /// The GLB binary chunk.
    Binary,
    /// Data URI or external path.
    Uri(String),
}

impl Image {
    /// Declared MIME type of a buffer-view image.
    pub fn mime_type(&self) -> Option<&str> {
        match &self.source {
            Some(ImageSource::View { mime_type, .. }) => mime_type.as_deref(),
            _ => None,
        }
    }

    /// Name for log messages: the image name, or its index.
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => format!("'{}'", name),
            None => format!("#{}", index),
        }
    }
}

/// A binary buffer declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    /// Declared length. Resolved data shorter than this is an error.
    pub byte_length: usize,
    pub source: BufferSource,
}

/// A byte-range window into a buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferView {
    pub buffer: usize,
    pub byte_offset: usize,
    pub byte_length: usize,
}

impl BufferView {
    /// End offset (exclusive) in the parent buffer.
    pub fn end(&self) -> usize {
        self.byte_offset.saturating_add(self.byte_length)
    }
}

/// A parsed container. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct AssetDocument {
    pub materials: Vec<Material>,
    pub images: Vec<Image>,
    pub buffers: Vec<Buffer>,
    pub buffer_views: Vec<BufferView>,
    /// `asset.generator`, if present.
    pub generator: Option<String>,
    /// Contents of the GLB binary chunk.
    pub(crate) binary_chunk: Option<Vec<u8>>,
}

impl AssetDocument {
    /// Attach a binary chunk.
    pub fn with_binary_chunk(mut self, data: Vec<u8>) -> Self {
        self.binary_chunk = Some(data);
        self
    }

    /// Contents of the GLB binary chunk, if any.
    pub fn binary_chunk(&self) -> Option<&[u8]> {
        self.binary_chunk.as_deref()
    }

    /// Resolve a buffer's bytes. Data URIs are decoded; external URIs are
    /// reported as unsupported and never fetched.
    pub fn buffer_data(&self, index: usize) -> Result<Cow<'_, [u8]>> {
        let buffer = self
            .buffers
            .get(index)
            .ok_or(ExtractError::MissingReference {
                kind: "Buffer",
                index,
            })?;

        let data = match &buffer.source {
            BufferSource::Binary => self
                .binary_chunk
                .as_deref()
                .map(Cow::Borrowed)
                .ok_or(ExtractError::MissingBinaryChunk { index })?,
            BufferSource::Uri(uri) => Cow::Owned(decode_data_uri(uri)?),
        };

        // The binary chunk may carry padding past `byteLength`, never less.
        if data.len() < buffer.byte_length {
            return Err(ExtractError::Truncated {
                expected: buffer.byte_length,
                actual: data.len(),
            });
        }
        Ok(data)
    }

    /// Resolve a buffer view's bytes.
    pub fn view_data(&self, index: usize) -> Result<Cow<'_, [u8]>> {
        let view = self
            .buffer_views
            .get(index)
            .copied()
            .ok_or(ExtractError::MissingReference {
                kind: "BufferView",
                index,
            })?;

        let data = self.buffer_data(view.buffer)?;
        if view.end() > data.len() {
            return Err(ExtractError::ViewOutOfBounds {
                start: view.byte_offset,
                end: view.end(),
                length: data.len(),
            });
        }

        Ok(match data {
            Cow::Borrowed(bytes) => Cow::Borrowed(&bytes[view.byte_offset..view.end()]),
            Cow::Owned(bytes) => Cow::Owned(bytes[view.byte_offset..view.end()].to_vec()),
        })
    }

    /// Resolve an image's encoded bytes.
    ///
    /// Returns `Ok(None)` for images that declare no source at all.
    pub fn image_data(&self, image: &Image) -> Result<Option<Cow<'_, [u8]>>> {
        match &image.source {
            None => Ok(None),
            Some(ImageSource::Uri(uri)) => decode_data_uri(uri).map(|b| Some(Cow::Owned(b))),
            Some(ImageSource::View { view, .. }) => self.view_data(*view).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn document_with_binary() -> AssetDocument {
        AssetDocument {
            buffers: vec![Buffer {
                byte_length: 8,
                source: BufferSource::Binary,
            }],
            buffer_views: vec![
                BufferView {
                    buffer: 0,
                    byte_offset: 2,
                    byte_length: 4,
                },
                BufferView {
                    buffer: 0,
                    byte_offset: 6,
                    byte_length: 10,
                },
            ],
            ..Default::default()
        }
        .with_binary_chunk(vec![0, 1, 2, 3, 4, 5, 6, 7])
    }

    #[test]
    fn test_view_data_from_binary_chunk() {
        let doc = document_with_binary();
        let data = doc.view_data(0).unwrap();
        assert_eq!(&*data, &[2, 3, 4, 5]);
        assert!(matches!(data, Cow::Borrowed(_)));
    }

    #[test]
    fn test_view_data_out_of_bounds() {
        let doc = document_with_binary();
        let err = doc.view_data(1).unwrap_err();
        assert!(matches!(err, ExtractError::ViewOutOfBounds { end: 16, .. }));
    }

    #[test]
    fn test_view_data_missing_view() {
        let doc = document_with_binary();
        let err = doc.view_data(9).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MissingReference {
                kind: "BufferView",
                index: 9
            }
        ));
    }

    #[test]
    fn test_buffer_data_inline_uri() {
        let doc = AssetDocument {
            buffers: vec![Buffer {
                byte_length: 3,
                source: BufferSource::Uri("data:application/octet-stream;base64,AQID".to_string()),
            }],
            buffer_views: vec![BufferView {
                buffer: 0,
                byte_offset: 1,
                byte_length: 2,
            }],
            ..Default::default()
        };
        assert_eq!(&*doc.buffer_data(0).unwrap(), &[1, 2, 3]);
        assert_eq!(&*doc.view_data(0).unwrap(), &[2, 3]);
    }

    #[test]
    fn test_buffer_data_external_uri_unsupported() {
        let doc = AssetDocument {
            buffers: vec![Buffer {
                byte_length: 3,
                source: BufferSource::Uri("scene.bin".to_string()),
            }],
            ..Default::default()
        };
        let err = doc.buffer_data(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedReference);
    }

    #[test]
    fn test_buffer_data_missing_binary_chunk() {
        let doc = AssetDocument {
            buffers: vec![Buffer {
                byte_length: 3,
                source: BufferSource::Binary,
            }],
            ..Default::default()
        };
        assert!(matches!(
            doc.buffer_data(0).unwrap_err(),
            ExtractError::MissingBinaryChunk { index: 0 }
        ));
    }

    #[test]
    fn test_buffer_data_shorter_than_declared() {
        let doc = AssetDocument {
            buffers: vec![Buffer {
                byte_length: 12,
                source: BufferSource::Binary,
            }],
            ..Default::default()
        }
        .with_binary_chunk(vec![0; 8]);
        assert!(matches!(
            doc.buffer_data(0).unwrap_err(),
            ExtractError::Truncated {
                expected: 12,
                actual: 8
            }
        ));
    }

    #[test]
    fn test_buffer_data_padding_allowed() {
        let doc = AssetDocument {
            buffers: vec![Buffer {
                byte_length: 6,
                source: BufferSource::Binary,
            }],
            ..Default::default()
        }
        .with_binary_chunk(vec![1, 2, 3, 4, 5, 6, 0, 0]);
        assert_eq!(doc.buffer_data(0).unwrap().len(), 8);
    }

    #[test]
    fn test_image_mime_type_and_label() {
        let view = Image {
            name: Some("Seat".to_string()),
            source: Some(ImageSource::View {
                view: 0,
                mime_type: Some("image/png".to_string()),
            }),
        };
        assert_eq!(view.mime_type(), Some("image/png"));
        assert_eq!(view.label(3), "'Seat'");

        let uri = Image {
            name: None,
            source: Some(ImageSource::Uri("data:image/png;base64,".to_string())),
        };
        assert_eq!(uri.mime_type(), None);
        assert_eq!(uri.label(3), "#3");
    }

    #[test]
    fn test_image_data_without_source() {
        let doc = AssetDocument::default();
        assert!(doc.image_data(&Image::default()).unwrap().is_none());
    }
}
