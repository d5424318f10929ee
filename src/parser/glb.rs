//! glTF binary container loader.

use crate::error::{ExtractError, Result};
use crate::model::AssetDocument;

use super::schema::RawDocument;

/// `glTF` in little-endian.
pub const GLB_MAGIC: u32 = 0x4654_6C67;
/// Chunk type of the JSON scene description.
pub const CHUNK_JSON: u32 = 0x4E4F_534A;
/// Chunk type of the binary payload.
pub const CHUNK_BIN: u32 = 0x004E_4942;
/// Only container version 2 is defined.
pub const GLB_VERSION: u32 = 2;

const HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

/// Raw chunks of a GLB file.
#[derive(Debug, Clone, Copy)]
pub struct GlbChunks<'a> {
    pub version: u32,
    pub json: &'a [u8],
    pub bin: Option<&'a [u8]>,
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    let bytes = data
        .get(offset..offset + 4)
        .ok_or(ExtractError::Truncated {
            expected: offset + 4,
            actual: data.len(),
        })?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Split a GLB file into its JSON and binary chunks.
pub fn split_glb(data: &[u8]) -> Result<GlbChunks<'_>> {
    if data.len() < HEADER_LEN {
        return Err(ExtractError::Truncated {
            expected: HEADER_LEN,
            actual: data.len(),
        });
    }

    let magic = read_u32(data, 0)?;
    if magic != GLB_MAGIC {
        return Err(ExtractError::InvalidMagic { found: magic });
    }

    let version = read_u32(data, 4)?;
    if version != GLB_VERSION {
        return Err(ExtractError::UnsupportedVersion { version });
    }

    let declared = read_u32(data, 8)? as usize;
    if declared > data.len() {
        return Err(ExtractError::Truncated {
            expected: declared,
            actual: data.len(),
        });
    }
    let data = &data[..declared];

    let mut offset = HEADER_LEN;
    let mut json = None;
    let mut bin = None;

    while offset + CHUNK_HEADER_LEN <= data.len() {
        let chunk_len = read_u32(data, offset)? as usize;
        let chunk_type = read_u32(data, offset + 4)?;
        let start = offset + CHUNK_HEADER_LEN;
        let end = start
            .checked_add(chunk_len)
            .filter(|end| *end <= data.len())
            .ok_or(ExtractError::Truncated {
                expected: start.saturating_add(chunk_len),
                actual: data.len(),
            })?;
        let payload = &data[start..end];

        if json.is_none() && chunk_type != CHUNK_JSON {
            return Err(ExtractError::InvalidChunk {
                message: format!("first chunk has type 0x{:08X}, expected JSON", chunk_type),
            });
        }

        match chunk_type {
            CHUNK_JSON if json.is_none() => json = Some(payload),
            CHUNK_JSON => {
                return Err(ExtractError::InvalidChunk {
                    message: "more than one JSON chunk".to_string(),
                })
            }
            CHUNK_BIN if bin.is_none() => bin = Some(payload),
            CHUNK_BIN => {
                return Err(ExtractError::InvalidChunk {
                    message: "more than one BIN chunk".to_string(),
                })
            }
            other => tracing::debug!("Skipping unknown chunk type 0x{:08X}", other),
        }

        // Chunks are 4-byte aligned.
        offset = end + (4 - chunk_len % 4) % 4;
    }

    let json = json.ok_or_else(|| ExtractError::InvalidChunk {
        message: "missing JSON chunk".to_string(),
    })?;

    Ok(GlbChunks { version, json, bin })
}

fn is_json_document(data: &[u8]) -> bool {
    data.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'{')
}

/// Parse a GLB container (or a plain `.gltf` JSON document) into an
/// [`AssetDocument`].
pub fn load_document(data: &[u8]) -> Result<AssetDocument> {
    let document = if is_json_document(data) {
        let raw: RawDocument = serde_json::from_slice(data)?;
        AssetDocument::from(raw)
    } else {
        let chunks = split_glb(data)?;
        let raw: RawDocument = serde_json::from_slice(chunks.json)?;
        let document = AssetDocument::from(raw);
        match chunks.bin {
            Some(bin) => document.with_binary_chunk(bin.to_vec()),
            None => document,
        }
    };

    tracing::debug!(
        "Loaded document: {} material(s), {} image(s), {} buffer(s), generator {}",
        document.materials.len(),
        document.images.len(),
        document.buffers.len(),
        document.generator.as_deref().unwrap_or("unknown")
    );

    Ok(document)
}

/// Assemble a GLB container from a JSON document and an optional binary chunk.
pub fn write_glb(json: &[u8], bin: Option<&[u8]>) -> Vec<u8> {
    fn push_chunk(out: &mut Vec<u8>, chunk_type: u32, payload: &[u8], pad: u8) {
        let padded = payload.len().div_ceil(4) * 4;
        out.extend_from_slice(&(padded as u32).to_le_bytes());
        out.extend_from_slice(&chunk_type.to_le_bytes());
        out.extend_from_slice(payload);
        out.resize(out.len() + padded - payload.len(), pad);
    }

    let mut body = Vec::new();
    push_chunk(&mut body, CHUNK_JSON, json, b' ');
    if let Some(bin) = bin {
        push_chunk(&mut body, CHUNK_BIN, bin, 0);
    }

    let mut out = Vec::with_capacity(HEADER_LEN + body.len());
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&GLB_VERSION.to_le_bytes());
    out.extend_from_slice(&((HEADER_LEN + body.len()) as u32).to_le_bytes());
    out.extend_from_slice(&body);
    out
}
