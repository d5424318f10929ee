//! glTF container parser module.

mod glb;
mod schema;
mod uri;

pub use glb::{load_document, split_glb, write_glb, GlbChunks, CHUNK_BIN, CHUNK_JSON, GLB_MAGIC};
pub use uri::{decode_data_uri, is_data_uri};
