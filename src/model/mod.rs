//! Data model types for asset analysis.

mod document;
mod result;

pub use document::{AssetDocument, Buffer, BufferSource, BufferView, Image, ImageSource, Material};
pub use result::{AnalysisResult, MaterialSummary, PaletteSource};
