//! glb-palette - Representative color palettes for glTF furniture assets.
//!
//! The pipeline parses a glTF binary container, samples PBR base-color factors
//! and embedded textures, clusters the samples with seeded k-means and ranks
//! the result by population. When sampling finds nothing, or only white,
//! beige and cream, the palette is inferred from material and asset names.
//!
//! # Example
//!
//! ```no_run
//! use glb_palette::{analyze_asset, FileFetcher, Fetch};
//!
//! let bytes = FileFetcher::new().fetch("oak_cabinet.glb").unwrap();
//! let result = analyze_asset(&bytes, "Oak Cabinet");
//! println!("{:?}", result.hex_colors());
//! ```

pub mod analyzer;
pub mod cluster;
pub mod color;
pub mod config;
pub mod error;
pub mod fallback;
pub mod fetch;
pub mod model;
pub mod parser;
pub mod sampler;

// Re-exports for convenience
pub use analyzer::PaletteExtractor;
pub use cluster::{cluster_colors, dominant_colors, ColorCluster};
pub use color::{hex_to_rgb, nearest_color_name, rgb_to_hex, Rgb};
pub use config::{AnalyzerConfig, KmeansParams};
pub use error::{ErrorKind, ExtractError, Result};
pub use fetch::{Fetch, FileFetcher};
pub use model::{AnalysisResult, AssetDocument, Material, PaletteSource};
pub use parser::load_document;

/// Analyze container bytes with the default configuration.
///
/// Never fails: parse errors and empty or neutral-only samples resolve to a
/// name-based palette, and the result always has at least one color.
pub fn analyze_asset(data: &[u8], asset_name: &str) -> AnalysisResult {
    PaletteExtractor::default().analyze_bytes(data, asset_name)
}
