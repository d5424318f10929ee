//! Analysis output returned to callers.

use serde::{Deserialize, Serialize};

use crate::color::{nearest_color_name_rgb, Rgb};
use crate::model::Material;

/// Which stage produced the final palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteSource {
    /// Sampled from material factors and textures.
    #[default]
    Direct,
    /// Inferred from material names.
    MaterialNames,
    /// Inferred from the asset's display name.
    AssetName,
}

/// Per-material report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSummary {
    pub name: String,
    pub base_color: Option<Rgb>,
    pub metallic: f32,
    pub roughness: f32,
}

impl From<&Material> for MaterialSummary {
    fn from(material: &Material) -> Self {
        Self {
            name: material
                .name
                .clone()
                .unwrap_or_else(|| "Unnamed".to_string()),
            base_color: material.base_color,
            metallic: material.metallic.unwrap_or(0.0),
            roughness: material.roughness.unwrap_or(0.0),
        }
    }
}

/// Result of analyzing one asset. `colors` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Palette as `#RRGGBB`, most representative first.
    pub colors: Vec<Rgb>,
    /// Whether the palette came from name-based inference.
    pub fallback_used: bool,
    /// Fetch or parse error that forced the fallback, if any.
    pub error: Option<String>,
    pub source: PaletteSource,
    /// Images that contributed at least one color.
    pub textures_analyzed: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<MaterialSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub material_colors: Vec<Rgb>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub texture_colors: Vec<Rgb>,
}

impl AnalysisResult {
    /// Palette as hex strings.
    pub fn hex_colors(&self) -> Vec<String> {
        self.colors.iter().map(Rgb::to_hex).collect()
    }

    /// Nearest table name for each palette entry.
    pub fn color_names(&self) -> Vec<&'static str> {
        self.colors.iter().map(|c| nearest_color_name_rgb(*c)).collect()
    }
}
