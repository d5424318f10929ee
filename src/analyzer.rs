//! The extraction pipeline: load, sample, cluster, fall back.

use crate::cluster::dominant_colors;
use crate::color::{is_neutral, Rgb};
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::fallback::{self, FallbackTier};
use crate::fetch::Fetch;
use crate::model::{AnalysisResult, AssetDocument, MaterialSummary, PaletteSource};
use crate::parser::load_document;
use crate::sampler::{sample_materials, sample_textures};

/// Extracts palettes from glTF assets. Holds no per-request state.
#[derive(Debug, Clone, Default)]
pub struct PaletteExtractor {
    config: AnalyzerConfig,
}

impl PaletteExtractor {
    /// Create an extractor with the given configuration.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Fetch a container and analyze it. Fetch failures fall back to the
    /// asset name.
    pub fn analyze_from<F: Fetch + ?Sized>(
        &self,
        fetcher: &F,
        location: &str,
        asset_name: &str,
    ) -> AnalysisResult {
        self.analyze_fetched(fetcher.fetch(location), asset_name)
    }

    /// Analyze the outcome of a fetch performed by the caller.
    pub fn analyze_fetched(&self, fetched: Result<Vec<u8>>, asset_name: &str) -> AnalysisResult {
        match fetched {
            Ok(data) => self.analyze_bytes(&data, asset_name),
            Err(e) => {
                tracing::warn!("Fetch failed for '{}': {}", asset_name, e);
                self.asset_name_fallback(asset_name, Some(e.to_string()))
            }
        }
    }

    /// Analyze raw container bytes.
    pub fn analyze_bytes(&self, data: &[u8], asset_name: &str) -> AnalysisResult {
        match load_document(data) {
            Ok(document) => self.analyze_document(&document, asset_name),
            Err(e) => {
                tracing::warn!("Could not parse '{}': {}", asset_name, e);
                self.asset_name_fallback(asset_name, Some(e.to_string()))
            }
        }
    }

    /// Analyze an already parsed document.
    pub fn analyze_document(&self, document: &AssetDocument, asset_name: &str) -> AnalysisResult {
        let material_colors = sample_materials(&document.materials);
        let textures = sample_textures(document, &self.config);

        let mut samples = material_colors.clone();
        samples.extend_from_slice(&textures.colors);
        let palette = dominant_colors(
            &samples,
            self.config.effective_palette_cap(),
            &self.config.kmeans,
        );

        let mut result = AnalysisResult {
            colors: palette,
            fallback_used: false,
            error: None,
            source: PaletteSource::Direct,
            textures_analyzed: textures.analyzed,
            materials: document.materials.iter().map(MaterialSummary::from).collect(),
            material_colors,
            texture_colors: textures.colors,
        };

        if self.needs_fallback(&result.colors) {
            if result.colors.is_empty() {
                tracing::info!("No colors sampled from '{}', using name analysis", asset_name);
            } else {
                tracing::info!("Only neutral colors in '{}', using name analysis", asset_name);
            }

            let (colors, tier) = fallback::resolve(
                &document.materials,
                asset_name,
                self.config.effective_palette_cap(),
            );
            result.colors = colors;
            result.fallback_used = true;
            result.source = match tier {
                FallbackTier::MaterialNames => PaletteSource::MaterialNames,
                FallbackTier::AssetName => PaletteSource::AssetName,
            };
        }

        tracing::info!(
            "Palette for '{}': {:?} ({:?})",
            asset_name,
            result.hex_colors(),
            result.source
        );
        result
    }

    /// Empty palettes and palettes made only of neutrals are inconclusive.
    fn needs_fallback(&self, palette: &[Rgb]) -> bool {
        palette.is_empty()
            || palette
                .iter()
                .all(|c| is_neutral(*c, self.config.neutral_tolerance))
    }

    fn asset_name_fallback(&self, asset_name: &str, error: Option<String>) -> AnalysisResult {
        let (colors, _) = fallback::resolve(&[], asset_name, self.config.effective_palette_cap());
        AnalysisResult {
            colors,
            fallback_used: true,
            error,
            source: PaletteSource::AssetName,
            textures_analyzed: 0,
            materials: Vec::new(),
            material_colors: Vec::new(),
            texture_colors: Vec::new(),
        }
    }
}
