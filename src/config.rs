//! Configuration constants and settings for palette extraction.

use serde::{Deserialize, Serialize};

/// Maximum number of colors in any palette (per texture and global merge).
pub const PALETTE_CAP: usize = 5;

/// Maximum number of colors produced by asset-name inference.
pub const NAME_FALLBACK_CAP: usize = 3;

/// Textures are downsampled so neither side exceeds this many pixels.
pub const TEXTURE_MAX_DIMENSION: u32 = 100;

/// Fixed k-means seed; identical input always yields identical palettes.
pub const KMEANS_SEED: u64 = 42;

/// Maximum k-means iterations per run.
pub const KMEANS_MAX_ITER: usize = 20;

/// Convergence threshold on centroid movement.
pub const KMEANS_CONVERGE: f32 = 1e-4;

/// Number of seeded restarts; the run with the lowest inertia wins.
pub const KMEANS_RUNS: u64 = 10;

/// Upper bound on the size of a fetched container.
pub const MAX_ASSET_BYTES: u64 = 64 * 1024 * 1024;

/// k-means parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KmeansParams {
    /// Base seed. Run `i` uses `seed + i`.
    pub seed: u64,
    /// Maximum iterations per run.
    pub max_iter: usize,
    /// Convergence threshold.
    pub converge: f32,
    /// Number of restarts.
    pub runs: u64,
}

impl Default for KmeansParams {
    fn default() -> Self {
        Self {
            seed: KMEANS_SEED,
            max_iter: KMEANS_MAX_ITER,
            converge: KMEANS_CONVERGE,
            runs: KMEANS_RUNS,
        }
    }
}

/// Analyzer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Palette size cap, at most [`PALETTE_CAP`].
    pub palette_cap: usize,
    /// Texture downsample bound.
    pub texture_max_dimension: u32,
    /// Clustering parameters.
    pub kmeans: KmeansParams,
    /// Euclidean RGB distance under which a color counts as neutral.
    /// `0.0` means only exact matches against the neutral set.
    pub neutral_tolerance: f32,
    /// Largest container accepted by the fetcher.
    pub max_asset_bytes: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            palette_cap: PALETTE_CAP,
            texture_max_dimension: TEXTURE_MAX_DIMENSION,
            kmeans: KmeansParams::default(),
            neutral_tolerance: 0.0,
            max_asset_bytes: MAX_ASSET_BYTES,
        }
    }
}

impl AnalyzerConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    /// `palette_cap` is clamped to `1..=PALETTE_CAP`.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        let cap = config.palette_cap;
        Ok(config.with_palette_cap(cap))
    }

    /// Override the palette cap, clamped to `1..=PALETTE_CAP`.
    pub fn with_palette_cap(mut self, cap: usize) -> Self {
        self.palette_cap = cap.clamp(1, PALETTE_CAP);
        self
    }

    /// Palette cap in effect, clamped even when the field was set directly.
    pub fn effective_palette_cap(&self) -> usize {
        self.palette_cap.clamp(1, PALETTE_CAP)
    }

    /// Override the neutral tolerance.
    pub fn with_neutral_tolerance(mut self, tolerance: f32) -> Self {
        self.neutral_tolerance = tolerance.max(0.0);
        self
    }

    /// Override the k-means seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.kmeans.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.palette_cap, 5);
        assert_eq!(config.texture_max_dimension, 100);
        assert_eq!(config.kmeans.seed, 42);
        assert_eq!(config.neutral_tolerance, 0.0);
    }

    #[test]
    fn test_from_json_partial() {
        let config = AnalyzerConfig::from_json(r#"{"neutral_tolerance": 12.5, "kmeans": {"seed": 7}}"#)
            .unwrap();
        assert_eq!(config.neutral_tolerance, 12.5);
        assert_eq!(config.kmeans.seed, 7);
        assert_eq!(config.kmeans.max_iter, KMEANS_MAX_ITER);
        assert_eq!(config.palette_cap, PALETTE_CAP);
    }

    #[test]
    fn test_from_json_empty_object() {
        let config = AnalyzerConfig::from_json("{}").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_palette_cap_clamped_on_load() {
        let config = AnalyzerConfig::from_json(r#"{"palette_cap": 12}"#).unwrap();
        assert_eq!(config.palette_cap, PALETTE_CAP);
        let config = AnalyzerConfig::from_json(r#"{"palette_cap": 0}"#).unwrap();
        assert_eq!(config.palette_cap, 1);
        let config = AnalyzerConfig::from_json(r#"{"palette_cap": 3}"#).unwrap();
        assert_eq!(config.palette_cap, 3);
    }

    #[test]
    fn test_effective_palette_cap() {
        let config = AnalyzerConfig {
            palette_cap: 40,
            ..Default::default()
        };
        assert_eq!(config.effective_palette_cap(), PALETTE_CAP);
        assert_eq!(AnalyzerConfig::default().with_palette_cap(2).effective_palette_cap(), 2);
    }

    #[test]
    fn test_negative_tolerance_clamped() {
        let config = AnalyzerConfig::default().with_neutral_tolerance(-3.0);
        assert_eq!(config.neutral_tolerance, 0.0);
    }
}
