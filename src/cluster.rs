//! k-means clustering of RGB samples.
//!
//! Clustering runs in sRGB space with Euclidean distance. Seeds are fixed, so
//! the same input sequence always produces the same palette in the same order.

use std::collections::BTreeSet;

use kmeans_colors::{get_kmeans, Kmeans};
use palette::Srgb;

use crate::color::Rgb;
use crate::config::KmeansParams;

/// A cluster centroid and the number of samples assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCluster {
    pub color: Rgb,
    pub population: usize,
}

/// Number of distinct colors in a sample set.
pub fn distinct_count(samples: &[Rgb]) -> usize {
    samples.iter().collect::<BTreeSet<_>>().len()
}

/// Cluster `samples` into at most `cap` colors, ranked by descending population.
///
/// `k` is `min(cap, distinct colors)`, so the result has exactly that many
/// entries. Ties in population keep centroid order.
pub fn cluster_colors(samples: &[Rgb], cap: usize, params: &KmeansParams) -> Vec<ColorCluster> {
    let k = cap.min(distinct_count(samples)).min(u8::MAX as usize);
    if k == 0 {
        return Vec::new();
    }

    let buf: Vec<Srgb> = samples
        .iter()
        .map(|c| c.to_srgb().into_format::<f32>())
        .collect();

    let Some(kmeans) = best_run(&buf, k, params) else {
        return Vec::new();
    };

    let mut populations = vec![0usize; kmeans.centroids.len()];
    for &index in &kmeans.indices {
        if let Some(count) = populations.get_mut(index as usize) {
            *count += 1;
        }
    }

    let mut clusters: Vec<ColorCluster> = kmeans
        .centroids
        .iter()
        .zip(populations)
        // Rounded, since the unit-float round trip can land just below an integer.
        .map(|(centroid, population)| ColorCluster {
            color: Rgb::from(centroid.into_format::<u8>()),
            population,
        })
        .collect();

    // Stable sort keeps centroid order for equal populations.
    clusters.sort_by(|a, b| b.population.cmp(&a.population));
    clusters
}

/// Sum of squared distances from each sample to its assigned centroid.
fn inertia(buf: &[Srgb], kmeans: &Kmeans<Srgb>) -> f32 {
    buf.iter()
        .zip(&kmeans.indices)
        .filter_map(|(sample, &index)| {
            let centroid = kmeans.centroids.get(index as usize)?;
            let dr = sample.red - centroid.red;
            let dg = sample.green - centroid.green;
            let db = sample.blue - centroid.blue;
            Some(dr * dr + dg * dg + db * db)
        })
        .sum()
}

/// Run `params.runs` seeded restarts and keep the one with the lowest
/// inertia. Earlier runs win ties.
fn best_run(buf: &[Srgb], k: usize, params: &KmeansParams) -> Option<Kmeans<Srgb>> {
    let mut best: Option<(f32, Kmeans<Srgb>)> = None;
    for run in 0..params.runs.max(1) {
        let result = get_kmeans(
            k,
            params.max_iter,
            params.converge,
            false,
            buf,
            params.seed.wrapping_add(run),
        );
        let score = inertia(buf, &result);
        best = match best {
            Some((current, kept)) if current <= score => Some((current, kept)),
            _ => Some((score, result)),
        };
    }
    best.map(|(_, kmeans)| kmeans)
}

/// Dominant colors of `samples`, most populous first.
pub fn dominant_colors(samples: &[Rgb], cap: usize, params: &KmeansParams) -> Vec<Rgb> {
    cluster_colors(samples, cap, params)
        .into_iter()
        .map(|c| c.color)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PALETTE_CAP;

    fn params() -> KmeansParams {
        KmeansParams::default()
    }

    fn repeat(color: Rgb, n: usize) -> Vec<Rgb> {
        vec![color; n]
    }

    /// Deterministic pseudo-random colors for larger inputs.
    fn noisy_samples(n: usize) -> Vec<Rgb> {
        let mut state: u32 = 0x9E37_79B9;
        (0..n)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                let [r, g, b, _] = state.to_le_bytes();
                Rgb::new(r, g, b)
            })
            .collect()
    }

    // ==================== cardinality tests ====================

    #[test]
    fn test_empty_input() {
        assert!(cluster_colors(&[], PALETTE_CAP, &params()).is_empty());
    }

    #[test]
    fn test_single_color() {
        let clusters = cluster_colors(&repeat(Rgb::new(10, 20, 30), 12), PALETTE_CAP, &params());
        assert_eq!(
            clusters,
            vec![ColorCluster {
                color: Rgb::new(10, 20, 30),
                population: 12
            }]
        );
    }

    #[test]
    fn test_k_limited_by_distinct_colors() {
        let mut samples = repeat(Rgb::new(200, 0, 0), 4);
        samples.extend(repeat(Rgb::new(0, 0, 200), 4));
        samples.extend(repeat(Rgb::new(0, 200, 0), 4));
        assert_eq!(distinct_count(&samples), 3);
        assert_eq!(cluster_colors(&samples, PALETTE_CAP, &params()).len(), 3);
    }

    #[test]
    fn test_k_limited_by_cap() {
        let samples = noisy_samples(200);
        assert!(distinct_count(&samples) > PALETTE_CAP);
        assert_eq!(cluster_colors(&samples, PALETTE_CAP, &params()).len(), PALETTE_CAP);
        assert_eq!(cluster_colors(&samples, 2, &params()).len(), 2);
    }

    #[test]
    fn test_zero_cap() {
        assert!(cluster_colors(&noisy_samples(10), 0, &params()).is_empty());
    }

    // ==================== ranking tests ====================

    #[test]
    fn test_ranked_by_population() {
        let red = Rgb::new(220, 20, 60);
        let blue = Rgb::new(0, 102, 204);
        let green = Rgb::new(34, 139, 34);
        let mut samples = repeat(green, 1);
        samples.extend(repeat(blue, 3));
        samples.extend(repeat(red, 6));

        let clusters = cluster_colors(&samples, PALETTE_CAP, &params());
        let colors: Vec<Rgb> = clusters.iter().map(|c| c.color).collect();
        assert_eq!(colors, vec![red, blue, green]);
        let populations: Vec<usize> = clusters.iter().map(|c| c.population).collect();
        assert_eq!(populations, vec![6, 3, 1]);
    }

    #[test]
    fn test_populations_sum_to_input() {
        let samples = noisy_samples(500);
        let clusters = cluster_colors(&samples, PALETTE_CAP, &params());
        let total: usize = clusters.iter().map(|c| c.population).sum();
        assert_eq!(total, 500);
        assert!(clusters.windows(2).all(|w| w[0].population >= w[1].population));
    }

    // ==================== restart selection tests ====================

    #[test]
    fn test_best_run_has_lowest_inertia() {
        let buf: Vec<Srgb> = noisy_samples(400)
            .iter()
            .map(|c| c.to_srgb().into_format::<f32>())
            .collect();
        let params = params();
        let best = best_run(&buf, PALETTE_CAP, &params).unwrap();
        let best_inertia = inertia(&buf, &best);

        for run in 0..params.runs {
            let single = get_kmeans(
                PALETTE_CAP,
                params.max_iter,
                params.converge,
                false,
                &buf,
                params.seed + run,
            );
            assert!(best_inertia <= inertia(&buf, &single));
        }
    }

    #[test]
    fn test_inertia_zero_for_exact_clusters() {
        let mut samples = repeat(Rgb::new(200, 0, 0), 5);
        samples.extend(repeat(Rgb::new(0, 0, 200), 5));
        let buf: Vec<Srgb> = samples
            .iter()
            .map(|c| c.to_srgb().into_format::<f32>())
            .collect();
        let best = best_run(&buf, 2, &params()).unwrap();
        assert!(inertia(&buf, &best) < 1e-6);
    }

    // ==================== determinism tests ====================

    #[test]
    fn test_deterministic_output() {
        let samples = noisy_samples(300);
        let first = dominant_colors(&samples, PALETTE_CAP, &params());
        let second = dominant_colors(&samples, PALETTE_CAP, &params());
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_run_deterministic() {
        let samples = noisy_samples(300);
        let single = KmeansParams {
            runs: 1,
            ..params()
        };
        assert_eq!(
            cluster_colors(&samples, 4, &single),
            cluster_colors(&samples, 4, &single)
        );
    }
}
