use image::Rgb;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::PipelineError;

/// Groups a pixel sample into k representative colors with relative
/// frequencies, via seeded k-means in RGB space.
///
/// Determinism contract: identical pixel input and seed produce bit-identical
/// output. The fixed seed plus the bounded iteration budget make this hold.
pub struct ColorClusterer {
    pub seed: u64,
    pub max_iterations: usize,
    /// Minimum pixels per cluster; the effective k is capped at
    /// `pixels / min_cluster_density` so sparse samples do not get split
    /// into meaningless clusters.
    pub min_cluster_density: usize,
}

impl ColorClusterer {
    pub fn new(seed: u64, max_iterations: usize) -> Self {
        Self {
            seed,
            max_iterations,
            min_cluster_density: 50,
        }
    }

    /// Partitions `pixels` into at most `requested_k` color clusters, ordered
    /// by descending frequency (stable on ties).
    ///
    /// Every effective cluster is reported, including ones that ended up
    /// empty (frequency 0.0), so the caller always receives the full palette
    /// length even for uniform images.
    pub fn cluster(
        &self,
        pixels: &[Rgb<u8>],
        requested_k: usize,
    ) -> Result<Vec<(Rgb<u8>, f32)>, PipelineError> {
        if pixels.is_empty() {
            return Err(PipelineError::Aggregation(
                "Clustering received no pixels to work with.".to_string(),
            ));
        }
        if requested_k == 0 {
            return Err(PipelineError::Aggregation(
                "Clustering was asked for zero clusters.".to_string(),
            ));
        }

        let k = requested_k
            .min(pixels.len() / self.min_cluster_density)
            .max(1);

        let points: Vec<[f64; 3]> = pixels
            .iter()
            .map(|px| [px[0] as f64, px[1] as f64, px[2] as f64])
            .collect();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut centroids = self.seed_centroids(&points, k, &mut rng);
        let mut assignments = vec![0usize; points.len()];

        for iteration in 0..self.max_iterations {
            let mut changed = false;
            for (i, point) in points.iter().enumerate() {
                let nearest = nearest_centroid(point, &centroids);
                if assignments[i] != nearest {
                    assignments[i] = nearest;
                    changed = true;
                }
            }

            if !changed && iteration > 0 {
                debug!("K-means converged after {} iterations", iteration);
                break;
            }

            // Recompute means; empty clusters keep their previous centroid.
            let mut sums = vec![[0.0f64; 3]; k];
            let mut counts = vec![0usize; k];
            for (point, &cluster) in points.iter().zip(&assignments) {
                sums[cluster][0] += point[0];
                sums[cluster][1] += point[1];
                sums[cluster][2] += point[2];
                counts[cluster] += 1;
            }
            for (cluster, count) in counts.iter().enumerate() {
                if *count > 0 {
                    centroids[cluster] = [
                        sums[cluster][0] / *count as f64,
                        sums[cluster][1] / *count as f64,
                        sums[cluster][2] / *count as f64,
                    ];
                }
            }
        }

        let mut counts = vec![0usize; k];
        for &cluster in &assignments {
            counts[cluster] += 1;
        }

        let total = points.len() as f32;
        let mut clusters: Vec<(Rgb<u8>, f32)> = centroids
            .iter()
            .zip(&counts)
            .map(|(centroid, &count)| {
                let rgb = Rgb([
                    centroid[0].round().clamp(0.0, 255.0) as u8,
                    centroid[1].round().clamp(0.0, 255.0) as u8,
                    centroid[2].round().clamp(0.0, 255.0) as u8,
                ]);
                (rgb, count as f32 / total)
            })
            .collect();

        if clusters.is_empty() {
            return Err(PipelineError::Aggregation(
                "Clustering produced no centroids.".to_string(),
            ));
        }

        // Stable sort keeps centroid insertion order on equal frequencies.
        clusters.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(clusters)
    }

    /// K-means++-style initialization: later centroids are drawn with
    /// probability proportional to squared distance from the nearest one
    /// already chosen.
    fn seed_centroids(&self, points: &[[f64; 3]], k: usize, rng: &mut StdRng) -> Vec<[f64; 3]> {
        let mut centroids = Vec::with_capacity(k);
        centroids.push(points[rng.random_range(0..points.len())]);

        while centroids.len() < k {
            let weights: Vec<f64> = points
                .iter()
                .map(|point| {
                    centroids
                        .iter()
                        .map(|c| squared_distance(point, c))
                        .fold(f64::INFINITY, f64::min)
                })
                .collect();
            let total: f64 = weights.iter().sum();

            let next = if total > 0.0 {
                let mut draw = rng.random_range(0.0..total);
                let mut chosen = points.len() - 1;
                for (i, weight) in weights.iter().enumerate() {
                    if draw < *weight {
                        chosen = i;
                        break;
                    }
                    draw -= weight;
                }
                chosen
            } else {
                // All points coincide with an existing centroid.
                rng.random_range(0..points.len())
            };
            centroids.push(points[next]);
        }
        centroids
    }
}

impl Default for ColorClusterer {
    fn default() -> Self {
        Self::new(42, 100)
    }
}

fn squared_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

/// Index of the closest centroid; ties resolve to the lowest index.
fn nearest_centroid(point: &[f64; 3], centroids: &[[f64; 3]]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let distance = squared_distance(point, centroid);
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    best
}
