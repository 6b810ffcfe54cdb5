use image::DynamicImage;
use tracing::{debug, info};

use crate::error::{InputError, PipelineError};
use crate::pipeline::catalog::LabelCatalog;
use crate::pipeline::color::{ColorClusterer, ColorNamer, ColorSampler};
use crate::pipeline::config::AggregatorConfig;
use crate::pipeline::labels::{CategoryMapper, ClimateNormalizer};
use crate::pipeline::types::{
    ClassificationResult, ClimatePrediction, ColorSwatch, PredictionCandidate, ScoreVector,
};

/// Orchestrates the post-processing pipeline: two classifier score vectors
/// plus the raw image become one consistent `ClassificationResult`.
///
/// All state is built at construction from the injected config and catalog;
/// `aggregate` takes `&self` and owns nothing across calls, so one instance
/// can serve concurrent requests.
pub struct PredictionAggregator {
    sampler: ColorSampler,
    clusterer: ColorClusterer,
    namer: Option<ColorNamer>,
    normalizer: ClimateNormalizer,
    mapper: CategoryMapper,
    catalog: LabelCatalog,
    config: AggregatorConfig,
}

impl PredictionAggregator {
    pub fn new(config: AggregatorConfig, catalog: LabelCatalog) -> Result<Self, PipelineError> {
        config
            .validate()
            .map_err(|e| PipelineError::Aggregation(format!("Invalid config: {}", e)))?;

        let sampler = ColorSampler::new(config.max_sample_dimension);
        let clusterer = ColorClusterer::new(config.cluster_seed, config.max_cluster_iterations);
        let namer = config.name_colors.then_some(ColorNamer);
        let mapper = CategoryMapper::from_catalog(config.category_strategy, &catalog);

        Ok(Self {
            sampler,
            clusterer,
            namer,
            normalizer: ClimateNormalizer,
            mapper,
            catalog,
            config,
        })
    }

    /// Aggregator with the default configuration and the built-in wardrobe
    /// catalog.
    pub fn wardrobe_default() -> Result<Self, PipelineError> {
        Self::new(AggregatorConfig::default(), LabelCatalog::wardrobe())
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Runs the full pipeline. Returns a complete result or a single typed
    /// failure; partial results are never produced.
    pub fn aggregate(
        &self,
        image: &DynamicImage,
        category_scores: &ScoreVector,
        climate_scores: &ScoreVector,
    ) -> Result<ClassificationResult, PipelineError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(InputError::EmptyImage.into());
        }
        category_scores.validate("category")?;
        climate_scores.validate("climate")?;

        // Top-k category candidates; group and display name resolve through
        // the catalog, climates and colors are backfilled below.
        let mut candidates: Vec<PredictionCandidate> = category_scores
            .top_k(self.config.top_k)
            .into_iter()
            .map(|entry| PredictionCandidate {
                label: entry.label.clone(),
                probability: entry.probability,
                display_name: self.catalog.display_name(&entry.label),
                group: self.mapper.map_group(&entry.label).to_string(),
                climates: Vec::new(),
                colors: Vec::new(),
            })
            .collect();
        debug!("Ranked {} category candidates", candidates.len());

        // Top-k climates, normalized onto the public vocabulary.
        let climate_predictions: Vec<ClimatePrediction> = climate_scores
            .top_k(self.config.top_k)
            .into_iter()
            .map(|entry| ClimatePrediction {
                climate: self.normalizer.normalize(&entry.label).to_string(),
                probability: entry.probability,
            })
            .collect();

        // Climate suitability belongs to the image, not to any single
        // category guess, so every candidate shares the same list.
        let shared_climates: Vec<String> = climate_predictions
            .iter()
            .take(self.config.candidate_climates)
            .map(|prediction| prediction.climate.clone())
            .collect();

        let colors = self.extract_colors(image)?;
        debug!(
            "Extracted {} color swatches, primary {}",
            colors.len(),
            colors.first().map(|c| c.hex.as_str()).unwrap_or("-")
        );

        for candidate in &mut candidates {
            candidate.climates = shared_climates.clone();
            candidate.colors = colors.clone();
        }

        let result = ClassificationResult {
            candidates,
            climate_predictions,
            colors,
        };
        info!(
            "Aggregation completed: best {:?}, best climate {:?}",
            result.best().map(|c| c.label.as_str()),
            result.best_climate().map(|c| c.climate.as_str())
        );
        Ok(result)
    }

    fn extract_colors(&self, image: &DynamicImage) -> Result<Vec<ColorSwatch>, PipelineError> {
        let pixels = self.sampler.sample(image);
        let clusters = self.clusterer.cluster(&pixels, self.config.color_count)?;

        Ok(clusters
            .into_iter()
            .map(|(rgb, frequency)| {
                let swatch = ColorSwatch::new(rgb, frequency);
                match &self.namer {
                    Some(namer) => swatch.with_name(namer.name(rgb)),
                    None => swatch,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::config::CategoryStrategy;
    use image::{ImageBuffer, Rgb};

    fn uniform(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb(color)))
    }

    fn scenario_scores() -> (ScoreVector, ScoreVector) {
        let category = ScoreVector::from_pairs([("jeans", 0.7), ("shorts", 0.2), ("dress", 0.1)]);
        let climate =
            ScoreVector::from_pairs([("frío", 0.6), ("calor", 0.3), ("entretiempo", 0.1)]);
        (category, climate)
    }

    #[test]
    fn end_to_end_scenario() {
        let aggregator = PredictionAggregator::wardrobe_default().unwrap();
        let (category, climate) = scenario_scores();
        let image = uniform(224, 224, [20, 40, 160]);

        let result = aggregator.aggregate(&image, &category, &climate).unwrap();

        assert_eq!(result.candidates.len(), 3);
        let best = result.best().unwrap();
        assert_eq!(best.label, "jeans");
        assert_eq!(best.group, "inferior");
        assert_eq!(best.display_name, "Jeans");
        assert!((best.probability - 0.7).abs() < 1e-6);

        let best_climate = result.best_climate().unwrap();
        assert_eq!(best_climate.climate, "cold");
        assert!((best_climate.probability - 0.6).abs() < 1e-6);

        // Every candidate carries the identical first-2 normalized climates.
        for candidate in &result.candidates {
            assert_eq!(candidate.climates, vec!["cold", "hot"]);
        }

        assert_eq!(result.alternatives().len(), 2);
        assert_eq!(result.alternatives()[0].label, "shorts");
        assert_eq!(result.alternatives()[1].label, "dress");
    }

    #[test]
    fn aggregation_is_deterministic() {
        let aggregator = PredictionAggregator::wardrobe_default().unwrap();
        let (category, climate) = scenario_scores();
        let image = uniform(224, 224, [90, 140, 60]);

        let first = aggregator.aggregate(&image, &category, &climate).unwrap();
        let second = aggregator.aggregate(&image, &category, &climate).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn pure_white_image_yields_full_palette() {
        let aggregator = PredictionAggregator::wardrobe_default().unwrap();
        let (category, climate) = scenario_scores();

        let result = aggregator
            .aggregate(&uniform(224, 224, [255, 255, 255]), &category, &climate)
            .unwrap();
        assert_eq!(result.colors.len(), 3);
        let sum: f32 = result.colors.iter().map(|c| c.frequency).sum();
        assert!((sum - 1.0).abs() < 1e-3);
        assert_eq!(result.primary_color().unwrap().name.as_deref(), Some("white"));
    }

    #[test]
    fn pure_red_image_names_its_primary_swatch() {
        let aggregator = PredictionAggregator::wardrobe_default().unwrap();
        let (category, climate) = scenario_scores();

        let result = aggregator
            .aggregate(&uniform(224, 224, [255, 0, 0]), &category, &climate)
            .unwrap();
        let primary = result.primary_color().unwrap();
        assert!((primary.frequency - 1.0).abs() < 1e-3);
        assert_eq!(primary.hex, "#ff0000");
        assert_eq!(primary.name.as_deref(), Some("red"));
    }

    #[test]
    fn candidate_count_is_bounded_by_vocabulary() {
        let aggregator = PredictionAggregator::wardrobe_default().unwrap();
        let category = ScoreVector::from_pairs([("jeans", 1.0)]);
        let climate = ScoreVector::from_pairs([("calor", 1.0)]);

        let result = aggregator
            .aggregate(&uniform(64, 64, [10, 10, 10]), &category, &climate)
            .unwrap();
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.climate_predictions.len(), 1);
        assert!(result.alternatives().is_empty());
    }

    #[test]
    fn zero_area_image_is_rejected() {
        let aggregator = PredictionAggregator::wardrobe_default().unwrap();
        let (category, climate) = scenario_scores();
        let image = DynamicImage::new_rgb8(0, 0);

        assert!(matches!(
            aggregator.aggregate(&image, &category, &climate),
            Err(PipelineError::Input(InputError::EmptyImage))
        ));
    }

    #[test]
    fn invalid_scores_are_rejected_before_any_work() {
        let aggregator = PredictionAggregator::wardrobe_default().unwrap();
        let bad = ScoreVector::from_pairs([("jeans", 0.2)]);
        let climate = ScoreVector::from_pairs([("calor", 1.0)]);

        assert!(matches!(
            aggregator.aggregate(&uniform(32, 32, [5, 5, 5]), &bad, &climate),
            Err(PipelineError::Input(InputError::NotNormalized(_, _)))
        ));
    }

    #[test]
    fn nan_scores_are_rejected_before_any_work() {
        let aggregator = PredictionAggregator::wardrobe_default().unwrap();
        let bad = ScoreVector::from_pairs([("jeans", f32::NAN)]);
        let climate = ScoreVector::from_pairs([("calor", 1.0)]);

        assert!(matches!(
            aggregator.aggregate(&uniform(32, 32, [5, 5, 5]), &bad, &climate),
            Err(PipelineError::Input(InputError::NonFiniteProbability(_, _)))
        ));
    }

    #[test]
    fn color_naming_can_be_disabled() {
        let config = AggregatorConfig::default().without_color_names();
        let aggregator = PredictionAggregator::new(config, LabelCatalog::wardrobe()).unwrap();
        let (category, climate) = scenario_scores();

        let result = aggregator
            .aggregate(&uniform(128, 128, [200, 30, 30]), &category, &climate)
            .unwrap();
        assert!(result.colors.iter().all(|c| c.name.is_none()));
    }

    #[test]
    fn heuristic_strategy_maps_unlisted_labels() {
        let config =
            AggregatorConfig::default().with_category_strategy(CategoryStrategy::Heuristic);
        let aggregator = PredictionAggregator::new(config, LabelCatalog::wardrobe()).unwrap();
        let category = ScoreVector::from_pairs([("rain-boots", 0.9), ("scarf", 0.1)]);
        let climate = ScoreVector::from_pairs([("lluvia", 1.0)]);

        let result = aggregator
            .aggregate(&uniform(64, 64, [80, 80, 80]), &category, &climate)
            .unwrap();
        assert_eq!(result.candidates[0].group, "footwear");
        assert_eq!(result.candidates[1].group, "accessory");
        assert_eq!(result.best_climate().unwrap().climate, "rain");
    }

    #[test]
    fn invalid_config_fails_construction() {
        let config = AggregatorConfig::default().with_top_k(0);
        assert!(matches!(
            PredictionAggregator::new(config, LabelCatalog::wardrobe()),
            Err(PipelineError::Aggregation(_))
        ));
    }
}
