use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::swatch::ColorSwatch;

/// One ranked category guess, cross-referenced with the image-level climate
/// and color findings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionCandidate {
    pub label: String,
    pub probability: f32,
    pub display_name: String,
    pub group: String,
    /// The same normalized top-climate list for every candidate: climate
    /// suitability is a property of the image, not of the category guess.
    pub climates: Vec<String>,
    pub colors: Vec<ColorSwatch>,
}

/// One ranked climate guess with its normalized label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimatePrediction {
    pub climate: String,
    pub probability: f32,
}

/// The complete, immutable outcome of one aggregation call.
///
/// Built once per request; `best`, `alternatives`, `bestClimate` and
/// `primaryColor` are views over the owned sequences and are materialized
/// again at serialization time so the JSON carries all seven fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub candidates: Vec<PredictionCandidate>,
    pub climate_predictions: Vec<ClimatePrediction>,
    pub colors: Vec<ColorSwatch>,
}

impl ClassificationResult {
    pub fn best(&self) -> Option<&PredictionCandidate> {
        self.candidates.first()
    }

    pub fn alternatives(&self) -> &[PredictionCandidate] {
        if self.candidates.len() > 1 {
            &self.candidates[1..]
        } else {
            &[]
        }
    }

    pub fn best_climate(&self) -> Option<&ClimatePrediction> {
        self.climate_predictions.first()
    }

    pub fn primary_color(&self) -> Option<&ColorSwatch> {
        self.colors.first()
    }
}

impl Serialize for ClassificationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ClassificationResult", 7)?;
        state.serialize_field("candidates", &self.candidates)?;
        state.serialize_field("best", &self.best())?;
        state.serialize_field("alternatives", self.alternatives())?;
        state.serialize_field("climatePredictions", &self.climate_predictions)?;
        state.serialize_field("bestClimate", &self.best_climate())?;
        state.serialize_field("colors", &self.colors)?;
        state.serialize_field("primaryColor", &self.primary_color())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn candidate(label: &str) -> PredictionCandidate {
        PredictionCandidate {
            label: label.to_string(),
            probability: 0.5,
            display_name: label.to_string(),
            group: "other".to_string(),
            climates: vec!["mild".to_string()],
            colors: Vec::new(),
        }
    }

    #[test]
    fn views_follow_candidate_order() {
        let result = ClassificationResult {
            candidates: vec![candidate("jeans"), candidate("shorts")],
            climate_predictions: vec![ClimatePrediction {
                climate: "cold".to_string(),
                probability: 0.6,
            }],
            colors: vec![ColorSwatch::new(Rgb([10, 20, 30]), 1.0)],
        };

        assert_eq!(result.best().unwrap().label, "jeans");
        assert_eq!(result.alternatives().len(), 1);
        assert_eq!(result.alternatives()[0].label, "shorts");
        assert_eq!(result.best_climate().unwrap().climate, "cold");
        assert_eq!(result.primary_color().unwrap().hex, "#0a141e");
    }

    #[test]
    fn empty_result_has_no_views() {
        let result = ClassificationResult {
            candidates: Vec::new(),
            climate_predictions: Vec::new(),
            colors: Vec::new(),
        };
        assert!(result.best().is_none());
        assert!(result.alternatives().is_empty());
        assert!(result.best_climate().is_none());
        assert!(result.primary_color().is_none());
    }

    #[test]
    fn serialization_carries_all_contractual_fields() {
        let result = ClassificationResult {
            candidates: vec![candidate("jeans")],
            climate_predictions: Vec::new(),
            colors: Vec::new(),
        };
        let json = serde_json::to_value(&result).unwrap();
        for field in [
            "candidates",
            "best",
            "alternatives",
            "climatePredictions",
            "bestClimate",
            "colors",
            "primaryColor",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(json["best"]["displayName"], "jeans");
    }
}
