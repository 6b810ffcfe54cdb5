pub mod result;
pub mod score;
pub mod swatch;

pub use result::{ClassificationResult, ClimatePrediction, PredictionCandidate};
pub use score::{ScoreEntry, ScoreVector};
pub use swatch::ColorSwatch;
