pub mod aggregator;
pub mod catalog;
pub mod color;
pub mod config;
pub mod labels;
pub mod service;
pub mod types;

pub use aggregator::PredictionAggregator;
pub use catalog::LabelCatalog;
pub use config::{AggregatorConfig, CategoryStrategy};
pub use service::{ClassificationService, ClassifyRequest};
pub use types::{
    ClassificationResult, ClimatePrediction, ColorSwatch, PredictionCandidate, ScoreEntry,
    ScoreVector,
};
