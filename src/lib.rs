pub mod error;
pub mod pipeline;

pub use error::{InputError, PipelineError};

pub use pipeline::aggregator::PredictionAggregator;
pub use pipeline::catalog::LabelCatalog;
pub use pipeline::config::{AggregatorConfig, CategoryStrategy};
pub use pipeline::service::{ClassificationService, ClassifyRequest};
pub use pipeline::types::{ClassificationResult, ScoreVector};
