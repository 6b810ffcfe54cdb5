use thiserror::Error;

// Main pipeline error type.
//
// Callers receive either a complete `ClassificationResult` or one of these;
// there is no partially-populated result.

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid Input: {0}")]
    Input(#[from] InputError),
    #[error("Aggregation Failed: {0}")]
    Aggregation(String),
}

// Caller precondition violations. Not recoverable inside the pipeline.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("The image has zero area.")]
    EmptyImage,
    #[error("The {0} score vector is empty.")]
    EmptyScores(&'static str),
    #[error("The {0} score vector sums to {1}, expected 1.0.")]
    NotNormalized(&'static str, f32),
    #[error("The {0} score vector contains a negative probability for `{1}`.")]
    NegativeProbability(&'static str, String),
    #[error("The {0} score vector contains a non-finite probability for `{1}`.")]
    NonFiniteProbability(&'static str, String),
}
