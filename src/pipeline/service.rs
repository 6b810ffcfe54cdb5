use image::DynamicImage;
use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tower::Service;

use crate::error::PipelineError;
use crate::pipeline::aggregator::PredictionAggregator;
use crate::pipeline::types::{ClassificationResult, ScoreVector};

/// One classification request: the decoded image plus the two score vectors
/// the model produced for it.
#[derive(Clone)]
pub struct ClassifyRequest {
    pub image: Arc<DynamicImage>,
    pub category_scores: ScoreVector,
    pub climate_scores: ScoreVector,
}

impl ClassifyRequest {
    pub fn new(
        image: DynamicImage,
        category_scores: ScoreVector,
        climate_scores: ScoreVector,
    ) -> Self {
        Self {
            image: Arc::new(image),
            category_scores,
            climate_scores,
        }
    }
}

/// Tower service wrapper around the aggregator so the pipeline composes with
/// caller-side middleware (timeouts, concurrency limits). The computation is
/// synchronous and CPU-bound; the returned future is already resolved.
#[derive(Clone)]
pub struct ClassificationService {
    aggregator: Arc<PredictionAggregator>,
}

impl ClassificationService {
    pub fn new(aggregator: PredictionAggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}

impl Service<ClassifyRequest> for ClassificationService {
    type Response = ClassificationResult;
    type Error = PipelineError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: ClassifyRequest) -> Self::Future {
        let result = self.aggregator.aggregate(
            &request.image,
            &request.category_scores,
            &request.climate_scores,
        );

        Box::pin(async move { result })
    }
}
