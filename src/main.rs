use serde::Deserialize;
use tower::ServiceExt;
use tracing::{info, Level};

use wardrobe_vision::{
    ClassificationService, ClassifyRequest, PredictionAggregator, ScoreVector,
};

/// The two score vectors the model produced for an image, as written out by
/// the inference collaborator.
#[derive(Deserialize)]
struct ScoresFile {
    categories: ScoreVector,
    climates: ScoreVector,
}

fn init_logging() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let (image_path, scores_path) = match (args.next(), args.next()) {
        (Some(image), Some(scores)) => (image, scores),
        _ => {
            eprintln!("usage: wardrobe-vision <image> <scores.json>");
            std::process::exit(2);
        }
    };

    let image = image::open(&image_path)?;
    info!("Loaded {} ({}x{})", image_path, image.width(), image.height());

    let scores: ScoresFile = serde_json::from_str(&std::fs::read_to_string(&scores_path)?)?;

    let service = ClassificationService::new(PredictionAggregator::wardrobe_default()?);
    let result = service
        .oneshot(ClassifyRequest::new(
            image,
            scores.categories,
            scores.climates,
        ))
        .await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
