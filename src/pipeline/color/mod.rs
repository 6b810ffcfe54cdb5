pub mod clusterer;
pub mod namer;
pub mod sampler;

pub use clusterer::ColorClusterer;
pub use namer::ColorNamer;
pub use sampler::ColorSampler;
