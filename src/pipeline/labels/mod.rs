pub mod category;
pub mod climate;

pub use category::CategoryMapper;
pub use climate::ClimateNormalizer;
