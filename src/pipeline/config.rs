/// Tunable parameters of the aggregation pipeline.
///
/// The deployment variants that used to be separate code paths are expressed
/// here as configuration: how many normalized climates each candidate carries,
/// whether swatches get human color names, and which category mapping
/// strategy runs.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// How many top category / climate entries to keep.
    pub top_k: usize,
    /// How many dominant color swatches to extract.
    pub color_count: usize,
    /// How many of the top normalized climate labels each candidate carries.
    pub candidate_climates: usize,
    /// Whether swatches are enriched with coarse human color names.
    pub name_colors: bool,
    pub category_strategy: CategoryStrategy,
    /// Larger images are downscaled to this bound before color sampling.
    pub max_sample_dimension: u32,
    /// Fixed k-means seed; reproducibility requires it to stay put.
    pub cluster_seed: u64,
    pub max_cluster_iterations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryStrategy {
    /// Explicit group membership tables with an O(1) reverse index;
    /// misses resolve to "other".
    Table,
    /// Keyword matching against the label text; misses resolve to
    /// "accessory".
    Heuristic,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            color_count: 3,
            candidate_climates: 2,
            name_colors: true,
            category_strategy: CategoryStrategy::Table,
            max_sample_dimension: 400,
            cluster_seed: 42,
            max_cluster_iterations: 100,
        }
    }
}

impl AggregatorConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.top_k == 0 {
            return Err("top_k must be at least 1".to_string());
        }
        if self.color_count == 0 {
            return Err("color_count must be at least 1".to_string());
        }
        if self.candidate_climates == 0 || self.candidate_climates > self.top_k {
            return Err("candidate_climates must be between 1 and top_k".to_string());
        }
        if self.max_sample_dimension == 0 {
            return Err("max_sample_dimension must be greater than 0".to_string());
        }
        if self.max_cluster_iterations == 0 {
            return Err("max_cluster_iterations must be greater than 0".to_string());
        }
        Ok(())
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_color_count(mut self, color_count: usize) -> Self {
        self.color_count = color_count;
        self
    }

    pub fn with_candidate_climates(mut self, candidate_climates: usize) -> Self {
        self.candidate_climates = candidate_climates;
        self
    }

    pub fn with_category_strategy(mut self, strategy: CategoryStrategy) -> Self {
        self.category_strategy = strategy;
        self
    }

    pub fn without_color_names(mut self) -> Self {
        self.name_colors = false;
        self
    }

    pub fn with_cluster_seed(mut self, seed: u64) -> Self {
        self.cluster_seed = seed;
        self
    }
}
