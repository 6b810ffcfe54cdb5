use indexmap::IndexMap;
use std::collections::HashMap;

use crate::pipeline::catalog::LabelCatalog;
use crate::pipeline::config::CategoryStrategy;

/// Maps a raw class label to a coarse wardrobe group.
///
/// Two strategies exist because deployments shipped with different table
/// availability: `Table` resolves against the catalog's explicit group
/// membership, `Heuristic` keyword-matches the label text. Both are total;
/// unknown labels resolve to an explicit sentinel group instead of failing.
pub enum CategoryMapper {
    Table(TableMapper),
    Heuristic(HeuristicMapper),
}

impl CategoryMapper {
    pub fn from_catalog(strategy: CategoryStrategy, catalog: &LabelCatalog) -> Self {
        match strategy {
            CategoryStrategy::Table => Self::Table(TableMapper::new(catalog)),
            CategoryStrategy::Heuristic => Self::Heuristic(HeuristicMapper::wardrobe()),
        }
    }

    pub fn map_group(&self, label: &str) -> &str {
        match self {
            Self::Table(mapper) => mapper.map_group(label),
            Self::Heuristic(mapper) => mapper.map_group(label),
        }
    }
}

/// Table-driven mapping over a precomputed reverse index.
pub struct TableMapper {
    index: HashMap<String, String>,
}

impl TableMapper {
    pub fn new(catalog: &LabelCatalog) -> Self {
        Self {
            index: catalog.group_index(),
        }
    }

    pub fn map_group(&self, label: &str) -> &str {
        self.index.get(label).map(String::as_str).unwrap_or("other")
    }
}

/// Keyword mapping against the raw label text; first matching group wins,
/// in group insertion order.
pub struct HeuristicMapper {
    keywords: IndexMap<&'static str, Vec<&'static str>>,
}

impl HeuristicMapper {
    pub fn wardrobe() -> Self {
        let mut keywords = IndexMap::new();
        keywords.insert(
            "superior",
            vec![
                "shirt", "blouse", "tee", "top", "sweater", "hoodie", "cardigan", "jersey",
                "tank", "henley", "flannel", "turtleneck", "blazer", "camisa", "camiseta",
            ],
        );
        keywords.insert(
            "inferior",
            vec![
                "jean", "chino", "legging", "jogger", "short", "skirt", "capri", "culotte",
                "trouser", "pant", "falda",
            ],
        );
        keywords.insert(
            "footwear",
            vec!["boot", "shoe", "sandal", "slipper", "sneaker", "zapato", "bota"],
        );
        keywords.insert(
            "dress",
            vec!["dress", "jumpsuit", "romper", "vestido"],
        );
        keywords.insert(
            "outerwear",
            vec![
                "coat", "parka", "anorak", "poncho", "kimono", "robe", "jacket", "bomber",
                "abrigo",
            ],
        );
        Self { keywords }
    }

    pub fn map_group(&self, label: &str) -> &str {
        let lowered = label.to_lowercase();
        for (group, words) in &self.keywords {
            if words.iter().any(|word| lowered.contains(word)) {
                return group;
            }
        }
        "accessory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_mapper_resolves_known_labels() {
        let mapper =
            CategoryMapper::from_catalog(CategoryStrategy::Table, &LabelCatalog::wardrobe());
        assert_eq!(mapper.map_group("jeans"), "inferior");
        assert_eq!(mapper.map_group("boots"), "footwear");
        assert_eq!(mapper.map_group("dress"), "dress");
        assert_eq!(mapper.map_group("kimono"), "outerwear");
    }

    #[test]
    fn table_mapper_defaults_unknown_labels_to_other() {
        let mapper =
            CategoryMapper::from_catalog(CategoryStrategy::Table, &LabelCatalog::wardrobe());
        assert_eq!(mapper.map_group("umbrella"), "other");
    }

    #[test]
    fn heuristic_mapper_matches_substrings() {
        let mapper =
            CategoryMapper::from_catalog(CategoryStrategy::Heuristic, &LabelCatalog::wardrobe());
        assert_eq!(mapper.map_group("skinny-jeans"), "inferior");
        assert_eq!(mapper.map_group("T-Shirt"), "superior");
        assert_eq!(mapper.map_group("rain-boots"), "footwear");
        assert_eq!(mapper.map_group("trench coat"), "outerwear");
    }

    #[test]
    fn heuristic_mapper_defaults_unmatched_labels_to_accessory() {
        let mapper =
            CategoryMapper::from_catalog(CategoryStrategy::Heuristic, &LabelCatalog::wardrobe());
        assert_eq!(mapper.map_group("scarf"), "accessory");
    }

    #[test]
    fn heuristic_first_matching_group_wins() {
        let mapper = HeuristicMapper::wardrobe();
        // "sweatshirt" contains both "shirt" (superior) and no inferior word;
        // "sweatpants" contains "pant" only.
        assert_eq!(mapper.map_group("sweatshirt"), "superior");
        assert_eq!(mapper.map_group("sweatpants"), "inferior");
    }
}
