use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;

/// Static label tables supplied by the loading collaborator: wardrobe group
/// membership and optional display-name overrides.
///
/// Deserializable so callers can ship the tables alongside the model
/// checkpoint; `LabelCatalog::wardrobe()` carries the built-in tables for the
/// stock clothing vocabulary. Group order is preserved (IndexMap) so reverse
/// index construction is deterministic when a label appears in two groups.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelCatalog {
    #[serde(default)]
    display_names: IndexMap<String, String>,
    groups: IndexMap<String, Vec<String>>,
}

impl LabelCatalog {
    pub fn new(
        display_names: IndexMap<String, String>,
        groups: IndexMap<String, Vec<String>>,
    ) -> Self {
        Self {
            display_names,
            groups,
        }
    }

    /// The built-in tables for the stock clothing classifier vocabulary.
    pub fn wardrobe() -> Self {
        let mut groups = IndexMap::new();
        groups.insert(
            "superior".to_string(),
            [
                "blouse",
                "button-down",
                "cardigan",
                "flannel",
                "henley",
                "hoodie",
                "jacket",
                "jersey",
                "sweater",
                "tank",
                "tee",
                "top",
                "turtleneck",
                "blazer",
                "bomber",
                "coat",
                "parka",
                "peacoat",
            ]
            .map(String::from)
            .to_vec(),
        );
        groups.insert(
            "inferior".to_string(),
            [
                "capris",
                "chinos",
                "culottes",
                "cutoffs",
                "gauchos",
                "jeans",
                "jeggings",
                "jodhpurs",
                "joggers",
                "leggings",
                "shorts",
                "skirt",
                "sweatpants",
                "sweatshorts",
                "trunks",
            ]
            .map(String::from)
            .to_vec(),
        );
        groups.insert(
            "footwear".to_string(),
            ["boots", "sandals", "shoes", "slippers"]
                .map(String::from)
                .to_vec(),
        );
        groups.insert(
            "dress".to_string(),
            ["dress", "jumpsuit", "romper", "sundress"]
                .map(String::from)
                .to_vec(),
        );
        groups.insert(
            "outerwear".to_string(),
            [
                "anorak", "caftan", "coverup", "kaftan", "kimono", "onesie", "poncho", "robe",
                "sarong",
            ]
            .map(String::from)
            .to_vec(),
        );

        // Display names fall back to title-casing, which is what the stock
        // vocabulary wants; overrides only matter for localized deployments.
        Self::new(IndexMap::new(), groups)
    }

    pub fn groups(&self) -> &IndexMap<String, Vec<String>> {
        &self.groups
    }

    /// Reverse label→group index for O(1) membership tests. The first group
    /// to claim a label wins.
    pub fn group_index(&self) -> HashMap<String, String> {
        let mut index = HashMap::new();
        for (group, labels) in &self.groups {
            for label in labels {
                index
                    .entry(label.clone())
                    .or_insert_with(|| group.clone());
            }
        }
        index
    }

    /// The human-facing name for a raw class label; title-cased fallback for
    /// labels without an override.
    pub fn display_name(&self, label: &str) -> String {
        self.display_names
            .get(label)
            .cloned()
            .unwrap_or_else(|| title_case(label))
    }
}

impl Default for LabelCatalog {
    fn default() -> Self {
        Self::wardrobe()
    }
}

fn title_case(label: &str) -> String {
    label
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
