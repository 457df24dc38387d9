//! Default values for scoop configuration.

use indexmap::IndexMap;

/// Default location of the ingredient catalog.
pub const DEFAULT_CATALOG_PATH: &str = "data/intermediate/unique_ingredients.csv";

/// Default directory holding `model.json`, `columns.json` and `brands.json`.
pub const DEFAULT_MODEL_DIR: &str = "data/model";

/// Group that must have a selection when a brand list is loaded.
pub const DEFAULT_REQUIRED_GROUP: &str = "flavors";

/// Default theme name.
pub const DEFAULT_THEME: &str = "dark";

/// Theme names accepted by the TUI.
pub const THEME_NAMES: &[&str] = &["dark", "light", "high-contrast"];

/// Per-group selection limits shipped with the recipe dataset.
const DEFAULT_CAPS: &[(&str, usize)] = &[
    ("colorants", 2),
    ("fats_and_oils", 2),
    ("flavors", 3),
    ("dairy_and_alternatives", 3),
    ("sweeteners", 2),
    ("stabilizers_and_emulsifiers", 2),
    ("acids_and_leavening_agents", 2),
    ("proteins_and_enzymes", 2),
    ("vitamins_and_minerals", 2),
    ("preservatives_and_antioxidantes", 2),
    ("miscellaneous", 2),
];

/// The default cap table as an ordered map.
#[must_use]
pub fn default_caps() -> IndexMap<String, usize> {
    DEFAULT_CAPS
        .iter()
        .map(|(group, cap)| ((*group).to_string(), *cap))
        .collect()
}
