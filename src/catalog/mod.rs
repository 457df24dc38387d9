//! Ingredient catalog: groups of ingredients with per-group selection caps.
//!
//! The catalog is loaded once from a CSV file (`classification`, `ingredient`
//! columns) and is read-only afterwards. Caps are applied from configuration
//! after parsing.

mod csv;

pub use self::csv::{parse_catalog_csv, CatalogRow};

use crate::error::{CatalogErrorKind, ErrorContext, Result, ScoopError};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Maximum number of ingredients selectable within one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cap {
    /// At most `n` ingredients
    Limited(usize),
    /// No limit
    #[default]
    Unbounded,
}

impl Cap {
    /// Build a cap from an optional limit (`None` = unbounded).
    #[must_use]
    pub const fn from_limit(limit: Option<usize>) -> Self {
        match limit {
            Some(n) => Self::Limited(n),
            None => Self::Unbounded,
        }
    }

    /// The numeric limit, if any.
    #[must_use]
    pub const fn limit(self) -> Option<usize> {
        match self {
            Self::Limited(n) => Some(n),
            Self::Unbounded => None,
        }
    }

    /// Whether one more item may be added to a group holding `count` items.
    #[must_use]
    pub const fn allows(self, count: usize) -> bool {
        match self {
            Self::Limited(n) => count < n,
            Self::Unbounded => true,
        }
    }
}

impl fmt::Display for Cap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{n}"),
            Self::Unbounded => f.write_str("∞"),
        }
    }
}

impl Serialize for Cap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.limit().serialize(serializer)
    }
}

/// A named category of ingredients.
#[derive(Debug, Clone, Serialize)]
pub struct IngredientGroup {
    name: String,
    cap: Cap,
    ingredients: IndexSet<String>,
}

impl IngredientGroup {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cap: Cap::Unbounded,
            ingredients: IndexSet::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }

    #[must_use]
    pub const fn cap(&self) -> Cap {
        self.cap
    }

    /// Ingredients in file order.
    pub fn ingredients(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().map(String::as_str)
    }

    #[must_use]
    pub fn ingredient_at(&self, idx: usize) -> Option<&str> {
        self.ingredients.get_index(idx).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    #[must_use]
    pub fn contains(&self, ingredient: &str) -> bool {
        self.ingredients.contains(ingredient)
    }
}

/// Read-only mapping of group name to ingredients and cap.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct IngredientCatalog {
    groups: IndexMap<String, IngredientGroup>,
}

impl IngredientCatalog {
    /// Build a catalog from parsed rows.
    ///
    /// Groups keep first-appearance order and ingredients keep file order.
    /// Duplicate ingredients within a group are dropped.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = CatalogRow>,
    {
        let mut groups: IndexMap<String, IngredientGroup> = IndexMap::new();
        for row in rows {
            let group = groups
                .entry(row.group.clone())
                .or_insert_with(|| IngredientGroup::new(row.group));
            if !group.ingredients.insert(row.ingredient.clone()) {
                tracing::debug!(
                    group = %group.name,
                    ingredient = %row.ingredient,
                    "dropping duplicate catalog entry"
                );
            }
        }

        if groups.is_empty() {
            return Err(ScoopError::catalog(
                "building catalog",
                CatalogErrorKind::Empty,
            ));
        }

        Ok(Self { groups })
    }

    /// Parse a catalog from CSV text.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let rows = parse_catalog_csv(content)?;
        Self::from_rows(rows)
    }

    /// Load a catalog from a CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ScoopError::io(path, e))?;
        let catalog = Self::from_csv_str(&content)
            .with_context(|| format!("at {}", path.display()))?;
        tracing::info!(
            groups = catalog.len(),
            ingredients = catalog.total_ingredients(),
            "loaded ingredient catalog from {}",
            path.display()
        );
        Ok(catalog)
    }

    /// Apply selection caps. Groups missing from `caps` get `default_cap`.
    #[must_use]
    pub fn with_caps(mut self, caps: &IndexMap<String, usize>, default_cap: Cap) -> Self {
        for (name, group) in &mut self.groups {
            group.cap = caps.get(name).map_or(default_cap, |&n| Cap::Limited(n));
        }
        for name in caps.keys() {
            if !self.groups.contains_key(name) {
                tracing::warn!("cap configured for group '{name}' which is not in the catalog");
            }
        }
        self
    }

    /// Groups in catalog order.
    pub fn groups(&self) -> impl Iterator<Item = &IngredientGroup> {
        self.groups.values()
    }

    #[must_use]
    pub fn group(&self, name: &str) -> Option<&IngredientGroup> {
        self.groups.get(name)
    }

    #[must_use]
    pub fn group_at(&self, idx: usize) -> Option<&IngredientGroup> {
        self.groups.get_index(idx).map(|(_, g)| g)
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn total_ingredients(&self) -> usize {
        self.groups.values().map(IngredientGroup::len).sum()
    }

    /// Names of the groups that list `ingredient`.
    #[must_use]
    pub fn groups_containing(&self, ingredient: &str) -> Vec<&str> {
        self.groups
            .values()
            .filter(|g| g.contains(ingredient))
            .map(IngredientGroup::name)
            .collect()
    }

    /// Check that `ingredient` exists in `group`, suggesting a close match otherwise.
    pub fn resolve(&self, group: &str, ingredient: &str) -> Result<()> {
        let Some(entry) = self.groups.get(group) else {
            return Err(ScoopError::catalog(
                "resolving selection",
                CatalogErrorKind::UnknownGroup {
                    group: group.to_string(),
                    suggestion: closest_match(group, self.groups.keys().map(String::as_str)),
                },
            ));
        };

        if entry.contains(ingredient) {
            Ok(())
        } else {
            Err(ScoopError::catalog(
                "resolving selection",
                CatalogErrorKind::UnknownIngredient {
                    group: group.to_string(),
                    ingredient: ingredient.to_string(),
                    suggestion: closest_match(ingredient, entry.ingredients()),
                },
            ))
        }
    }
}

/// Find the candidate most similar to `needle`, if it is similar enough.
#[must_use]
pub fn closest_match<'a, I>(needle: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = needle.to_lowercase();
    candidates
        .into_iter()
        .map(|c| (c, strsim::jaro_winkler(&needle, &c.to_lowercase())))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c.to_string())
}

/// Render a `snake_case` identifier as a title ("fats_and_oils" -> "Fats And Oils").
#[must_use]
pub fn display_name(identifier: &str) -> String {
    identifier
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
