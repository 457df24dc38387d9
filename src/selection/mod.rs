//! Per-group ingredient selection with capacity limits.
//!
//! [`SelectionState`] is an explicit value owned by the caller (the form or
//! the `predict` command). It is mutated only through [`SelectionState::toggle`],
//! [`SelectionState::set_brand`] and [`SelectionState::reset`], which keep
//! `count(group) <= cap(group)` for every group.

use crate::catalog::{Cap, IngredientCatalog};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use thiserror::Error;

/// A rejected toggle. Non-fatal: the state is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("You can only select up to {cap} ingredients from {}", crate::catalog::display_name(.group))]
    AtCapacity { group: String, cap: usize },

    #[error("Unknown ingredient group '{0}'")]
    UnknownGroup(String),
}

/// What a successful toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// Whether the current selection may be submitted for prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReadiness {
    Ready,
    /// No ingredient selected in any group
    NothingSelected,
    /// The named group must contain at least one ingredient
    MissingRequiredGroup(String),
}

impl SubmitReadiness {
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Short reason shown next to a disabled submit action.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Ready => None,
            Self::NothingSelected => Some("select at least one ingredient".to_string()),
            Self::MissingRequiredGroup(group) => Some(format!(
                "select at least one ingredient from {}",
                crate::catalog::display_name(group)
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
struct GroupSelection {
    #[serde(skip)]
    cap: Cap,
    chosen: IndexSet<String>,
}

/// Selected ingredients per group plus an optional brand.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionState {
    groups: IndexMap<String, GroupSelection>,
    brand: Option<String>,
}

impl SelectionState {
    /// Create an empty selection with one entry per catalog group.
    #[must_use]
    pub fn new(catalog: &IngredientCatalog) -> Self {
        let groups = catalog
            .groups()
            .map(|g| {
                (
                    g.name().to_string(),
                    GroupSelection {
                        cap: g.cap(),
                        chosen: IndexSet::new(),
                    },
                )
            })
            .collect();
        Self {
            groups,
            brand: None,
        }
    }

    /// Toggle `ingredient` within `group`.
    ///
    /// A selected ingredient is always removed. An unselected one is added
    /// only while the group is below its cap; otherwise
    /// [`SelectionError::AtCapacity`] is returned and nothing changes.
    pub fn toggle(&mut self, group: &str, ingredient: &str) -> Result<ToggleOutcome, SelectionError> {
        let entry = self
            .groups
            .get_mut(group)
            .ok_or_else(|| SelectionError::UnknownGroup(group.to_string()))?;

        if entry.chosen.shift_remove(ingredient) {
            tracing::debug!(group, ingredient, "deselected");
            return Ok(ToggleOutcome::Removed);
        }

        if !entry.cap.allows(entry.chosen.len()) {
            let cap = entry.cap.limit().unwrap_or(entry.chosen.len());
            tracing::debug!(group, ingredient, cap, "rejected: group at capacity");
            return Err(SelectionError::AtCapacity {
                group: group.to_string(),
                cap,
            });
        }

        entry.chosen.insert(ingredient.to_string());
        tracing::debug!(group, ingredient, "selected");
        Ok(ToggleOutcome::Added)
    }

    /// Clear every group selection and the brand.
    pub fn reset(&mut self) {
        for entry in self.groups.values_mut() {
            entry.chosen.clear();
        }
        self.brand = None;
    }

    pub fn set_brand(&mut self, brand: Option<String>) {
        self.brand = brand;
    }

    #[must_use]
    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    /// Selected ingredients of `group` in selection order.
    pub fn selected(&self, group: &str) -> impl Iterator<Item = &str> {
        self.groups
            .get(group)
            .into_iter()
            .flat_map(|g| g.chosen.iter().map(String::as_str))
    }

    #[must_use]
    pub fn is_selected(&self, group: &str, ingredient: &str) -> bool {
        self.groups
            .get(group)
            .is_some_and(|g| g.chosen.contains(ingredient))
    }

    #[must_use]
    pub fn count(&self, group: &str) -> usize {
        self.groups.get(group).map_or(0, |g| g.chosen.len())
    }

    #[must_use]
    pub fn cap(&self, group: &str) -> Option<Cap> {
        self.groups.get(group).map(|g| g.cap)
    }

    /// Whether no further ingredient can be added to `group`.
    #[must_use]
    pub fn is_at_capacity(&self, group: &str) -> bool {
        self.groups
            .get(group)
            .is_some_and(|g| !g.cap.allows(g.chosen.len()))
    }

    /// `(group, selected ingredients)` pairs in catalog order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.groups.iter().map(|(name, g)| {
            (
                name.as_str(),
                g.chosen.iter().map(String::as_str).collect(),
            )
        })
    }

    /// Every selected ingredient across all groups, in catalog order.
    pub fn all_selected(&self) -> impl Iterator<Item = &str> {
        self.groups
            .values()
            .flat_map(|g| g.chosen.iter().map(String::as_str))
    }

    #[must_use]
    pub fn total_selected(&self) -> usize {
        self.groups.values().map(|g| g.chosen.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_selected() == 0
    }

    /// Check submit preconditions.
    ///
    /// `required_group` is only enforced when the catalog actually has it.
    #[must_use]
    pub fn submit_readiness(&self, required_group: Option<&str>) -> SubmitReadiness {
        if self.is_empty() {
            return SubmitReadiness::NothingSelected;
        }
        match required_group {
            Some(group) if self.groups.contains_key(group) && self.count(group) == 0 => {
                SubmitReadiness::MissingRequiredGroup(group.to_string())
            }
            _ => SubmitReadiness::Ready,
        }
    }
}
