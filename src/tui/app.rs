//! Application state for the ingredient form.

use super::constants::STATUS_TIMEOUT;
use super::state::ListState;
use super::viewmodel::StatusMessage;
use crate::catalog::{IngredientCatalog, IngredientGroup};
use crate::predict::{Prediction, RatingPredictor};
use crate::selection::{SelectionState, SubmitReadiness, ToggleOutcome};

/// Which panel has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPanel {
    Groups,
    Ingredients,
    Brands,
}

impl FocusPanel {
    /// Name used for footer hints.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Groups => "groups",
            Self::Ingredients => "ingredients",
            Self::Brands => "brands",
        }
    }
}

/// Whether predictions can be made in this session.
#[derive(Debug, Clone)]
pub enum PredictorStatus {
    Ready(RatingPredictor),
    /// Model artifacts failed to load; the reason is shown to the user
    Unavailable(String),
}

/// State of the interactive form.
#[derive(Debug)]
pub struct FormApp {
    pub catalog: IngredientCatalog,
    pub selection: SelectionState,
    pub predictor: PredictorStatus,
    /// Known brand identifiers; empty unless a brand list was loaded
    pub brands: Vec<String>,
    /// Group that must have a selection before submitting
    pub required_group: Option<String>,
    pub focus: FocusPanel,
    pub groups_list: ListState,
    pub ingredients_list: ListState,
    pub brands_list: ListState,
    pub status: StatusMessage,
    pub last_prediction: Option<Prediction>,
    pub show_help: bool,
    pub should_quit: bool,
    pub tick: u64,
}

impl FormApp {
    /// Create the form.
    ///
    /// `required_group` is only enforced when `brands` is non-empty.
    #[must_use]
    pub fn new(
        catalog: IngredientCatalog,
        predictor: PredictorStatus,
        brands: Vec<String>,
        required_group: Option<String>,
    ) -> Self {
        let selection = SelectionState::new(&catalog);
        let groups_list = ListState::with_total(catalog.len());
        let ingredients_list =
            ListState::with_total(catalog.group_at(0).map_or(0, IngredientGroup::len));
        let brands_list = ListState::with_total(brands.len());
        let required_group = if brands.is_empty() { None } else { required_group };

        let mut status = StatusMessage::with_auto_clear(STATUS_TIMEOUT);
        if let PredictorStatus::Unavailable(reason) = &predictor {
            status.error(format!("Rating prediction unavailable: {reason}"));
        }

        Self {
            catalog,
            selection,
            predictor,
            brands,
            required_group,
            focus: FocusPanel::Groups,
            groups_list,
            ingredients_list,
            brands_list,
            status,
            last_prediction: None,
            show_help: false,
            should_quit: false,
            tick: 0,
        }
    }

    #[must_use]
    pub fn is_brand_aware(&self) -> bool {
        !self.brands.is_empty()
    }

    #[must_use]
    pub const fn predictor_available(&self) -> bool {
        matches!(self.predictor, PredictorStatus::Ready(_))
    }

    /// Group under the groups cursor.
    #[must_use]
    pub fn current_group(&self) -> Option<&IngredientGroup> {
        self.catalog.group_at(self.groups_list.selected)
    }

    /// Ingredient under the ingredients cursor.
    #[must_use]
    pub fn current_ingredient(&self) -> Option<&str> {
        self.current_group()
            .and_then(|g| g.ingredient_at(self.ingredients_list.selected))
    }

    /// An ingredient that cannot be ticked because its group is full.
    #[must_use]
    pub fn is_disabled(&self, group: &str, ingredient: &str) -> bool {
        !self.selection.is_selected(group, ingredient) && self.selection.is_at_capacity(group)
    }

    #[must_use]
    pub fn readiness(&self) -> SubmitReadiness {
        self.selection
            .submit_readiness(self.required_group.as_deref())
    }

    // ------------------------------------------------------------------
    // Focus and navigation
    // ------------------------------------------------------------------

    pub fn next_panel(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Groups => FocusPanel::Ingredients,
            FocusPanel::Ingredients if self.is_brand_aware() => FocusPanel::Brands,
            FocusPanel::Ingredients | FocusPanel::Brands => FocusPanel::Groups,
        };
    }

    pub fn prev_panel(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Groups if self.is_brand_aware() => FocusPanel::Brands,
            FocusPanel::Groups | FocusPanel::Brands => FocusPanel::Ingredients,
            FocusPanel::Ingredients => FocusPanel::Groups,
        };
    }

    fn focused_list(&mut self) -> &mut ListState {
        match self.focus {
            FocusPanel::Groups => &mut self.groups_list,
            FocusPanel::Ingredients => &mut self.ingredients_list,
            FocusPanel::Brands => &mut self.brands_list,
        }
    }

    /// Apply a navigation action to the focused list.
    pub fn navigate(&mut self, action: impl FnOnce(&mut ListState)) {
        let before = self.groups_list.selected;
        action(self.focused_list());
        if self.focus == FocusPanel::Groups && self.groups_list.selected != before {
            self.sync_ingredients();
        }
    }

    fn sync_ingredients(&mut self) {
        let len = self.current_group().map_or(0, IngredientGroup::len);
        self.ingredients_list = ListState::with_total(len);
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Enter/Space on the focused panel.
    pub fn activate(&mut self) {
        match self.focus {
            FocusPanel::Groups => self.focus = FocusPanel::Ingredients,
            FocusPanel::Ingredients => self.toggle_current(),
            FocusPanel::Brands => self.pick_current_brand(),
        }
    }

    /// Tick or untick the ingredient under the cursor.
    pub fn toggle_current(&mut self) {
        let Some(group) = self.current_group().map(|g| g.name().to_string()) else {
            return;
        };
        let Some(ingredient) = self.current_ingredient().map(str::to_string) else {
            return;
        };

        match self.selection.toggle(&group, &ingredient) {
            Ok(ToggleOutcome::Added | ToggleOutcome::Removed) => {
                self.last_prediction = None;
            }
            Err(err) => self.status.warn(err.to_string()),
        }
    }

    /// Choose the brand under the cursor; choosing the current brand clears it.
    pub fn pick_current_brand(&mut self) {
        let Some(brand) = self.brands.get(self.brands_list.selected).cloned() else {
            return;
        };
        if self.selection.brand() == Some(brand.as_str()) {
            self.selection.set_brand(None);
        } else {
            self.selection.set_brand(Some(brand));
        }
        self.last_prediction = None;
    }

    /// Predict a rating for the current selection.
    pub fn submit(&mut self) {
        if let Some(reason) = self.readiness().reason() {
            self.status.warn(format!("Cannot submit: {reason}"));
            return;
        }

        match &self.predictor {
            PredictorStatus::Ready(predictor) => {
                let prediction = predictor.predict(&self.selection);
                self.status.set(format!(
                    "Predicted rating {} ({})",
                    prediction.rating, prediction.band
                ));
                self.last_prediction = Some(prediction);
            }
            PredictorStatus::Unavailable(reason) => {
                self.status
                    .error(format!("Rating prediction unavailable: {reason}"));
            }
        }
    }

    /// Clear every selection and the brand.
    pub fn reset(&mut self) {
        self.selection.reset();
        self.last_prediction = None;
        self.status.set("Selections cleared");
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
