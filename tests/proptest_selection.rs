//! Property-based tests for selection and prediction invariants.
//!
//! Random toggle sequences must never push a group past its cap, and the
//! predicted rating must only depend on which ingredients are selected.

use indexmap::IndexMap;
use proptest::prelude::*;
use scoop::catalog::Cap;
use scoop::regression::{LinearModel, PersistedModel};
use scoop::{
    IngredientCatalog, ModelColumnOrder, RatingCorrection, RatingPredictor, SelectionState,
};
use std::sync::Arc;

const GROUPS: &[(&str, &[&str], usize)] = &[
    ("flavors", &["vanilla", "chocolate", "strawberry", "mint", "coffee"], 3),
    ("sweeteners", &["sugar", "honey", "corn syrup"], 2),
    ("miscellaneous", &["salt", "pretzel", "caramel", "fudge"], 1),
];

fn catalog() -> IngredientCatalog {
    let mut csv = String::from("classification,ingredient\n");
    let mut caps = IndexMap::new();
    for (group, ingredients, cap) in GROUPS {
        for ingredient in *ingredients {
            csv.push_str(&format!("{group},{ingredient}\n"));
        }
        caps.insert((*group).to_string(), *cap);
    }
    IngredientCatalog::from_csv_str(&csv)
        .unwrap()
        .with_caps(&caps, Cap::Unbounded)
}

fn predictor() -> RatingPredictor {
    let names: Vec<&str> = GROUPS.iter().flat_map(|(_, i, _)| i.iter().copied()).collect();
    let coefficients = (0..names.len())
        .map(|i| (i as f64 - 6.0) * 0.003)
        .collect();
    let model = PersistedModel::Linear(LinearModel {
        intercept: 4.45,
        coefficients,
    });
    let columns = ModelColumnOrder::new(names).unwrap();
    RatingPredictor::new(Arc::new(model), columns, RatingCorrection::default()).unwrap()
}

/// A toggle as (group index, ingredient index), wrapped into range on use.
fn toggle_strategy() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..GROUPS.len(), 0..8usize), 0..60)
}

fn apply(selection: &mut SelectionState, toggles: &[(usize, usize)]) {
    for &(g, i) in toggles {
        let (group, ingredients, _) = GROUPS[g];
        let _ = selection.toggle(group, ingredients[i % ingredients.len()]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn count_never_exceeds_cap(toggles in toggle_strategy()) {
        let catalog = catalog();
        let mut selection = SelectionState::new(&catalog);
        for &(g, i) in &toggles {
            let (group, ingredients, cap) = GROUPS[g];
            let before = selection.count(group);
            let result = selection.toggle(group, ingredients[i % ingredients.len()]);

            prop_assert!(selection.count(group) <= cap);
            if result.is_err() {
                prop_assert_eq!(selection.count(group), before);
                prop_assert_eq!(before, cap);
            }
        }
    }

    #[test]
    fn remove_always_succeeds(toggles in toggle_strategy()) {
        let catalog = catalog();
        let mut selection = SelectionState::new(&catalog);
        apply(&mut selection, &toggles);

        for (group, _, _) in GROUPS {
            let chosen: Vec<String> = selection.selected(group).map(str::to_string).collect();
            for ingredient in chosen {
                prop_assert!(selection.toggle(group, &ingredient).is_ok());
            }
        }
        prop_assert!(selection.is_empty());
    }

    #[test]
    fn rating_ignores_toggle_order(toggles in toggle_strategy()) {
        let catalog = catalog();
        let predictor = predictor();

        let mut forward = SelectionState::new(&catalog);
        apply(&mut forward, &toggles);

        // Rebuild the same final selection in reverse catalog order
        let mut backward = SelectionState::new(&catalog);
        for (group, _, _) in GROUPS.iter().rev() {
            let mut chosen: Vec<&str> = forward.selected(group).collect();
            chosen.reverse();
            for ingredient in chosen {
                prop_assert!(backward.toggle(group, ingredient).is_ok());
            }
        }

        prop_assert_eq!(predictor.predict(&forward), predictor.predict(&backward));
    }

    #[test]
    fn rating_stays_in_bounds(raw in -100.0f64..100.0) {
        let rating = RatingCorrection::default().apply(raw).value();
        prop_assert!((3.0..=4.81).contains(&rating));
    }
}
