use std::collections::{HashMap, HashSet};

use recipe::{MealType, Recipe};
use serde::{Deserialize, Serialize};

use crate::protein::ProteinLabel;

/// Memory of what a planning run has already committed. Slots are filled one
/// at a time; this is the only state the scorer consults between slots.
///
/// Callers can pre-populate one (for example with last week's names) and pass
/// it to [`crate::WeekPlanner::generate_with_state`] to extend variety
/// pressure across runs.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SelectionState {
    used_names: HashSet<String>,
    used_names_by_meal: HashMap<MealType, HashSet<String>>,
    protein_usage: HashMap<ProteinLabel, u32>,
    last_protein_by_meal: HashMap<MealType, ProteinLabel>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a recipe name was already committed this run, either anywhere
    /// in the week or in this meal slot type.
    pub fn is_name_used(&self, name: &str, meal: MealType) -> bool {
        self.used_names.contains(name)
            || self
                .used_names_by_meal
                .get(&meal)
                .is_some_and(|names| names.contains(name))
    }

    /// Reserve a name so no slot of the week can use it. This is the hook for
    /// cross-run variety: seed the state with names from previous weeks.
    pub fn reserve_name(&mut self, name: impl Into<String>) {
        self.used_names.insert(name.into());
    }

    /// How many committed recipes carried this protein label.
    pub fn protein_usage(&self, label: ProteinLabel) -> u32 {
        self.protein_usage.get(&label).copied().unwrap_or(0)
    }

    /// Protein label of the most recently committed recipe for this meal
    /// slot type, if any recipe was committed for it.
    pub fn last_protein(&self, meal: MealType) -> Option<ProteinLabel> {
        self.last_protein_by_meal.get(&meal).copied()
    }

    pub fn used_count(&self) -> usize {
        self.used_names.len()
    }

    /// Record a committed recipe: name into both used sets, protein counter
    /// bumped, and the protein remembered as last-used for the slot type.
    pub fn commit(&mut self, recipe: &Recipe) {
        let label = ProteinLabel::classify(recipe);
        self.used_names.insert(recipe.name.clone());
        self.used_names_by_meal
            .entry(recipe.meal_type)
            .or_default()
            .insert(recipe.name.clone());
        *self.protein_usage.entry(label).or_insert(0) += 1;
        self.last_protein_by_meal.insert(recipe.meal_type, label);
    }
}
