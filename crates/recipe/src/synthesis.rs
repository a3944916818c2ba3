use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, SynthesisError};
use crate::types::{MealType, Recipe, SkillLevel};

/// Tag stamped on every recipe that came out of a synthesizer.
pub const SYNTHESIZED_TAG: &str = "AI";

/// What a synthesizer is asked for: one recipe for one slot, aimed at the
/// slot's calorie target and the caller's taste.
#[derive(Clone, Debug, Serialize)]
pub struct SynthesisRequest {
    pub meal_type: MealType,
    pub target_kcal: u32,
    /// Preference tags, already augmented with the skill indicator tags.
    pub tags: Vec<String>,
    /// Keywords the result must not contain.
    pub exclude: Vec<String>,
    pub skill: Option<SkillLevel>,
}

/// Structured payload a synthesizer answers with. Every field except the
/// name is optional; promotion fills the gaps.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RecipeDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kcal: Option<u32>,
    #[serde(default)]
    pub protein: Option<u32>,
    #[serde(default)]
    pub carbs: Option<u32>,
    #[serde(default)]
    pub fat: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

impl RecipeDraft {
    /// Parse a raw backend response. Backends that already produce typed
    /// drafts can skip this.
    pub fn from_json(raw: &str) -> Result<Self, SynthesisError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Promote a draft into a catalog-grade [`Recipe`].
    ///
    /// A draft with a blank name is rejected. Missing calories fall back to
    /// the slot target the draft was requested for, missing macros to zero,
    /// and the [`SYNTHESIZED_TAG`] is appended so synthesized recipes stay
    /// recognizable in plans and stored catalogs.
    pub fn into_recipe(
        self,
        meal_type: MealType,
        fallback_kcal: u32,
    ) -> Result<Recipe, SynthesisError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(SynthesisError::MissingName);
        }

        let mut tags = self.tags;
        if !tags.iter().any(|t| t == SYNTHESIZED_TAG) {
            tags.push(SYNTHESIZED_TAG.to_string());
        }

        Ok(Recipe {
            name,
            meal_type,
            kcal: self.kcal.unwrap_or(fallback_kcal),
            protein: self.protein.unwrap_or(0),
            carbs: self.carbs.unwrap_or(0),
            fat: self.fat.unwrap_or(0),
            tags,
            ingredients: self.ingredients,
            steps: self.steps,
        })
    }
}

/// Produces a recipe draft for a slot the catalog could not fill, or when
/// the planner rolls for novelty. Implementations typically wrap an LLM or
/// another generative backend; the planner only sees this seam.
pub trait RecipeSynthesizer {
    fn synthesize(&self, request: &SynthesisRequest) -> Result<RecipeDraft, SynthesisError>;
}

/// Persists synthesized recipes so later runs can reuse them.
pub trait RecipeStore {
    /// Store a recipe unless one with the same name (case-insensitive) and
    /// meal type is already known. Returns whether the recipe was new.
    fn store_if_new(&self, recipe: &Recipe) -> Result<bool, CatalogError>;
}
