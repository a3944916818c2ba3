use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Slot a recipe is eaten in. The week grid is days x meal types.
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MealType {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    /// Albanian meal label, as shown to the app's audience.
    pub fn label_sq(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Mëngjes",
            MealType::Lunch => "Drekë",
            MealType::Dinner => "Darkë",
        }
    }
}

/// Cooking skill a recipe suits. Levels map to indicator tags found in
/// catalog data, so a plan can lean toward recipes the cook can handle.
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Catalog tags that signal a recipe fits this level. Intermediate cooks
    /// get no nudge in either direction.
    pub fn indicator_tags(&self) -> &'static [&'static str] {
        match self {
            SkillLevel::Beginner => &["quick", "easy", "simple"],
            SkillLevel::Intermediate => &[],
            SkillLevel::Advanced => &["complex", "advanced", "gourmet"],
        }
    }
}

/// One catalog entry. Ingredient lines are free text ("200g chicken breast");
/// the planner and shopping list treat them as opaque strings.
///
/// Catalogs in the wild are sparse, so everything except the name and the
/// meal type defaults when missing.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Recipe {
    pub name: String,
    pub meal_type: MealType,
    #[serde(default)]
    pub kcal: u32,
    #[serde(default)]
    pub protein: u32,
    #[serde(default)]
    pub carbs: u32,
    #[serde(default)]
    pub fat: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}
