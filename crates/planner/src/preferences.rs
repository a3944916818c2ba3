use std::collections::BTreeMap;

use recipe::SkillLevel;
use serde::{Deserialize, Serialize};

use crate::energy::DEFAULT_SPLIT_PATTERN;

/// Aggregated rating the caller has learned for one food item, fed into the
/// scorer as a per-ingredient bonus.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct FoodPreference {
    /// Average rating on a 1..5 scale; 3 is neutral.
    pub avg_rating: f32,
    /// How many ratings back the average. More ratings, more influence.
    pub rating_count: u32,
}

/// Everything one planning run needs from the caller.
// Ratings live in a BTreeMap so score sums always run in the same order;
// float addition order must not vary between seeded runs.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlanRequest {
    /// Daily calorie target. Must be greater than zero.
    pub total_kcal: u32,
    /// Breakfast/lunch/dinner proportions, e.g. "30/40/30".
    #[serde(default = "default_split_pattern")]
    pub split_pattern: String,
    /// Tags the eater prefers; narrows pools softly and earns score bonuses.
    #[serde(default)]
    pub preference_tags: Vec<String>,
    /// Keywords that must not appear in a chosen recipe.
    #[serde(default)]
    pub exclude_keywords: Vec<String>,
    /// Food item ratings, keyed by item name ("chicken", "qiqra").
    #[serde(default)]
    pub user_preferences: BTreeMap<String, FoodPreference>,
    #[serde(default)]
    pub skill: SkillLevel,
    /// Seed for reproducible plans; `None` seeds from the clock.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PlanRequest {
    pub fn new(total_kcal: u32) -> Self {
        Self {
            total_kcal,
            split_pattern: default_split_pattern(),
            preference_tags: Vec::new(),
            exclude_keywords: Vec::new(),
            user_preferences: BTreeMap::new(),
            skill: SkillLevel::default(),
            seed: None,
        }
    }
}

fn default_split_pattern() -> String {
    DEFAULT_SPLIT_PATTERN.to_string()
}

/// Knobs for the randomized selection step.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct SelectionTuning {
    /// Top-ranked candidates the random pick draws from. Must be at least 1.
    pub shortlist_size: usize,
    /// Chance of asking the synthesizer even though a candidate exists.
    /// Must lie within [0, 1]. Only applies when a synthesizer is wired in.
    pub novelty_probability: f64,
}

impl Default for SelectionTuning {
    fn default() -> Self {
        Self {
            shortlist_size: 5,
            novelty_probability: 0.25,
        }
    }
}

/// Weights of the slot scoring formula. The defaults are the production
/// values; they are exposed so deployments can retune without code changes.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Calories of deviation from the slot target that cost one point.
    pub kcal_per_point: f32,
    /// Penalty for a name already used this week; large enough to push a
    /// reused recipe below any fresh candidate.
    pub reuse_penalty: f32,
    /// Penalty per prior use of the candidate's protein label this week.
    pub protein_repeat_penalty: f32,
    /// Penalty for repeating the protein served last in this slot type.
    pub consecutive_protein_penalty: f32,
    /// Reward per preference tag the candidate carries.
    pub tag_overlap_reward: f32,
    /// Scale of the per-ingredient rating bonus.
    pub rating_weight: f32,
    /// Rating count at which a food preference reaches full influence.
    pub rating_confidence_ceiling: f32,
    /// Reward when a candidate carries a tag indicating the cook's skill.
    pub skill_match_bonus: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            kcal_per_point: 10.0,
            reuse_penalty: 100.0,
            protein_repeat_penalty: 0.8,
            consecutive_protein_penalty: 0.8,
            tag_overlap_reward: 0.3,
            rating_weight: 0.2,
            rating_confidence_ceiling: 5.0,
            skill_match_bonus: 0.5,
        }
    }
}
