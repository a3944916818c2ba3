use std::collections::HashSet;

use recipe::Recipe;

use crate::energy::MealCalorieTargets;
use crate::preferences::{PlanRequest, ScoreWeights};
use crate::protein::ProteinLabel;
use crate::state::SelectionState;

/// Score one candidate for one slot. Higher is better; scores are relative,
/// not meaningful on their own.
///
/// Calorie fit sets the baseline: every `kcal_per_point` kcal away from the
/// slot target costs a point. Diversity pressure subtracts for reused names
/// and repeated proteins, preference tags and liked ingredients add, and a
/// skill-indicator tag adds a flat bonus.
pub(crate) fn score_candidate(
    recipe: &Recipe,
    targets: &MealCalorieTargets,
    request: &PlanRequest,
    state: &SelectionState,
    weights: &ScoreWeights,
) -> f32 {
    let target = targets.for_meal(recipe.meal_type);
    let mut score = -((recipe.kcal as f32 - target as f32).abs() / weights.kcal_per_point);

    if state.is_name_used(&recipe.name, recipe.meal_type) {
        score -= weights.reuse_penalty;
    }

    let label = ProteinLabel::classify(recipe);
    score -= weights.protein_repeat_penalty * state.protein_usage(label) as f32;
    if state.last_protein(recipe.meal_type) == Some(label) {
        score -= weights.consecutive_protein_penalty;
    }

    if !request.preference_tags.is_empty() {
        let recipe_tags: HashSet<&str> = recipe.tags.iter().map(String::as_str).collect();
        let wanted: HashSet<&str> = request.preference_tags.iter().map(String::as_str).collect();
        let overlap = recipe_tags.intersection(&wanted).count();
        score += weights.tag_overlap_reward * overlap as f32;
    }

    score += rating_bonus(recipe, request, weights);

    let indicators = request.skill.indicator_tags();
    if !indicators.is_empty()
        && recipe.tags.iter().any(|tag| indicators.contains(&tag.as_str()))
    {
        score += weights.skill_match_bonus;
    }

    score
}

/// Per-ingredient bonus from learned food ratings. The lead word of each
/// ingredient line is compared against rated item names by substring in
/// either direction; lines that lead with a quantity ("200g chicken") never
/// match a food-name rating. Neutral ratings (3.0) contribute nothing; low
/// ratings subtract. Influence ramps with the rating count until it
/// saturates.
fn rating_bonus(recipe: &Recipe, request: &PlanRequest, weights: &ScoreWeights) -> f32 {
    if request.user_preferences.is_empty() {
        return 0.0;
    }

    let mut bonus = 0.0;
    for line in &recipe.ingredients {
        let lowered = line.to_lowercase();
        let Some(lead) = lowered.split_whitespace().next() else {
            continue;
        };
        for (item, preference) in &request.user_preferences {
            let item = item.to_lowercase();
            if lead.contains(&item) || item.contains(lead) {
                let confidence =
                    (preference.rating_count as f32 / weights.rating_confidence_ceiling).min(1.0);
                bonus += (preference.avg_rating - 3.0) * weights.rating_weight * confidence;
            }
        }
    }
    bonus
}
