use std::collections::HashMap;

use planner::WeeklyPlan;

/// Shopping List Builder
///
/// Stateless service that folds a week's filled slots into a shopping list.
/// Ingredient lines are opaque: "200g chicken breast" is one item, counted
/// once per slot that uses it. No quantity parsing or unit conversion
/// happens here; identical lines aggregate, differing lines stay separate.
pub struct ShoppingListBuilder;

impl ShoppingListBuilder {
    /// Count ingredient lines across every filled slot, keyed by the
    /// trimmed line text. Unfilled slots contribute nothing, and lines
    /// that are blank after trimming are dropped.
    pub fn build(plan: &WeeklyPlan) -> HashMap<String, u32> {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for (_, _, recipe) in plan.filled_slots() {
            for line in &recipe.ingredients {
                let key = line.trim();
                if key.is_empty() {
                    continue;
                }
                *counts.entry(key.to_string()).or_insert(0) += 1;
            }
        }
        tracing::debug!(items = counts.len(), "shopping list built");
        counts
    }

    /// Deterministic display order: highest count first, ties alphabetical.
    pub fn sorted_for_display(counts: &HashMap<String, u32>) -> Vec<(String, u32)> {
        let mut entries: Vec<(String, u32)> = counts
            .iter()
            .map(|(line, count)| (line.clone(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}
