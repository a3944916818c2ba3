use recipe::{MealType, Recipe};

/// Narrow a catalog to candidates for one slot type.
///
/// Exclusion keywords are a hard gate: a recipe whose name or ingredient
/// lines contain any of them (case-insensitive substring) is out. Blank
/// keywords are ignored. Preference tags only narrow softly: when no
/// survivor carries a wanted tag, the whole exclusion-filtered pool comes
/// back rather than nothing, since exclusions protect health and taste
/// while preferences are just taste.
pub fn filter_recipes<'a>(
    catalog: &'a [Recipe],
    meal_type: MealType,
    preference_tags: &[String],
    exclude_keywords: &[String],
) -> Vec<&'a Recipe> {
    let exclusions: Vec<String> = exclude_keywords
        .iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect();

    let pool: Vec<&Recipe> = catalog
        .iter()
        .filter(|recipe| recipe.meal_type == meal_type)
        .filter(|recipe| {
            exclusions.is_empty() || {
                let text = exclusion_text(recipe);
                !exclusions.iter().any(|keyword| text.contains(keyword))
            }
        })
        .collect();

    if preference_tags.is_empty() {
        return pool;
    }

    let preferred: Vec<&Recipe> = pool
        .iter()
        .filter(|recipe| {
            recipe
                .tags
                .iter()
                .any(|tag| preference_tags.iter().any(|wanted| wanted == tag))
        })
        .copied()
        .collect();

    if preferred.is_empty() { pool } else { preferred }
}

/// Text scanned for exclusion keywords: the name plus every ingredient
/// line, lowercased. Tags are deliberately not scanned; exclusions target
/// what is in the food, not how it is labeled.
pub(crate) fn exclusion_text(recipe: &Recipe) -> String {
    let mut text = recipe.name.to_lowercase();
    for line in &recipe.ingredients {
        text.push(' ');
        text.push_str(&line.to_lowercase());
    }
    text
}
