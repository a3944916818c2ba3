use std::collections::HashMap;
use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::Args;
use planner::ProteinLabel;
use recipe::{load_merged, MealType, Recipe, SYNTHESIZED_TAG};
use strum::VariantArray;

use crate::config::Config;

#[derive(Args)]
pub struct StatsArgs {
    /// Recipe catalog path (overrides the config file)
    #[arg(long)]
    pub catalog: Option<String>,
}

pub fn run(config: &Config, args: StatsArgs) -> Result<()> {
    let base_path = args.catalog.as_deref().unwrap_or(&config.catalog.path);
    let catalog = load_merged(base_path, &config.catalog.user_path)
        .with_context(|| format!("Failed to load recipe catalog from {base_path}"))?;

    print!("{}", render_stats(&catalog));
    Ok(())
}

fn render_stats(catalog: &[Recipe]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Katalogu: {} receta", catalog.len());

    for meal in MealType::VARIANTS.iter().copied() {
        let kcals: Vec<u32> = catalog
            .iter()
            .filter(|recipe| recipe.meal_type == meal)
            .map(|recipe| recipe.kcal)
            .collect();
        let avg = if kcals.is_empty() {
            0
        } else {
            kcals.iter().sum::<u32>() / kcals.len() as u32
        };
        let _ = writeln!(
            out,
            "  {:<8} {:>3} receta, mesatarja {} kcal",
            meal.label_sq(),
            kcals.len(),
            avg
        );
    }

    let mut proteins: HashMap<ProteinLabel, u32> = HashMap::new();
    for recipe in catalog {
        *proteins.entry(ProteinLabel::classify(recipe)).or_default() += 1;
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Proteina kryesore:");
    for label in ProteinLabel::VARIANTS.iter().copied() {
        if let Some(count) = proteins.get(&label) {
            let _ = writeln!(out, "  {label:<8} {count}");
        }
    }

    let synthesized = catalog
        .iter()
        .filter(|recipe| recipe.tags.iter().any(|tag| tag == SYNTHESIZED_TAG))
        .count();
    let _ = writeln!(out);
    let _ = writeln!(out, "Receta AI: {synthesized}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(name: &str, meal_type: MealType, kcal: u32, ingredient: &str) -> Recipe {
        Recipe {
            name: name.to_string(),
            meal_type,
            kcal,
            protein: 30,
            carbs: 40,
            fat: 15,
            tags: vec![],
            ingredients: vec![ingredient.to_string()],
            steps: vec![],
        }
    }

    #[test]
    fn counts_recipes_per_meal_type() {
        let catalog = vec![
            recipe("Omëletë", MealType::Breakfast, 400, "3 vezë"),
            recipe("Pulë me oriz", MealType::Lunch, 700, "200g pulë"),
            recipe("Peshk në furrë", MealType::Dinner, 600, "200g peshk"),
            recipe("Supë peshku", MealType::Dinner, 500, "150g peshk"),
        ];

        let text = render_stats(&catalog);
        assert!(text.contains("Katalogu: 4 receta"));
        assert!(text.contains("Darkë"));
        // Two dinners averaging 550 kcal.
        assert!(text.contains("2 receta, mesatarja 550 kcal"));
    }

    #[test]
    fn protein_distribution_lists_only_present_labels() {
        let catalog = vec![
            recipe("Pulë me oriz", MealType::Lunch, 700, "200g pulë"),
            recipe("Fileto pule", MealType::Dinner, 600, "180g pulë"),
        ];

        let text = render_stats(&catalog);
        assert!(text.contains("poultry"));
        assert!(!text.contains("beef"));
    }

    #[test]
    fn counts_synthesized_recipes() {
        let mut synthesized = recipe("Krijim AI", MealType::Dinner, 600, "200g pulë");
        synthesized.tags.push(SYNTHESIZED_TAG.to_string());
        let catalog = vec![
            synthesized,
            recipe("Peshk në furrë", MealType::Dinner, 600, "200g peshk"),
        ];

        let text = render_stats(&catalog);
        assert!(text.contains("Receta AI: 1"));
    }
}
