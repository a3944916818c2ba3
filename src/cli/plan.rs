use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;

use anyhow::{Context, Result};
use clap::Args;
use planner::{split_calories, FoodPreference, PlanRequest, WeekPlanner, WeeklyPlan};
use recipe::{load_merged, MealType, SkillLevel, SYNTHESIZED_TAG};
use shopping::ShoppingListBuilder;
use strum::VariantArray;

use crate::config::Config;

#[derive(Args)]
pub struct PlanArgs {
    /// Daily calorie target (overrides the config file)
    #[arg(long)]
    pub kcal: Option<u32>,

    /// Breakfast/lunch/dinner split, e.g. "30/40/30" or "25:50:25"
    #[arg(long)]
    pub split: Option<String>,

    /// Preferred tag; repeat for several
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Keyword to keep out of the plan; repeat for several
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,

    /// Cooking skill: beginner, intermediate or advanced
    #[arg(long, default_value = "beginner")]
    pub skill: SkillLevel,

    /// Seed for a reproducible plan
    #[arg(long)]
    pub seed: Option<u64>,

    /// Recipe catalog path (overrides the config file)
    #[arg(long)]
    pub catalog: Option<String>,

    /// JSON file of food ratings, keyed by item name
    #[arg(long)]
    pub ratings: Option<String>,

    /// Print the plan as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(config: &Config, args: PlanArgs) -> Result<()> {
    let base_path = args.catalog.as_deref().unwrap_or(&config.catalog.path);
    let catalog = load_merged(base_path, &config.catalog.user_path)
        .with_context(|| format!("Failed to load recipe catalog from {base_path}"))?;
    tracing::debug!(recipes = catalog.len(), "catalog loaded");

    let mut request = PlanRequest::new(args.kcal.unwrap_or(config.planner.daily_kcal));
    request.split_pattern = args
        .split
        .unwrap_or_else(|| config.planner.split_pattern.clone());
    request.preference_tags = args.tags;
    request.exclude_keywords = args.exclude;
    request.skill = args.skill;
    request.seed = args.seed;
    if let Some(path) = &args.ratings {
        request.user_preferences = load_ratings(path)?;
    }

    let plan = WeekPlanner::new(config.planner.tuning)
        .with_weights(config.planner.weights)
        .generate(&catalog, &request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    print!("{}", render_plan(&plan, &request));
    print!("{}", render_shopping_list(&plan));
    Ok(())
}

fn load_ratings(path: &str) -> Result<BTreeMap<String, FoodPreference>> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("Failed to read ratings file {path}"))?;
    let ratings: BTreeMap<String, FoodPreference> = serde_json::from_str(&raw)
        .with_context(|| format!("Ratings file {path} is not a JSON map of item ratings"))?;
    tracing::debug!(count = ratings.len(), "food ratings loaded");
    Ok(ratings)
}

fn render_plan(plan: &WeeklyPlan, request: &PlanRequest) -> String {
    let targets = split_calories(request.total_kcal, &request.split_pattern);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Plani javor: {} kcal/ditë (Mëngjes {} / Drekë {} / Darkë {})",
        request.total_kcal, targets.breakfast, targets.lunch, targets.dinner
    );

    for day_plan in &plan.days {
        let day_kcal: u32 = MealType::VARIANTS
            .iter()
            .filter_map(|meal| day_plan.slot(*meal))
            .map(|recipe| recipe.kcal)
            .sum();
        let _ = writeln!(out);
        let _ = writeln!(out, "{} ({} kcal)", day_plan.day.label_sq(), day_kcal);

        for meal in MealType::VARIANTS.iter().copied() {
            match day_plan.slot(meal) {
                Some(recipe) => {
                    let marker = if recipe.tags.iter().any(|tag| tag == SYNTHESIZED_TAG) {
                        " [AI]"
                    } else {
                        ""
                    };
                    let _ = writeln!(
                        out,
                        "  {:<8} {}{} ({} kcal, P {} / K {} / Y {})",
                        meal.label_sq(),
                        recipe.name,
                        marker,
                        recipe.kcal,
                        recipe.protein,
                        recipe.carbs,
                        recipe.fat
                    );
                }
                None => {
                    let _ = writeln!(
                        out,
                        "  {:<8} nuk u gjet recetë sipas filtrave",
                        meal.label_sq()
                    );
                }
            }
        }
    }
    out
}

fn render_shopping_list(plan: &WeeklyPlan) -> String {
    let counts = ShoppingListBuilder::build(plan);
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "Lista e Blerjeve");
    if counts.is_empty() {
        let _ = writeln!(out, "  (bosh)");
        return out;
    }
    for (item, count) in ShoppingListBuilder::sorted_for_display(&counts) {
        let _ = writeln!(out, "  {count}x {item}");
    }
    out
}
