//! End-to-end planning runs against in-memory catalogs: plan shape, seeded
//! reproducibility, diversity pressure, exclusion hygiene, and the
//! synthesizer/store collaborations with scripted fakes.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use planner::{
    plan_week, PlanRequest, ProteinLabel, SelectionState, SelectionTuning, WeekPlanner, WeeklyPlan,
};
use recipe::{
    CatalogError, MealType, Recipe, RecipeDraft, RecipeStore, RecipeSynthesizer, SynthesisError,
    SynthesisRequest, SYNTHESIZED_TAG,
};

fn create_test_recipe(name: &str, meal_type: MealType, kcal: u32, ingredient: &str) -> Recipe {
    Recipe {
        name: name.to_string(),
        meal_type,
        kcal,
        protein: 30,
        carbs: 50,
        fat: 20,
        tags: vec![],
        ingredients: vec![ingredient.to_string()],
        steps: vec![],
    }
}

/// Catalog with `per_meal` recipes per slot type, proteins rotating through
/// six families so diversity pressure has material to work with.
fn rich_catalog(per_meal: usize) -> Vec<Recipe> {
    let proteins = [
        "200g chicken breast",
        "200g beef strips",
        "200g salmon fillet",
        "150g tofu",
        "200g chickpeas",
        "3 eggs",
    ];
    let mut catalog = Vec::new();
    for i in 0..per_meal {
        let ingredient = proteins[i % proteins.len()];
        catalog.push(create_test_recipe(
            &format!("Mëngjes {i}"),
            MealType::Breakfast,
            560 + (i as u32 % 5) * 20,
            ingredient,
        ));
        catalog.push(create_test_recipe(
            &format!("Drekë {i}"),
            MealType::Lunch,
            760 + (i as u32 % 5) * 20,
            ingredient,
        ));
        catalog.push(create_test_recipe(
            &format!("Darkë {i}"),
            MealType::Dinner,
            570 + (i as u32 % 5) * 20,
            ingredient,
        ));
    }
    catalog
}

fn slot_names(plan: &WeeklyPlan) -> Vec<Option<String>> {
    plan.slots()
        .map(|(_, _, recipe)| recipe.map(|r| r.name.clone()))
        .collect()
}

/// Synthesizer that fabricates a unique draft per call and counts calls.
struct SequenceSynthesizer {
    calls: Cell<u32>,
}

impl SequenceSynthesizer {
    fn new() -> Self {
        Self { calls: Cell::new(0) }
    }
}

impl RecipeSynthesizer for SequenceSynthesizer {
    fn synthesize(&self, request: &SynthesisRequest) -> Result<RecipeDraft, SynthesisError> {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        Ok(RecipeDraft {
            name: format!("Krijim {} {}", request.meal_type, call),
            ingredients: vec!["100g quinoa".to_string()],
            ..RecipeDraft::default()
        })
    }
}

struct FailingSynthesizer;

impl RecipeSynthesizer for FailingSynthesizer {
    fn synthesize(&self, _request: &SynthesisRequest) -> Result<RecipeDraft, SynthesisError> {
        Err(SynthesisError::Backend("backend offline".to_string()))
    }
}

struct BlankNameSynthesizer;

impl RecipeSynthesizer for BlankNameSynthesizer {
    fn synthesize(&self, _request: &SynthesisRequest) -> Result<RecipeDraft, SynthesisError> {
        Ok(RecipeDraft {
            name: "   ".to_string(),
            kcal: Some(500),
            ..RecipeDraft::default()
        })
    }
}

/// Always answers with the same name, like a backend stuck on one idea.
struct RepeatNameSynthesizer;

impl RecipeSynthesizer for RepeatNameSynthesizer {
    fn synthesize(&self, _request: &SynthesisRequest) -> Result<RecipeDraft, SynthesisError> {
        Ok(RecipeDraft {
            name: "Surpriza e shefit".to_string(),
            ..RecipeDraft::default()
        })
    }
}

/// Ignores the exclusion list, as a misbehaving backend would.
struct PorkPushingSynthesizer;

impl RecipeSynthesizer for PorkPushingSynthesizer {
    fn synthesize(&self, _request: &SynthesisRequest) -> Result<RecipeDraft, SynthesisError> {
        Ok(RecipeDraft {
            name: "Mish derri surprizë".to_string(),
            ingredients: vec!["300g pork belly".to_string()],
            ..RecipeDraft::default()
        })
    }
}

struct RecordingStore {
    stored: RefCell<Vec<Recipe>>,
}

impl RecordingStore {
    fn new() -> Self {
        Self { stored: RefCell::new(Vec::new()) }
    }
}

impl RecipeStore for RecordingStore {
    fn store_if_new(&self, recipe: &Recipe) -> Result<bool, CatalogError> {
        self.stored.borrow_mut().push(recipe.clone());
        Ok(true)
    }
}

struct FailingStore;

impl RecipeStore for FailingStore {
    fn store_if_new(&self, _recipe: &Recipe) -> Result<bool, CatalogError> {
        Err(CatalogError::Io(std::io::Error::other("disk full")))
    }
}

#[test]
fn every_plan_covers_the_full_week_grid() {
    let catalog = rich_catalog(10);
    let mut request = PlanRequest::new(2000);
    request.seed = Some(1);

    let plan = plan_week(&catalog, &request).unwrap();
    assert_eq!(plan.slots().count(), 21);
    assert_eq!(plan.filled_count(), 21);
}

#[test]
fn filled_slot_names_are_unique_across_the_week() {
    let catalog = rich_catalog(12);
    for seed in 0..10 {
        let mut request = PlanRequest::new(2000);
        request.seed = Some(seed);
        let plan = plan_week(&catalog, &request).unwrap();

        let mut seen = HashSet::new();
        for (_, _, recipe) in plan.filled_slots() {
            assert!(seen.insert(recipe.name.clone()), "duplicate: {}", recipe.name);
        }
    }
}

#[test]
fn identical_seeds_produce_identical_plans() {
    let catalog = rich_catalog(10);
    let mut request = PlanRequest::new(2200);
    request.preference_tags = vec!["quick".to_string()];
    request.seed = Some(99);

    let first = plan_week(&catalog, &request).unwrap();
    let second = plan_week(&catalog, &request).unwrap();
    assert_eq!(slot_names(&first), slot_names(&second));
}

#[test]
fn different_seeds_are_allowed_to_differ() {
    let catalog = rich_catalog(12);
    let plan_for = |seed: u64| {
        let mut request = PlanRequest::new(2000);
        request.seed = Some(seed);
        slot_names(&plan_week(&catalog, &request).unwrap())
    };

    // Individual seed pairs may coincide; all five matching the first
    // would mean the seed is being ignored.
    let base = plan_for(0);
    assert!((1..=5).any(|seed| plan_for(seed) != base));
}

#[test]
fn excluded_keywords_never_reach_the_plan() {
    let mut catalog = rich_catalog(8);
    catalog.push(create_test_recipe(
        "Mish derri me lakra",
        MealType::Dinner,
        590,
        "400g pork shoulder",
    ));

    for seed in 0..8 {
        let mut request = PlanRequest::new(2000);
        request.exclude_keywords = vec!["pork".to_string(), "derri".to_string()];
        request.seed = Some(seed);

        let plan = plan_week(&catalog, &request).unwrap();
        for (_, _, recipe) in plan.filled_slots() {
            let text = format!(
                "{} {}",
                recipe.name.to_lowercase(),
                recipe.ingredients.join(" ").to_lowercase()
            );
            assert!(!text.contains("pork"), "excluded keyword in {}", recipe.name);
            assert!(!text.contains("derri"), "excluded keyword in {}", recipe.name);
        }
    }
}

#[test]
fn no_protein_dominates_a_slot_type() {
    // 24 dinners, four families, six recipes each, near-identical calories;
    // without the diversity penalties one family could sweep the week.
    let proteins = [
        "200g chicken breast",
        "200g beef strips",
        "200g salmon fillet",
        "200g chickpeas",
    ];
    let mut catalog = rich_catalog(6); // breakfasts and lunches
    catalog.retain(|r| r.meal_type != MealType::Dinner);
    for (i, ingredient) in (0..24usize).map(|i| (i, proteins[i % proteins.len()])) {
        catalog.push(create_test_recipe(
            &format!("Darkë speciale {i}"),
            MealType::Dinner,
            600,
            ingredient,
        ));
    }

    for seed in 0..12 {
        let mut request = PlanRequest::new(2000);
        request.seed = Some(seed);
        let plan = plan_week(&catalog, &request).unwrap();

        let mut counts = std::collections::HashMap::new();
        for day in &plan.days {
            if let Some(dinner) = &day.dinner {
                *counts.entry(ProteinLabel::classify(dinner)).or_insert(0u32) += 1;
            }
        }
        let dominant = counts.values().copied().max().unwrap_or(0);
        assert!(
            dominant <= 4,
            "seed {seed}: one protein took {dominant} of 7 dinners"
        );
    }
}

#[test]
fn thin_catalog_without_synthesizer_leaves_slots_unfilled() {
    // Two breakfasts only; days 3 through 7 have nothing left.
    let catalog = vec![
        create_test_recipe("Tërshërë", MealType::Breakfast, 600, "80g oats"),
        create_test_recipe("Omëletë", MealType::Breakfast, 580, "3 eggs"),
    ];
    let mut request = PlanRequest::new(2000);
    request.seed = Some(3);

    let plan = plan_week(&catalog, &request).unwrap();
    assert_eq!(plan.slots().count(), 21);
    assert_eq!(plan.filled_count(), 2);
}

#[test]
fn synthesizer_fills_what_the_catalog_cannot() {
    let store = RecordingStore::new();
    let synthesizer = SequenceSynthesizer::new();
    let planner = WeekPlanner::new(SelectionTuning::default())
        .with_synthesizer(&synthesizer)
        .with_store(&store);

    let mut request = PlanRequest::new(2100);
    request.seed = Some(5);

    let plan = planner.generate(&[], &request).unwrap();
    assert_eq!(plan.filled_count(), 21);
    assert_eq!(synthesizer.calls.get(), 21);
    assert_eq!(store.stored.borrow().len(), 21);

    for (_, meal, recipe) in plan.filled_slots() {
        assert!(recipe.tags.iter().any(|t| t == SYNTHESIZED_TAG));
        // Drafts carried no calories, so each slot fell back to its target.
        let expected = match meal {
            MealType::Breakfast => 630,
            MealType::Lunch => 840,
            MealType::Dinner => 630,
        };
        assert_eq!(recipe.kcal, expected);
        assert_eq!(recipe.meal_type, meal);
    }
}

#[test]
fn synthesis_failures_degrade_to_unfilled_slots() {
    let synthesizer = FailingSynthesizer;
    let planner = WeekPlanner::new(SelectionTuning::default()).with_synthesizer(&synthesizer);

    let mut request = PlanRequest::new(2000);
    request.seed = Some(5);

    let plan = planner.generate(&[], &request).unwrap();
    assert_eq!(plan.filled_count(), 0);
}

#[test]
fn blank_draft_names_are_rejected() {
    let synthesizer = BlankNameSynthesizer;
    let planner = WeekPlanner::new(SelectionTuning::default()).with_synthesizer(&synthesizer);

    let mut request = PlanRequest::new(2000);
    request.seed = Some(5);

    let plan = planner.generate(&[], &request).unwrap();
    assert_eq!(plan.filled_count(), 0);
}

#[test]
fn repeated_draft_names_fill_only_one_slot() {
    let synthesizer = RepeatNameSynthesizer;
    let planner = WeekPlanner::new(SelectionTuning::default()).with_synthesizer(&synthesizer);

    let mut request = PlanRequest::new(2000);
    request.seed = Some(5);

    let plan = planner.generate(&[], &request).unwrap();
    // The first slot takes the name; the global used-name gate blocks the
    // other twenty.
    assert_eq!(plan.filled_count(), 1);
}

#[test]
fn synthesized_recipes_obey_the_exclusion_list() {
    let synthesizer = PorkPushingSynthesizer;
    let planner = WeekPlanner::new(SelectionTuning::default()).with_synthesizer(&synthesizer);

    let mut request = PlanRequest::new(2000);
    request.exclude_keywords = vec!["pork".to_string()];
    request.seed = Some(5);

    let plan = planner.generate(&[], &request).unwrap();
    assert_eq!(plan.filled_count(), 0);
}

#[test]
fn store_failures_do_not_lose_the_plan() {
    let synthesizer = SequenceSynthesizer::new();
    let store = FailingStore;
    let planner = WeekPlanner::new(SelectionTuning::default())
        .with_synthesizer(&synthesizer)
        .with_store(&store);

    let mut request = PlanRequest::new(2000);
    request.seed = Some(5);

    let plan = planner.generate(&[], &request).unwrap();
    assert_eq!(plan.filled_count(), 21);
}

#[test]
fn zero_novelty_never_calls_the_synthesizer_when_pools_suffice() {
    let catalog = rich_catalog(12);
    let synthesizer = SequenceSynthesizer::new();
    let tuning = SelectionTuning {
        novelty_probability: 0.0,
        ..SelectionTuning::default()
    };
    let planner = WeekPlanner::new(tuning).with_synthesizer(&synthesizer);

    let mut request = PlanRequest::new(2000);
    request.seed = Some(5);

    let plan = planner.generate(&catalog, &request).unwrap();
    assert_eq!(plan.filled_count(), 21);
    assert_eq!(synthesizer.calls.get(), 0);
}

#[test]
fn full_novelty_synthesizes_every_slot() {
    let catalog = rich_catalog(12);
    let synthesizer = SequenceSynthesizer::new();
    let tuning = SelectionTuning {
        novelty_probability: 1.0,
        ..SelectionTuning::default()
    };
    let planner = WeekPlanner::new(tuning).with_synthesizer(&synthesizer);

    let mut request = PlanRequest::new(2000);
    request.seed = Some(5);

    let plan = planner.generate(&catalog, &request).unwrap();
    assert_eq!(plan.filled_count(), 21);
    for (_, _, recipe) in plan.filled_slots() {
        assert!(recipe.tags.iter().any(|t| t == SYNTHESIZED_TAG));
    }
}

#[test]
fn seeded_runs_with_a_synthesizer_are_reproducible() {
    let catalog = rich_catalog(8);

    let run = || {
        let synthesizer = SequenceSynthesizer::new();
        let planner = WeekPlanner::new(SelectionTuning::default()).with_synthesizer(&synthesizer);
        let mut request = PlanRequest::new(2000);
        request.seed = Some(77);
        slot_names(&planner.generate(&catalog, &request).unwrap())
    };

    assert_eq!(run(), run());
}

#[test]
fn carried_state_keeps_a_second_week_fresh() {
    let catalog = rich_catalog(16);
    let planner = WeekPlanner::new(SelectionTuning::default());
    let mut state = SelectionState::new();

    let mut request = PlanRequest::new(2000);
    request.seed = Some(21);
    let week_one = planner
        .generate_with_state(&catalog, &request, &mut state)
        .unwrap();

    request.seed = Some(22);
    let week_two = planner
        .generate_with_state(&catalog, &request, &mut state)
        .unwrap();

    let names = |plan: &WeeklyPlan| -> HashSet<String> {
        plan.filled_slots().map(|(_, _, r)| r.name.clone()).collect()
    };
    assert!(names(&week_one).is_disjoint(&names(&week_two)));
}
