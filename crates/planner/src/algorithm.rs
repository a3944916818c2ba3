use std::cmp::Ordering;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use recipe::{MealType, Recipe, RecipeStore, RecipeSynthesizer, SynthesisRequest, SYNTHESIZED_TAG};
use strum::VariantArray;

use crate::energy::{split_calories, MealCalorieTargets};
use crate::error::PlanError;
use crate::filter::{exclusion_text, filter_recipes};
use crate::plan::{Weekday, WeeklyPlan};
use crate::preferences::{PlanRequest, ScoreWeights, SelectionTuning};
use crate::score::score_candidate;
use crate::state::SelectionState;

/// Fills a week of meal slots from a catalog, one slot at a time in day
/// order, breakfast to dinner within the day.
///
/// Selection is scored but deliberately not greedy: the best-scored
/// candidates form a shortlist and one of them is drawn at random, so two
/// seeds give two different but equally sensible weeks. A synthesizer, when
/// wired in, covers slots the catalog cannot fill and occasionally replaces
/// a fillable slot for novelty; a store persists whatever the synthesizer
/// produced. Both collaborators are optional, and every synthesis or store
/// failure degrades to the catalog pick or an unfilled slot, never an error.
pub struct WeekPlanner<'a> {
    tuning: SelectionTuning,
    weights: ScoreWeights,
    synthesizer: Option<&'a dyn RecipeSynthesizer>,
    store: Option<&'a dyn RecipeStore>,
}

impl<'a> WeekPlanner<'a> {
    pub fn new(tuning: SelectionTuning) -> Self {
        Self {
            tuning,
            weights: ScoreWeights::default(),
            synthesizer: None,
            store: None,
        }
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_synthesizer(mut self, synthesizer: &'a dyn RecipeSynthesizer) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    pub fn with_store(mut self, store: &'a dyn RecipeStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Generate a week from a fresh [`SelectionState`].
    pub fn generate(
        &self,
        catalog: &[Recipe],
        request: &PlanRequest,
    ) -> Result<WeeklyPlan, PlanError> {
        let mut state = SelectionState::new();
        self.generate_with_state(catalog, request, &mut state)
    }

    /// Generate a week, reading and extending a caller-provided state.
    /// Pre-populated names and protein counts carry their penalties into
    /// this run, which is how variety pressure spans several weeks.
    pub fn generate_with_state(
        &self,
        catalog: &[Recipe],
        request: &PlanRequest,
        state: &mut SelectionState,
    ) -> Result<WeeklyPlan, PlanError> {
        if request.total_kcal == 0 {
            return Err(PlanError::InvalidCalorieTarget);
        }
        if self.tuning.shortlist_size == 0 {
            return Err(PlanError::InvalidShortlist);
        }
        if !(0.0..=1.0).contains(&self.tuning.novelty_probability) {
            return Err(PlanError::InvalidNoveltyProbability);
        }

        let mut rng = match request.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => {
                let clock_seed = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|elapsed| elapsed.as_secs())
                    .unwrap_or_default();
                StdRng::seed_from_u64(clock_seed)
            }
        };

        let targets = split_calories(request.total_kcal, &request.split_pattern);
        tracing::info!(
            total_kcal = request.total_kcal,
            breakfast = targets.breakfast,
            lunch = targets.lunch,
            dinner = targets.dinner,
            catalog_size = catalog.len(),
            seeded = request.seed.is_some(),
            "generating weekly plan"
        );

        let mut plan = WeeklyPlan::empty();
        for day in Weekday::VARIANTS.iter().copied() {
            for meal in MealType::VARIANTS.iter().copied() {
                let chosen = self.fill_slot(catalog, request, &targets, state, &mut rng, day, meal);
                if let Some(recipe) = &chosen {
                    state.commit(recipe);
                } else {
                    tracing::debug!(day = %day, meal = %meal, "slot left unfilled");
                }
                *plan.day_mut(day).slot_mut(meal) = chosen;
            }
        }

        let synthesized = plan
            .filled_slots()
            .filter(|(_, _, recipe)| recipe.tags.iter().any(|tag| tag == SYNTHESIZED_TAG))
            .count();
        tracing::info!(
            filled = plan.filled_count(),
            synthesized,
            "weekly plan generated"
        );
        Ok(plan)
    }

    fn fill_slot(
        &self,
        catalog: &[Recipe],
        request: &PlanRequest,
        targets: &MealCalorieTargets,
        state: &SelectionState,
        rng: &mut StdRng,
        day: Weekday,
        meal: MealType,
    ) -> Option<Recipe> {
        let mut pool = filter_recipes(
            catalog,
            meal,
            &request.preference_tags,
            &request.exclude_keywords,
        );
        pool.retain(|candidate| !state.is_name_used(&candidate.name, meal));

        let mut chosen: Option<Recipe> = None;
        if !pool.is_empty() {
            let mut ranked: Vec<(f32, &Recipe)> = pool
                .iter()
                .map(|candidate| {
                    let score =
                        score_candidate(candidate, targets, request, state, &self.weights);
                    (score, *candidate)
                })
                .collect();
            ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

            let shortlist = self.tuning.shortlist_size.min(ranked.len());
            chosen = ranked[..shortlist]
                .choose(rng)
                .map(|(_, candidate)| (*candidate).clone());
        }

        // Synthesis covers empty pools; with a candidate in hand it is only
        // tried on the novelty roll. The roll is not drawn otherwise, which
        // keeps seeded runs reproducible per configuration.
        let mut want_synthesis = chosen.is_none();
        if self.synthesizer.is_some() && !want_synthesis {
            want_synthesis = rng.random_bool(self.tuning.novelty_probability);
        }

        if want_synthesis {
            if let Some(fresh) = self.synthesize_slot(request, targets, state, day, meal) {
                chosen = Some(fresh);
            }
        }

        chosen
    }

    /// Ask the synthesizer for a slot recipe. Any failure returns `None` and
    /// the caller keeps whatever the catalog produced.
    fn synthesize_slot(
        &self,
        request: &PlanRequest,
        targets: &MealCalorieTargets,
        state: &SelectionState,
        day: Weekday,
        meal: MealType,
    ) -> Option<Recipe> {
        let synthesizer = self.synthesizer?;
        let target_kcal = targets.for_meal(meal);

        let mut tags = request.preference_tags.clone();
        tags.extend(
            request
                .skill
                .indicator_tags()
                .iter()
                .map(|tag| tag.to_string()),
        );
        let synthesis = SynthesisRequest {
            meal_type: meal,
            target_kcal,
            tags,
            exclude: request.exclude_keywords.clone(),
            skill: Some(request.skill),
        };

        let draft = match synthesizer.synthesize(&synthesis) {
            Ok(draft) => draft,
            Err(err) => {
                tracing::warn!(day = %day, meal = %meal, error = %err, "recipe synthesis failed");
                return None;
            }
        };
        let recipe = match draft.into_recipe(meal, target_kcal) {
            Ok(recipe) => recipe,
            Err(err) => {
                tracing::warn!(day = %day, meal = %meal, error = %err, "synthesized draft rejected");
                return None;
            }
        };

        // The synthesizer is outside our control, so its output passes the
        // same gates catalog candidates passed: no reused name, no excluded
        // keyword.
        if state.is_name_used(&recipe.name, meal) {
            tracing::warn!(day = %day, meal = %meal, name = %recipe.name, "synthesized recipe repeats a used name");
            return None;
        }
        if violates_exclusions(&recipe, &request.exclude_keywords) {
            tracing::warn!(day = %day, meal = %meal, name = %recipe.name, "synthesized recipe contains an excluded keyword");
            return None;
        }

        if let Some(store) = self.store {
            match store.store_if_new(&recipe) {
                Ok(true) => tracing::debug!(name = %recipe.name, "synthesized recipe stored"),
                Ok(false) => tracing::debug!(name = %recipe.name, "synthesized recipe already known"),
                Err(err) => {
                    // Storage is best-effort; the plan keeps the recipe.
                    tracing::warn!(name = %recipe.name, error = %err, "failed to store synthesized recipe");
                }
            }
        }

        Some(recipe)
    }
}

fn violates_exclusions(recipe: &Recipe, exclude_keywords: &[String]) -> bool {
    let text = exclusion_text(recipe);
    exclude_keywords.iter().any(|keyword| {
        let keyword = keyword.trim().to_lowercase();
        !keyword.is_empty() && text.contains(&keyword)
    })
}

/// Plan a week with default tuning and weights and no collaborators.
pub fn plan_week(catalog: &[Recipe], request: &PlanRequest) -> Result<WeeklyPlan, PlanError> {
    WeekPlanner::new(SelectionTuning::default()).generate(catalog, request)
}
