pub mod algorithm;
pub mod energy;
pub mod error;
pub mod filter;
pub mod plan;
pub mod preferences;
pub mod protein;
mod score;
pub mod state;

pub use algorithm::{plan_week, WeekPlanner};
pub use energy::{
    daily_targets, macro_targets, split_calories, ActivityLevel, DailyTargets, Gender, Goal,
    MacroTargets, MealCalorieTargets, DEFAULT_SPLIT_PATTERN,
};
pub use error::PlanError;
pub use filter::filter_recipes;
pub use plan::{DayPlan, Weekday, WeeklyPlan};
pub use preferences::{FoodPreference, PlanRequest, ScoreWeights, SelectionTuning};
pub use protein::ProteinLabel;
pub use state::SelectionState;
