use thiserror::Error;

/// Contract violations a planning run refuses to start with. Thin catalogs,
/// failed synthesis and over-tight exclusions are not errors; they produce
/// unfilled slots instead.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Daily calorie target must be greater than zero")]
    InvalidCalorieTarget,

    #[error("Selection shortlist must hold at least one candidate")]
    InvalidShortlist,

    #[error("Novelty probability must lie within 0.0..=1.0")]
    InvalidNoveltyProbability,
}
