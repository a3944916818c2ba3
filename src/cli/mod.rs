pub mod plan;
pub mod stats;
pub mod tdee;
