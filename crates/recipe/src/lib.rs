pub mod catalog;
pub mod error;
pub mod synthesis;
pub mod types;

// Re-export commonly used types
pub use catalog::{load_catalog, load_merged, JsonCatalogStore};
pub use error::{CatalogError, SynthesisError};
pub use synthesis::{
    RecipeDraft, RecipeStore, RecipeSynthesizer, SynthesisRequest, SYNTHESIZED_TAG,
};
pub use types::{MealType, Recipe, SkillLevel};
