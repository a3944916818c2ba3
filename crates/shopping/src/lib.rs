pub mod aggregation;

// Re-export commonly used types
pub use aggregation::ShoppingListBuilder;
