//! Tests for configuration system

use javore::config::Config;

#[test]
fn test_shipped_config_matches_the_baked_in_defaults() {
    let config = Config::load(None).expect("Failed to load config");

    assert_eq!(config.catalog.path, "data/recipes.json");
    assert_eq!(config.catalog.user_path, "data/recipes_user.json");
    assert_eq!(config.planner.daily_kcal, 2000);
    assert_eq!(config.planner.split_pattern, "30/40/30");
    assert_eq!(config.planner.tuning.shortlist_size, 5);
    assert_eq!(config.planner.weights.reuse_penalty, 100.0);
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn test_default_config_validates() {
    let config = Config::load(None).expect("Failed to load config");
    assert!(config.validate().is_ok());
}
