use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::CatalogError;
use crate::synthesis::RecipeStore;
use crate::types::{MealType, Recipe};

/// Load a catalog file: a JSON array of recipes.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Recipe>, CatalogError> {
    let raw = fs::read_to_string(path.as_ref())?;
    let recipes: Vec<Recipe> = serde_json::from_str(&raw)?;
    tracing::debug!(
        path = %path.as_ref().display(),
        count = recipes.len(),
        "catalog loaded"
    );
    Ok(recipes)
}

/// Load the base catalog and append the user catalog when it exists.
///
/// The user catalog is where synthesized and hand-added recipes accumulate;
/// a missing file just means nothing was saved yet. Entries sharing a name
/// and meal type are de-duplicated, first occurrence wins, so the base
/// catalog shadows user copies.
pub fn load_merged(
    base: impl AsRef<Path>,
    user: impl AsRef<Path>,
) -> Result<Vec<Recipe>, CatalogError> {
    let mut recipes = load_catalog(base)?;
    match fs::read_to_string(user.as_ref()) {
        Ok(raw) => {
            let extra: Vec<Recipe> = serde_json::from_str(&raw)?;
            recipes.extend(extra);
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(err.into()),
    }

    let mut seen = HashSet::new();
    recipes.retain(|recipe| seen.insert(dedupe_key(recipe)));
    Ok(recipes)
}

fn dedupe_key(recipe: &Recipe) -> (String, MealType) {
    (recipe.name.trim().to_lowercase(), recipe.meal_type)
}

/// Recipe store backed by a single JSON file, the same format catalogs load
/// from. Suited for the user catalog that [`load_merged`] appends.
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_existing(&self) -> Result<Vec<Recipe>, CatalogError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl RecipeStore for JsonCatalogStore {
    fn store_if_new(&self, recipe: &Recipe) -> Result<bool, CatalogError> {
        let mut recipes = self.load_existing()?;
        let key = dedupe_key(recipe);
        if recipes.iter().any(|known| dedupe_key(known) == key) {
            tracing::debug!(name = %recipe.name, "recipe already stored, skipping");
            return Ok(false);
        }

        recipes.push(recipe.clone());
        let raw = serde_json::to_string_pretty(&recipes)?;
        fs::write(&self.path, raw)?;
        tracing::info!(name = %recipe.name, path = %self.path.display(), "recipe stored");
        Ok(true)
    }
}
