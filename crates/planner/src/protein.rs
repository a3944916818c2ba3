use recipe::Recipe;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Main protein family of a recipe, inferred from its text. Drives the
/// diversity penalties, so the taxonomy stays deliberately coarse.
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProteinLabel {
    Poultry,
    Beef,
    Pork,
    Turkey,
    Fish,
    Shrimp,
    Egg,
    Soy,
    Legume,
    Dairy,
    #[default]
    Other,
}

/// Keyword table scanned in declaration order; the first hit wins, so a
/// "chicken and egg fried rice" counts as poultry. English and Albanian
/// terms side by side, matching the catalog's bilingual entries. Albanian
/// words with diacritics also appear in their plain-ASCII spellings.
const PROTEIN_KEYWORDS: &[(&str, ProteinLabel)] = &[
    ("chicken", ProteinLabel::Poultry),
    ("pulë", ProteinLabel::Poultry),
    ("pule", ProteinLabel::Poultry),
    ("beef", ProteinLabel::Beef),
    ("viç", ProteinLabel::Beef),
    ("vici", ProteinLabel::Beef),
    ("pork", ProteinLabel::Pork),
    ("derr", ProteinLabel::Pork),
    ("turkey", ProteinLabel::Turkey),
    ("gjeldeti", ProteinLabel::Turkey),
    ("fish", ProteinLabel::Fish),
    ("peshk", ProteinLabel::Fish),
    ("tuna", ProteinLabel::Fish),
    ("salmon", ProteinLabel::Fish),
    ("troftë", ProteinLabel::Fish),
    ("sarde", ProteinLabel::Fish),
    ("shrimp", ProteinLabel::Shrimp),
    ("karkalec", ProteinLabel::Shrimp),
    ("egg", ProteinLabel::Egg),
    ("vezë", ProteinLabel::Egg),
    ("veze", ProteinLabel::Egg),
    ("tofu", ProteinLabel::Soy),
    ("tempeh", ProteinLabel::Soy),
    ("beans", ProteinLabel::Legume),
    ("fasule", ProteinLabel::Legume),
    ("chickpea", ProteinLabel::Legume),
    ("qiqra", ProteinLabel::Legume),
    ("lentil", ProteinLabel::Legume),
    ("thjerrëz", ProteinLabel::Legume),
    ("thjerrez", ProteinLabel::Legume),
    ("cheese", ProteinLabel::Dairy),
    ("djath", ProteinLabel::Dairy),
    ("yogurt", ProteinLabel::Dairy),
    ("kos", ProteinLabel::Dairy),
];

impl ProteinLabel {
    /// Classify a recipe by scanning its name, ingredient lines and tags
    /// (lowercased, substring match). Recipes matching nothing are `Other`.
    pub fn classify(recipe: &Recipe) -> Self {
        let mut haystack = recipe.name.to_lowercase();
        for part in recipe.ingredients.iter().chain(recipe.tags.iter()) {
            haystack.push(' ');
            haystack.push_str(&part.to_lowercase());
        }

        PROTEIN_KEYWORDS
            .iter()
            .find(|(keyword, _)| haystack.contains(keyword))
            .map(|(_, label)| *label)
            .unwrap_or(ProteinLabel::Other)
    }
}
