use recipe::MealType;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Split pattern used whenever the caller's pattern cannot be parsed.
pub const DEFAULT_SPLIT_PATTERN: &str = "30/40/30";

/// Per-slot calorie targets for one day.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MealCalorieTargets {
    pub breakfast: u32,
    pub lunch: u32,
    pub dinner: u32,
}

impl MealCalorieTargets {
    pub fn for_meal(&self, meal: MealType) -> u32 {
        match meal {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Dinner => self.dinner,
        }
    }
}

/// Split a daily calorie target across breakfast, lunch and dinner.
///
/// The pattern is three integers separated by `/` or `:` ("30/40/30",
/// "25:50:25"). Proportions are normalized by their sum, so they need not
/// add up to 100; per-slot figures round half to even. Any unparsable
/// pattern, wrong arity or zero sum falls back silently to
/// [`DEFAULT_SPLIT_PATTERN`].
pub fn split_calories(total_kcal: u32, pattern: &str) -> MealCalorieTargets {
    match parse_split(total_kcal, pattern) {
        Some(targets) => targets,
        None => {
            tracing::debug!(pattern, "unusable split pattern, falling back to default");
            default_split(total_kcal)
        }
    }
}

fn parse_split(total_kcal: u32, pattern: &str) -> Option<MealCalorieTargets> {
    let mut parts = pattern.split(['/', ':']);
    let b: u32 = parts.next()?.trim().parse().ok()?;
    let l: u32 = parts.next()?.trim().parse().ok()?;
    let d: u32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    // Summed in u64: three u32 weights can overflow u32.
    let sum = u64::from(b) + u64::from(l) + u64::from(d);
    if sum == 0 {
        return None;
    }

    let factor = f64::from(total_kcal) / sum as f64;
    Some(MealCalorieTargets {
        breakfast: (f64::from(b) * factor).round_ties_even() as u32,
        lunch: (f64::from(l) * factor).round_ties_even() as u32,
        dinner: (f64::from(d) * factor).round_ties_even() as u32,
    })
}

// 30/40/30, kept in sync with DEFAULT_SPLIT_PATTERN.
fn default_split(total_kcal: u32) -> MealCalorieTargets {
    let total = f64::from(total_kcal);
    MealCalorieTargets {
        breakfast: (total * 0.30).round_ties_even() as u32,
        lunch: (total * 0.40).round_ties_even() as u32,
        dinner: (total * 0.30).round_ties_even() as u32,
    }
}

/// Biological sex, as the Mifflin-St Jeor formula needs it.
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumString,
    Eq,
    PartialEq,
    Serialize,
    VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Weekly activity bucket used to scale BMR into TDEE.
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumString,
    Eq,
    PartialEq,
    Serialize,
    VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActivityLevel {
    /// Desk-bound, little training.
    Desk,
    /// Training 3-4 times a week.
    Moderate,
    /// Training 5-6 times a week.
    Athlete,
}

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Desk => 1.2,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Athlete => 1.725,
        }
    }
}

/// Nutrition goal driving the calorie adjustment and macro split.
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
    PartialEq,
    Serialize,
    VariantArray,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Goal {
    LoseWeight,
    #[default]
    Maintain,
    GainMuscle,
}

impl Goal {
    pub fn kcal_adjustment(&self) -> f64 {
        match self {
            Goal::LoseWeight => 0.85,
            Goal::Maintain => 1.0,
            Goal::GainMuscle => 1.10,
        }
    }

    /// Daily protein in grams per kilogram of body weight.
    pub fn protein_g_per_kg(&self) -> f64 {
        match self {
            Goal::LoseWeight => 1.7,
            Goal::Maintain => 1.4,
            Goal::GainMuscle => 1.8,
        }
    }

    /// Percent of daily calories from protein, carbs and fat.
    pub fn macro_percentages(&self) -> (u32, u32, u32) {
        match self {
            Goal::LoseWeight => (30, 40, 30),
            Goal::Maintain => (25, 50, 25),
            Goal::GainMuscle => (30, 50, 20),
        }
    }
}

/// Daily calorie and protein targets derived from body data.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DailyTargets {
    pub kcal: u32,
    pub protein_g: u32,
}

/// Mifflin-St Jeor BMR scaled by activity, then adjusted for the goal.
/// Protein comes from body weight, not from the calorie total.
pub fn daily_targets(
    gender: Gender,
    age: u32,
    height_cm: u32,
    weight_kg: f64,
    activity: ActivityLevel,
    goal: Goal,
) -> DailyTargets {
    let gender_term = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };
    let bmr =
        10.0 * weight_kg + 6.25 * f64::from(height_cm) - 5.0 * f64::from(age) + gender_term;
    let tdee = bmr * activity.multiplier();

    DailyTargets {
        kcal: (tdee * goal.kcal_adjustment()).round_ties_even() as u32,
        protein_g: (goal.protein_g_per_kg() * weight_kg).round_ties_even() as u32,
    }
}

/// Daily macro targets in grams.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MacroTargets {
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

/// Convert a calorie total into macro grams (4 kcal/g protein and carbs,
/// 9 kcal/g fat). Protein takes whichever is higher: the weight-based grams
/// or the percentage-based grams.
pub fn macro_targets(total_kcal: u32, goal: Goal, protein_g_from_weight: u32) -> MacroTargets {
    let (p_pct, c_pct, f_pct) = goal.macro_percentages();
    let total = f64::from(total_kcal);

    let protein_from_pct = (total * f64::from(p_pct) / 100.0 / 4.0).round_ties_even() as u32;
    let carbs_g = (total * f64::from(c_pct) / 100.0 / 4.0).round_ties_even() as u32;
    let fat_g = (total * f64::from(f_pct) / 100.0 / 9.0).round_ties_even() as u32;

    MacroTargets {
        protein_g: protein_g_from_weight.max(protein_from_pct),
        carbs_g,
        fat_g,
    }
}
