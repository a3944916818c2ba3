use recipe::{MealType, Recipe};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Days of the planning week, Monday first.
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
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
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Albanian calendar label, as shown to the app's audience.
    pub fn label_sq(&self) -> &'static str {
        match self {
            Weekday::Monday => "E Hënë",
            Weekday::Tuesday => "E Martë",
            Weekday::Wednesday => "E Mërkurë",
            Weekday::Thursday => "E Enjte",
            Weekday::Friday => "E Premte",
            Weekday::Saturday => "E Shtunë",
            Weekday::Sunday => "E Diel",
        }
    }
}

/// One day of the plan. A `None` slot stayed unfilled: the catalog had no
/// candidate and synthesis did not produce one either.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DayPlan {
    pub day: Weekday,
    pub breakfast: Option<Recipe>,
    pub lunch: Option<Recipe>,
    pub dinner: Option<Recipe>,
}

impl DayPlan {
    pub fn empty(day: Weekday) -> Self {
        Self {
            day,
            breakfast: None,
            lunch: None,
            dinner: None,
        }
    }

    pub fn slot(&self, meal: MealType) -> Option<&Recipe> {
        match meal {
            MealType::Breakfast => self.breakfast.as_ref(),
            MealType::Lunch => self.lunch.as_ref(),
            MealType::Dinner => self.dinner.as_ref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, meal: MealType) -> &mut Option<Recipe> {
        match meal {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
        }
    }
}

/// A full week: 7 days x 3 meal slots, all present even when unfilled.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WeeklyPlan {
    pub days: [DayPlan; 7],
    pub generated_at: String,
}

impl WeeklyPlan {
    /// Fresh plan with every slot unfilled, stamped with the current time.
    pub fn empty() -> Self {
        Self {
            days: std::array::from_fn(|i| DayPlan::empty(Weekday::VARIANTS[i])),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn day(&self, day: Weekday) -> &DayPlan {
        &self.days[day as usize]
    }

    pub(crate) fn day_mut(&mut self, day: Weekday) -> &mut DayPlan {
        &mut self.days[day as usize]
    }

    pub fn slot(&self, day: Weekday, meal: MealType) -> Option<&Recipe> {
        self.day(day).slot(meal)
    }

    /// All 21 slots in traversal order: days outer, meal types inner.
    pub fn slots(&self) -> impl Iterator<Item = (Weekday, MealType, Option<&Recipe>)> {
        self.days.iter().flat_map(|day_plan| {
            MealType::VARIANTS
                .iter()
                .map(move |meal| (day_plan.day, *meal, day_plan.slot(*meal)))
        })
    }

    pub fn filled_slots(&self) -> impl Iterator<Item = (Weekday, MealType, &Recipe)> {
        self.slots()
            .filter_map(|(day, meal, recipe)| recipe.map(|r| (day, meal, r)))
    }

    pub fn filled_count(&self) -> usize {
        self.filled_slots().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_plan_has_21_unfilled_slots() {
        let plan = WeeklyPlan::empty();
        assert_eq!(plan.slots().count(), 21);
        assert_eq!(plan.filled_count(), 0);
    }

    #[test]
    fn slots_iterate_monday_breakfast_first() {
        let plan = WeeklyPlan::empty();
        let first = plan.slots().next().unwrap();
        assert_eq!(first.0, Weekday::Monday);
        assert_eq!(first.1, MealType::Breakfast);

        let last = plan.slots().last().unwrap();
        assert_eq!(last.0, Weekday::Sunday);
        assert_eq!(last.1, MealType::Dinner);
    }

    #[test]
    fn day_accessor_matches_variant_order() {
        let plan = WeeklyPlan::empty();
        assert_eq!(plan.day(Weekday::Wednesday).day, Weekday::Wednesday);
        assert_eq!(plan.day(Weekday::Sunday).day, Weekday::Sunday);
    }

    #[test]
    fn albanian_labels_cover_the_week() {
        assert_eq!(Weekday::Monday.label_sq(), "E Hënë");
        assert_eq!(Weekday::Sunday.label_sq(), "E Diel");
    }
}
