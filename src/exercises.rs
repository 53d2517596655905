//! Predefined exercises and the search/category filter used to pick one

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Category {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    Cardio,
}

impl Category {
    pub(crate) const ALL: [Category; 7] = [
        Category::Chest,
        Category::Back,
        Category::Legs,
        Category::Shoulders,
        Category::Arms,
        Category::Core,
        Category::Cardio,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Category::Chest => "Chest",
            Category::Back => "Back",
            Category::Legs => "Legs",
            Category::Shoulders => "Shoulders",
            Category::Arms => "Arms",
            Category::Core => "Core",
            Category::Cardio => "Cardio",
        }
    }

    /// Parse a category filter.  "All" (in any case) selects every category
    /// and yields `None`.
    pub(crate) fn parse_filter(s: &str) -> Result<Option<Category>, UnknownCategoryError> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(None)
        } else {
            s.parse().map(Some)
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Category, UnknownCategoryError> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCategoryError(s.to_owned()))
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown exercise category {0:?}")]
pub(crate) struct UnknownCategoryError(String);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Exercise {
    pub(crate) name: &'static str,
    pub(crate) category: Category,
    /// Human-readable list of the muscles worked
    pub(crate) muscles: &'static str,
}

const fn ex(name: &'static str, category: Category, muscles: &'static str) -> Exercise {
    Exercise {
        name,
        category,
        muscles,
    }
}

pub(crate) static CATALOG: &[Exercise] = &[
    ex("Push-ups", Category::Chest, "Chest, Triceps"),
    ex("Bench Press", Category::Chest, "Chest, Triceps"),
    ex("Incline Bench Press", Category::Chest, "Upper Chest"),
    ex("Decline Bench Press", Category::Chest, "Lower Chest"),
    ex("Dumbbell Flyes", Category::Chest, "Chest"),
    ex("Chest Dips", Category::Chest, "Chest, Triceps"),
    ex("Pull-ups", Category::Back, "Lats, Biceps"),
    ex("Chin-ups", Category::Back, "Lats, Biceps"),
    ex("Deadlifts", Category::Back, "Back, Glutes, Hamstrings"),
    ex("Bent-over Rows", Category::Back, "Lats, Rhomboids"),
    ex("T-Bar Rows", Category::Back, "Lats, Rhomboids"),
    ex("Lat Pulldowns", Category::Back, "Lats"),
    ex("Seated Cable Rows", Category::Back, "Lats, Rhomboids"),
    ex("Squats", Category::Legs, "Quads, Glutes"),
    ex("Lunges", Category::Legs, "Quads, Glutes"),
    ex("Leg Press", Category::Legs, "Quads, Glutes"),
    ex("Romanian Deadlifts", Category::Legs, "Hamstrings, Glutes"),
    ex("Leg Curls", Category::Legs, "Hamstrings"),
    ex("Leg Extensions", Category::Legs, "Quadriceps"),
    ex("Calf Raises", Category::Legs, "Calves"),
    ex("Bulgarian Split Squats", Category::Legs, "Quads, Glutes"),
    ex("Overhead Press", Category::Shoulders, "Shoulders, Triceps"),
    ex("Lateral Raises", Category::Shoulders, "Side Delts"),
    ex("Front Raises", Category::Shoulders, "Front Delts"),
    ex("Rear Delt Flyes", Category::Shoulders, "Rear Delts"),
    ex("Arnold Press", Category::Shoulders, "Shoulders"),
    ex("Upright Rows", Category::Shoulders, "Shoulders, Traps"),
    ex("Bicep Curls", Category::Arms, "Biceps"),
    ex("Hammer Curls", Category::Arms, "Biceps, Forearms"),
    ex("Tricep Dips", Category::Arms, "Triceps"),
    ex("Tricep Extensions", Category::Arms, "Triceps"),
    ex("Close-grip Bench Press", Category::Arms, "Triceps, Chest"),
    ex("Preacher Curls", Category::Arms, "Biceps"),
    ex("Plank", Category::Core, "Core"),
    ex("Crunches", Category::Core, "Abs"),
    ex("Russian Twists", Category::Core, "Obliques"),
    ex("Mountain Climbers", Category::Core, "Core, Cardio"),
    ex("Dead Bug", Category::Core, "Core"),
    ex("Bicycle Crunches", Category::Core, "Abs, Obliques"),
    ex("Burpees", Category::Cardio, "Full Body"),
    ex("Jumping Jacks", Category::Cardio, "Full Body"),
    ex("High Knees", Category::Cardio, "Legs, Cardio"),
    ex("Jump Rope", Category::Cardio, "Full Body"),
    ex("Box Jumps", Category::Cardio, "Legs, Cardio"),
];

/// Search text plus an optional category; both must match
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ExerciseFilter {
    query: String,
    category: Option<Category>,
}

impl ExerciseFilter {
    pub(crate) fn new(query: &str, category: Option<Category>) -> ExerciseFilter {
        ExerciseFilter {
            query: query.trim().to_lowercase(),
            category,
        }
    }

    /// The query matches, case-insensitively, anywhere in the exercise's
    /// name or in its muscle list
    pub(crate) fn matches(&self, exercise: &Exercise) -> bool {
        let matches_search = exercise.name.to_lowercase().contains(&self.query)
            || exercise.muscles.to_lowercase().contains(&self.query);
        let matches_category = self.category.map_or(true, |c| c == exercise.category);
        matches_search && matches_category
    }

    pub(crate) fn apply<'a>(&self, exercises: &'a [Exercise]) -> Vec<&'a Exercise> {
        exercises.iter().filter(|e| self.matches(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(filter: &ExerciseFilter) -> Vec<&'static str> {
        filter.apply(CATALOG).into_iter().map(|e| e.name).collect()
    }

    #[test]
    fn test_catalog_size() {
        assert_eq!(CATALOG.len(), 44);
        for c in Category::ALL {
            assert!(CATALOG.iter().any(|e| e.category == c), "{c}");
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert_eq!(ExerciseFilter::default().apply(CATALOG).len(), CATALOG.len());
        assert_eq!(ExerciseFilter::new("  ", None).apply(CATALOG).len(), CATALOG.len());
    }

    #[test]
    fn test_query_matches_name_case_insensitively() {
        assert_eq!(
            names(&ExerciseFilter::new("BENCH", None)),
            [
                "Bench Press",
                "Incline Bench Press",
                "Decline Bench Press",
                "Close-grip Bench Press"
            ]
        );
    }

    #[test]
    fn test_query_matches_muscles() {
        let found = names(&ExerciseFilter::new("rhomboids", None));
        assert_eq!(found, ["Bent-over Rows", "T-Bar Rows", "Seated Cable Rows"]);
    }

    #[test]
    fn test_category_restricts() {
        let found = names(&ExerciseFilter::new("triceps", Some(Category::Arms)));
        assert_eq!(
            found,
            ["Tricep Dips", "Tricep Extensions", "Close-grip Bench Press"]
        );
        let core = names(&ExerciseFilter::new("", Some(Category::Core)));
        assert_eq!(core.len(), 6);
    }

    #[test]
    fn test_no_match() {
        assert!(names(&ExerciseFilter::new("zumba", None)).is_empty());
    }

    #[test]
    fn test_parse_category() {
        assert_eq!("legs".parse::<Category>(), Ok(Category::Legs));
        assert_eq!(Category::parse_filter("ALL"), Ok(None));
        assert_eq!(Category::parse_filter(" Cardio "), Ok(Some(Category::Cardio)));
        assert_eq!(
            "yoga".parse::<Category>(),
            Err(UnknownCategoryError("yoga".into()))
        );
    }
}
