//! Workout routines: named lists of exercises, each with its sets, reps and
//! load

use crate::exercises::CATALOG;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use time::OffsetDateTime;

/// Number of sets a newly added exercise starts with
pub(crate) const DEFAULT_SETS: u32 = 3;

/// Shown in a summary in place of a value that has not been entered
const BLANK: &str = "—";

/// A saved workout routine
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Routine {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) exercises: Vec<RoutineExercise>,
}

impl fmt::Display for Routine {
    /// The routine's name, its number of exercises, and each exercise with
    /// its summary beneath it
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        match self.exercises.len() {
            1 => writeln!(f, "1 exercise")?,
            n => writeln!(f, "{n} exercises")?,
        }
        for ex in &self.exercises {
            writeln!(f)?;
            writeln!(f, "  {}", ex.name)?;
            writeln!(f, "    {}", ex.summary())?;
        }
        Ok(())
    }
}

/// One exercise within a routine
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RoutineExercise {
    pub(crate) name: String,
    pub(crate) sets: u32,
    pub(crate) reps: Reps,
    pub(crate) load: Load,
}

impl RoutineExercise {
    pub(crate) fn new(name: String) -> RoutineExercise {
        RoutineExercise {
            name,
            sets: DEFAULT_SETS,
            reps: Reps::default(),
            load: Load::default(),
        }
    }

    /// Set the number of sets.  There is always at least one.
    pub(crate) fn set_sets(&mut self, sets: u32) {
        self.sets = sets.max(1);
    }

    /// Set the rep count, or the low end of the range if the exercise uses a
    /// rep range
    pub(crate) fn set_reps(&mut self, reps: u32) {
        match &mut self.reps {
            Reps::Count(n) => *n = Some(reps),
            Reps::Range { min, .. } => *min = Some(reps),
        }
    }

    pub(crate) fn set_rep_max(&mut self, reps: u32) -> Result<(), RoutineError> {
        match &mut self.reps {
            Reps::Count(_) => Err(RoutineError::NotARange(self.name.clone())),
            Reps::Range { max, .. } => {
                *max = Some(reps);
                Ok(())
            }
        }
    }

    /// Switch between a single rep count and a rep range.  Turning the range
    /// on keeps the current count as the low end; turning it off clears the
    /// reps.
    pub(crate) fn toggle_rep_range(&mut self) {
        self.reps = match self.reps {
            Reps::Count(n) => Reps::Range { min: n, max: None },
            Reps::Range { .. } => Reps::Count(None),
        };
    }

    /// Switch between an entered weight and bodyweight.  Either way the
    /// weight ends up blank.
    pub(crate) fn toggle_body_weight(&mut self) {
        self.load = match self.load {
            Load::Weight(_) => Load::BodyWeight,
            Load::BodyWeight => Load::Weight(None),
        };
    }

    /// Set the weight as free text, such as "135 lb".  A blank weight clears
    /// it.
    pub(crate) fn set_weight(&mut self, weight: &str) {
        let weight = weight.trim();
        self.load = Load::Weight((!weight.is_empty()).then(|| weight.to_owned()));
    }

    /// A one-line summary such as "3 sets × 8-12 × BW"
    pub(crate) fn summary(&self) -> String {
        format!("{} sets × {} × {}", self.sets, self.reps, self.load)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum Reps {
    Count(Option<u32>),
    Range { min: Option<u32>, max: Option<u32> },
}

impl Default for Reps {
    fn default() -> Reps {
        Reps::Count(None)
    }
}

impl fmt::Display for Reps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Reps::Count(n) => write!(f, "{}", Blankable(n)),
            Reps::Range { min, max } => write!(f, "{}-{}", Blankable(min), Blankable(max)),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum Load {
    Weight(Option<String>),
    BodyWeight,
}

impl Default for Load {
    fn default() -> Load {
        Load::Weight(None)
    }
}

impl fmt::Display for Load {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Load::Weight(Some(w)) => write!(f, "{w}"),
            Load::Weight(None) => write!(f, "{BLANK}"),
            Load::BodyWeight => write!(f, "BW"),
        }
    }
}

struct Blankable(Option<u32>);

impl fmt::Display for Blankable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{n}"),
            None => write!(f, "{BLANK}"),
        }
    }
}

/// A routine being composed, not yet validated or saved
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct RoutineDraft {
    name: String,
    exercises: Vec<RoutineExercise>,
}

impl RoutineDraft {
    pub(crate) fn new(name: &str) -> RoutineDraft {
        RoutineDraft {
            name: name.to_owned(),
            exercises: Vec::new(),
        }
    }

    /// Append an exercise and return it for further editing.
    ///
    /// A name matching a catalog exercise (ignoring case) takes the catalog's
    /// spelling; anything else is added as a custom exercise.
    pub(crate) fn add_exercise(
        &mut self,
        name: &str,
    ) -> Result<&mut RoutineExercise, RoutineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RoutineError::MissingExerciseName);
        }
        let name = CATALOG
            .iter()
            .find(|ex| ex.name.eq_ignore_ascii_case(name))
            .map_or(name, |ex| ex.name);
        self.exercises.push(RoutineExercise::new(name.to_owned()));
        let i = self.exercises.len() - 1;
        Ok(&mut self.exercises[i])
    }

    /// The most recently added exercise
    pub(crate) fn last_exercise(&mut self) -> Option<&mut RoutineExercise> {
        self.exercises.last_mut()
    }

    /// Validate the draft and turn it into a routine with an ID not used by
    /// any of `existing`
    pub(crate) fn save(
        self,
        existing: &[Routine],
        now: OffsetDateTime,
    ) -> Result<Routine, RoutineError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RoutineError::MissingName);
        }
        if self.exercises.is_empty() {
            return Err(RoutineError::NoExercises);
        }
        let mut millis = now.unix_timestamp_nanos() / 1_000_000;
        while existing.iter().any(|r| r.id == millis.to_string()) {
            millis += 1;
        }
        let routine = Routine {
            id: millis.to_string(),
            name: name.to_owned(),
            exercises: self.exercises,
        };
        tracing::info!(
            id = %routine.id,
            name = %routine.name,
            exercises = routine.exercises.len(),
            "saved routine"
        );
        Ok(routine)
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum RoutineError {
    #[error("Please enter a workout name")]
    MissingName,
    #[error("Please add at least one exercise")]
    NoExercises,
    #[error("Please enter an exercise name")]
    MissingExerciseName,
    #[error("{0} does not use a rep range")]
    NotARange(String),
}
