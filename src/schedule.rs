use crate::workout::ScheduledWorkout;
use thiserror::Error;
use time::{Date, OffsetDateTime};

/// Duration in minutes given to a newly scheduled workout when the entered
/// duration is not a number
pub(crate) const DEFAULT_DURATION: u32 = 45;

/// An immutable snapshot of the user's scheduled workouts.
///
/// Changes never happen in place: each mutator returns a new `Schedule`, and
/// the old snapshot stays valid for whoever is still holding it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Schedule(Vec<ScheduledWorkout>);

impl Schedule {
    pub(crate) fn new(workouts: Vec<ScheduledWorkout>) -> Schedule {
        Schedule(workouts)
    }

    pub(crate) fn workouts(&self) -> &[ScheduledWorkout] {
        &self.0
    }

    pub(crate) fn get(&self, id: &str) -> Option<&ScheduledWorkout> {
        self.0.iter().find(|w| w.id == id)
    }

    /// Workouts on `date` in schedule order
    pub(crate) fn on_date(&self, date: Date) -> Vec<&ScheduledWorkout> {
        self.0.iter().filter(|w| w.date == date).collect()
    }

    /// Return a new schedule with a workout named `name` added on `date`,
    /// along with the new workout's ID.
    ///
    /// `duration` is the user's raw input; anything that does not parse as a
    /// number of minutes falls back to [`DEFAULT_DURATION`].
    pub(crate) fn schedule(
        &self,
        date: Date,
        name: &str,
        duration: &str,
        now: OffsetDateTime,
    ) -> Result<(Schedule, String), ScheduleError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScheduleError::MissingName);
        }
        let duration = duration.trim().parse::<u32>().unwrap_or(DEFAULT_DURATION);
        let id = self.fresh_id(now);
        let mut workouts = self.0.clone();
        workouts.push(ScheduledWorkout {
            id: id.clone(),
            date,
            workout_name: name.to_owned(),
            exercises: 0,
            duration,
            completed: false,
            completed_at: None,
        });
        tracing::info!(%id, %date, name, duration, "scheduled workout");
        Ok((Schedule(workouts), id))
    }

    /// Return a new schedule in which the workout `id` has its completion
    /// flipped.  Completing a workout stamps it with `now`; un-completing it
    /// clears the stamp.
    pub(crate) fn toggle_completion(
        &self,
        id: &str,
        now: OffsetDateTime,
    ) -> Result<Schedule, ScheduleError> {
        if self.get(id).is_none() {
            return Err(ScheduleError::UnknownWorkout(id.to_owned()));
        }
        let workouts = self
            .0
            .iter()
            .map(|w| {
                if w.id == id {
                    let completed = !w.completed;
                    tracing::info!(id, completed, "toggled workout completion");
                    ScheduledWorkout {
                        completed,
                        completed_at: completed.then_some(now),
                        ..w.clone()
                    }
                } else {
                    w.clone()
                }
            })
            .collect();
        Ok(Schedule(workouts))
    }

    // IDs are the creation time in milliseconds, bumped past any ID already
    // in use
    fn fresh_id(&self, now: OffsetDateTime) -> String {
        let mut millis = now.unix_timestamp_nanos() / 1_000_000;
        loop {
            let id = millis.to_string();
            if self.get(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum ScheduleError {
    #[error("Please enter a workout name")]
    MissingName,
    #[error("no scheduled workout with ID {0:?}")]
    UnknownWorkout(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn sample() -> Schedule {
        Schedule::new(vec![
            ScheduledWorkout {
                id: "1".into(),
                date: date!(2025 - 01 - 15),
                workout_name: "Upper Body Strength".into(),
                exercises: 6,
                duration: 45,
                completed: true,
                completed_at: Some(datetime!(2025-01-15 10:30 UTC)),
            },
            ScheduledWorkout {
                id: "2".into(),
                date: date!(2025 - 01 - 17),
                workout_name: "Cardio HIIT".into(),
                exercises: 8,
                duration: 30,
                completed: false,
                completed_at: None,
            },
        ])
    }

    #[test]
    fn test_schedule_adds_workout() {
        let before = sample();
        let now = datetime!(2025-01-16 09:00 UTC);
        let (after, id) = before
            .schedule(date!(2025 - 01 - 18), "  Leg Day ", "60", now)
            .unwrap();
        assert_eq!(before.workouts().len(), 2);
        assert_eq!(after.workouts().len(), 3);
        let w = after.get(&id).unwrap();
        assert_eq!(w.workout_name, "Leg Day");
        assert_eq!(w.date, date!(2025 - 01 - 18));
        assert_eq!(w.duration, 60);
        assert_eq!(w.exercises, 0);
        assert!(!w.completed);
        assert_eq!(w.completed_at, None);
        assert_eq!(id, (now.unix_timestamp() * 1000).to_string());
    }

    #[test]
    fn test_schedule_requires_name() {
        let now = datetime!(2025-01-16 09:00 UTC);
        assert_eq!(
            sample().schedule(date!(2025 - 01 - 18), "   ", "60", now),
            Err(ScheduleError::MissingName)
        );
        assert_eq!(
            ScheduleError::MissingName.to_string(),
            "Please enter a workout name"
        );
    }

    #[test]
    fn test_schedule_duration_fallback() {
        let now = datetime!(2025-01-16 09:00 UTC);
        for input in ["", "abc", "-5", "4.5"] {
            let (s, id) = sample()
                .schedule(date!(2025 - 01 - 18), "Run", input, now)
                .unwrap();
            assert_eq!(s.get(&id).unwrap().duration, DEFAULT_DURATION, "{input:?}");
        }
    }

    #[test]
    fn test_schedule_ids_are_unique() {
        let now = datetime!(2025-01-16 09:00 UTC);
        let (s, id1) = sample().schedule(date!(2025 - 01 - 18), "A", "", now).unwrap();
        let (s, id2) = s.schedule(date!(2025 - 01 - 18), "B", "", now).unwrap();
        assert_ne!(id1, id2);
        let names = s
            .on_date(date!(2025 - 01 - 18))
            .into_iter()
            .map(|w| w.workout_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn test_toggle_completion() {
        let before = sample();
        let now = datetime!(2025-01-17 18:00 UTC);
        let after = before.toggle_completion("2", now).unwrap();
        let w = after.get("2").unwrap();
        assert!(w.completed);
        assert_eq!(w.completed_at, Some(now));
        assert!(!before.get("2").unwrap().completed);
        assert_eq!(after.get("1"), before.get("1"));

        let undone = after.toggle_completion("2", now).unwrap();
        let w = undone.get("2").unwrap();
        assert!(!w.completed);
        assert_eq!(w.completed_at, None);
        assert_eq!(undone, before);
    }

    #[test]
    fn test_toggle_unknown() {
        let now = datetime!(2025-01-17 18:00 UTC);
        assert_eq!(
            sample().toggle_completion("nope", now),
            Err(ScheduleError::UnknownWorkout("nope".into()))
        );
    }

    #[test]
    fn test_on_date() {
        let s = sample();
        assert_eq!(s.on_date(date!(2025 - 01 - 15)).len(), 1);
        assert!(s.on_date(date!(2025 - 01 - 16)).is_empty());
    }
}
