use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Date, OffsetDateTime};

time::serde::format_description!(ymd_date, Date, "[year]-[month]-[day]");

/// A workout scheduled on a specific calendar day, as supplied by the data
/// service
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScheduledWorkout {
    pub(crate) id: String,
    #[serde(with = "ymd_date")]
    pub(crate) date: Date,
    pub(crate) workout_name: String,
    #[serde(default)]
    pub(crate) exercises: u32,
    /// Planned length in minutes
    #[serde(default)]
    pub(crate) duration: u32,
    #[serde(default)]
    pub(crate) completed: bool,
    // Present iff `completed` is true; upheld by `Schedule::toggle_completion`
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) completed_at: Option<OffsetDateTime>,
}

impl ScheduledWorkout {
    /// Classify the workout relative to `today`.  Completion takes
    /// precedence over the date; an uncompleted workout is missed only if its
    /// date is strictly before `today`.
    pub(crate) fn status(&self, today: Date) -> WorkoutStatus {
        if self.completed {
            WorkoutStatus::Completed
        } else if self.date < today {
            WorkoutStatus::Missed
        } else {
            WorkoutStatus::Scheduled
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum WorkoutStatus {
    Completed,
    Missed,
    Scheduled,
}

impl WorkoutStatus {
    pub(crate) fn label(self) -> &'static str {
        match self {
            WorkoutStatus::Completed => "Completed",
            WorkoutStatus::Missed => "Missed",
            WorkoutStatus::Scheduled => "Scheduled",
        }
    }
}

impl fmt::Display for WorkoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn workout(date: Date, completed: bool) -> ScheduledWorkout {
        ScheduledWorkout {
            id: String::from("1"),
            date,
            workout_name: String::from("Leg Day"),
            exercises: 7,
            duration: 60,
            completed,
            completed_at: completed.then_some(datetime!(2025-01-15 10:30 UTC)),
        }
    }

    #[test]
    fn test_completed_wins_over_past_date() {
        let w = workout(date!(2025 - 01 - 10), true);
        assert_eq!(w.status(date!(2025 - 01 - 16)), WorkoutStatus::Completed);
    }

    #[test]
    fn test_completed_in_future() {
        let w = workout(date!(2025 - 01 - 20), true);
        assert_eq!(w.status(date!(2025 - 01 - 16)), WorkoutStatus::Completed);
    }

    #[test]
    fn test_missed() {
        let w = workout(date!(2025 - 01 - 15), false);
        assert_eq!(w.status(date!(2025 - 01 - 16)), WorkoutStatus::Missed);
    }

    #[test]
    fn test_scheduled_today_and_later() {
        let today = date!(2025 - 01 - 16);
        assert_eq!(
            workout(date!(2025 - 01 - 16), false).status(today),
            WorkoutStatus::Scheduled
        );
        assert_eq!(
            workout(date!(2025 - 01 - 17), false).status(today),
            WorkoutStatus::Scheduled
        );
    }

    #[test]
    fn test_status_follows_today() {
        let w = workout(date!(2025 - 01 - 17), false);
        assert_eq!(w.status(date!(2025 - 01 - 17)), WorkoutStatus::Scheduled);
        assert_eq!(w.status(date!(2025 - 01 - 18)), WorkoutStatus::Missed);
    }

    #[test]
    fn test_deserialize() {
        let src = r#"{
            "id": "1",
            "date": "2025-01-15",
            "workoutName": "Upper Body Strength",
            "exercises": 6,
            "duration": 45,
            "completed": true,
            "completedAt": "2025-01-15T10:30:00Z"
        }"#;
        let w = serde_json::from_str::<ScheduledWorkout>(src).unwrap();
        assert_eq!(w.date, date!(2025 - 01 - 15));
        assert_eq!(w.workout_name, "Upper Body Strength");
        assert_eq!(w.exercises, 6);
        assert_eq!(w.duration, 45);
        assert!(w.completed);
        assert_eq!(w.completed_at, Some(datetime!(2025-01-15 10:30 UTC)));
    }

    #[test]
    fn test_serialize_omits_missing_completed_at() {
        let w = workout(date!(2025 - 01 - 17), false);
        let value = serde_json::to_value(&w).unwrap();
        assert_eq!(value["date"], "2025-01-17");
        assert_eq!(value["workoutName"], "Leg Day");
        assert!(value.get("completedAt").is_none());
    }

    #[test]
    fn test_reject_malformed_date() {
        let src = r#"{"id": "1", "date": "01/15/2025", "workoutName": "x"}"#;
        assert!(serde_json::from_str::<ScheduledWorkout>(src).is_err());
    }
}
