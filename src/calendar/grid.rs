use super::month::YearMonth;
use super::util::{WeekdayExt, DAYS_IN_WEEK};
use crate::workout::{ScheduledWorkout, WorkoutStatus};
use std::iter::successors;
use time::Date;

/// Number of weeks shown for every month, whether or not the month needs
/// them all
pub(crate) const GRID_WEEKS: usize = 6;

pub(crate) const GRID_CELLS: usize = GRID_WEEKS * DAYS_IN_WEEK;

/// Maximum number of workout markers drawn in a day cell; the rest are
/// summarized as "+N"
pub(crate) const MAX_INDICATORS: usize = 3;

/// One cell of the month grid
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarDay {
    pub(crate) date: Date,
    /// Day of the cell's own month, not of the reference month
    pub(crate) day: u8,
    pub(crate) is_current_month: bool,
    pub(crate) is_today: bool,
    /// Workouts on `date`, in the order of the input list
    pub(crate) workouts: Vec<ScheduledWorkout>,
}

impl CalendarDay {
    fn new(date: Date, month: YearMonth, today: Date, workouts: &[ScheduledWorkout]) -> Self {
        CalendarDay {
            date,
            day: date.day(),
            is_current_month: month.contains(date),
            is_today: date == today,
            workouts: workouts.iter().filter(|w| w.date == date).cloned().collect(),
        }
    }

    pub(crate) fn indicators(&self, today: Date) -> Indicators {
        Indicators {
            statuses: self
                .workouts
                .iter()
                .take(MAX_INDICATORS)
                .map(|w| w.status(today))
                .collect(),
            overflow: self.workouts.len().saturating_sub(MAX_INDICATORS),
        }
    }
}

/// Workout markers for a single day cell
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Indicators {
    pub(crate) statuses: Vec<WorkoutStatus>,
    /// Number of workouts beyond the first `MAX_INDICATORS`
    pub(crate) overflow: usize,
}

/// A month laid out as six Sunday-first weeks: the tail of the previous
/// month, every day of the reference month, and the head of the next month.
///
/// Invariant: the cells are consecutive days in ascending order, and the
/// first cell is a Sunday.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarGrid {
    month: YearMonth,
    today: Date,
    days: [CalendarDay; GRID_CELLS],
}

impl CalendarGrid {
    /// Lay out `month` and attach each workout to the cell for its date.
    ///
    /// `today` only marks a cell and need not fall within the grid.
    /// Workouts outside the displayed six weeks are ignored.
    pub(crate) fn build(month: YearMonth, workouts: &[ScheduledWorkout], today: Date) -> Self {
        let first = month.first_day();
        let lead_offset = usize::from(first.weekday().index0());
        let start = successors(Some(first), |&d| d.previous_day())
            .nth(lead_offset)
            .expect("trailing days of the previous month should exist");
        let mut dates = successors(Some(start), |&d| d.next_day());
        let days = std::array::from_fn(|_| {
            let date = dates
                .next()
                .expect("leading days of the next month should exist");
            CalendarDay::new(date, month, today, workouts)
        });
        let grid = CalendarGrid { month, today, days };
        tracing::debug!(
            %month,
            first = %grid.first_date(),
            last = %grid.last_date(),
            lead_offset = grid.lead_offset(),
            trailing_days = grid.trailing_days(),
            workouts = workouts.len(),
            "built calendar grid"
        );
        grid
    }

    pub(crate) fn month(&self) -> YearMonth {
        self.month
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    /// The six rows of the grid, each running Sunday through Saturday
    pub(crate) fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> + '_ {
        self.days.chunks_exact(DAYS_IN_WEEK)
    }

    pub(crate) fn first_date(&self) -> Date {
        self.days[0].date
    }

    pub(crate) fn last_date(&self) -> Date {
        self.days[GRID_CELLS - 1].date
    }

    /// Index of the cell for `date`, if it is displayed
    pub(crate) fn position(&self, date: Date) -> Option<usize> {
        let offset = (date - self.first_date()).whole_days();
        usize::try_from(offset).ok().filter(|&i| i < GRID_CELLS)
    }

    pub(crate) fn get(&self, date: Date) -> Option<&CalendarDay> {
        self.position(date).map(|i| &self.days[i])
    }

    /// Number of previous-month days padding the first week
    pub(crate) fn lead_offset(&self) -> usize {
        self.days.iter().take_while(|d| !d.is_current_month).count()
    }

    /// Number of next-month days filling out the last weeks
    pub(crate) fn trailing_days(&self) -> usize {
        self.days
            .iter()
            .rev()
            .take_while(|d| !d.is_current_month)
            .count()
    }

    pub(crate) fn current_month_days(&self) -> impl Iterator<Item = &CalendarDay> + '_ {
        self.days.iter().filter(|d| d.is_current_month)
    }

    /// All workouts in the displayed window, in grid order
    pub(crate) fn workouts(&self) -> impl Iterator<Item = &ScheduledWorkout> + '_ {
        self.days.iter().flat_map(|d| d.workouts.iter())
    }
}
