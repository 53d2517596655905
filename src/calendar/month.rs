use std::fmt;
use thiserror::Error;
use time::{Date, Month};

/// Earliest year whose months can be displayed.  The month grid for January
/// of this year still needs the last days of the previous December, so the
/// limit sits one year inside what [`Date`] can represent.
pub(crate) const MIN_YEAR: i32 = -9998;

/// Latest year whose months can be displayed
pub(crate) const MAX_YEAR: i32 = 9998;

/// A calendar month of a specific year: the "reference month" shown by the
/// calendar.
///
/// Invariant: `MIN_YEAR <= year <= MAX_YEAR`, so the first day of the month
/// and of both of its neighbors always exist.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    pub(crate) fn new(year: i32, month: Month) -> Result<YearMonth, OutOfTimeError> {
        if (MIN_YEAR..=MAX_YEAR).contains(&year) {
            Ok(YearMonth { year, month })
        } else {
            Err(OutOfTimeError)
        }
    }

    /// Construct from a year and a zero-based month index that may lie
    /// outside `0..12`; the excess carries into the year, so `(2025, -1)` is
    /// December 2024 and `(2025, 12)` is January 2026.
    pub(crate) fn from_index0(year: i32, month_index0: i64) -> Result<YearMonth, OutOfTimeError> {
        let year = i64::from(year) + month_index0.div_euclid(12);
        let year = i32::try_from(year).map_err(|_| OutOfTimeError)?;
        let index0 = u8::try_from(month_index0.rem_euclid(12))
            .expect("remainder of division by 12 should fit in a u8");
        let month = Month::try_from(index0 + 1).expect("month index should be in range 1..=12");
        YearMonth::new(year, month)
    }

    /// The month containing `date`
    pub(crate) fn of(date: Date) -> Result<YearMonth, OutOfTimeError> {
        YearMonth::new(date.year(), date.month())
    }

    /// Zero-based month index, January = 0
    pub(crate) fn index0(self) -> u8 {
        u8::from(self.month) - 1
    }

    pub(crate) fn first_day(self) -> Date {
        Date::from_calendar_date(self.year, self.month, 1)
            .expect("first day of a supported month should exist")
    }

    /// Number of days in the month, computed as "day zero" of the following
    /// month, i.e., the day before the 1st of the next month
    pub(crate) fn days_in_month(self) -> u8 {
        self.last_day().day()
    }

    pub(crate) fn last_day(self) -> Date {
        self.following()
            .first_day()
            .previous_day()
            .expect("day before the 1st of a supported month should exist")
    }

    /// Returns `true` if `date` falls within this month
    pub(crate) fn contains(self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The date in this month with the given day number, clamped to the
    /// last day of the month
    pub(crate) fn clamped_day(self, day: u8) -> Date {
        let day = day.clamp(1, self.days_in_month());
        Date::from_calendar_date(self.year, self.month, day)
            .expect("clamped day should exist within the month")
    }

    pub(crate) fn next(self) -> Result<YearMonth, OutOfTimeError> {
        YearMonth::from_index0(self.year, i64::from(self.index0()) + 1)
    }

    pub(crate) fn previous(self) -> Result<YearMonth, OutOfTimeError> {
        YearMonth::from_index0(self.year, i64::from(self.index0()) - 1)
    }

    // The following month of a supported month is representable even when it
    // lies outside the supported year range, so this bypasses the check.
    fn following(self) -> YearMonth {
        match self.month {
            Month::December => YearMonth {
                year: self.year + 1,
                month: Month::January,
            },
            m => YearMonth {
                year: self.year,
                month: m.next(),
            },
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn ym(year: i32, month: Month) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_from_index0_carries_into_year() {
        assert_eq!(
            YearMonth::from_index0(2025, -1),
            Ok(ym(2024, Month::December))
        );
        assert_eq!(
            YearMonth::from_index0(2025, 12),
            Ok(ym(2026, Month::January))
        );
        assert_eq!(
            YearMonth::from_index0(2025, -13),
            Ok(ym(2023, Month::December))
        );
        assert_eq!(YearMonth::from_index0(2025, 0), Ok(ym(2025, Month::January)));
        assert_eq!(YearMonth::from_index0(2025, 11), Ok(ym(2025, Month::December)));
    }

    #[test]
    fn test_navigation_across_year() {
        let jan = ym(2025, Month::January);
        assert_eq!(jan.previous(), Ok(ym(2024, Month::December)));
        assert_eq!(ym(2024, Month::December).next(), Ok(jan));
        assert_eq!(jan.next(), Ok(ym(2025, Month::February)));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(YearMonth::new(MAX_YEAR + 1, Month::January), Err(OutOfTimeError));
        assert_eq!(YearMonth::new(MIN_YEAR - 1, Month::December), Err(OutOfTimeError));
        assert_eq!(ym(MAX_YEAR, Month::December).next(), Err(OutOfTimeError));
        assert_eq!(ym(MIN_YEAR, Month::January).previous(), Err(OutOfTimeError));
        assert_eq!(YearMonth::from_index0(i32::MAX, 12), Err(OutOfTimeError));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(ym(2025, Month::January).days_in_month(), 31);
        assert_eq!(ym(2025, Month::April).days_in_month(), 30);
        assert_eq!(ym(2024, Month::February).days_in_month(), 29);
        assert_eq!(ym(2025, Month::February).days_in_month(), 28);
        assert_eq!(ym(1900, Month::February).days_in_month(), 28);
        assert_eq!(ym(2000, Month::February).days_in_month(), 29);
        assert_eq!(ym(MAX_YEAR, Month::December).days_in_month(), 31);
    }

    #[test]
    fn test_clamped_day() {
        let feb = ym(2025, Month::February);
        assert_eq!(feb.clamped_day(31), date!(2025 - 02 - 28));
        assert_eq!(feb.clamped_day(0), date!(2025 - 02 - 01));
        assert_eq!(feb.clamped_day(14), date!(2025 - 02 - 14));
    }

    #[test]
    fn test_contains_and_of() {
        let jan = ym(2025, Month::January);
        assert!(jan.contains(date!(2025 - 01 - 31)));
        assert!(!jan.contains(date!(2024 - 01 - 15)));
        assert!(!jan.contains(date!(2025 - 02 - 01)));
        assert_eq!(YearMonth::of(date!(2025 - 01 - 16)), Ok(jan));
        assert_eq!(jan.last_day(), date!(2025 - 01 - 31));
    }

    #[test]
    fn test_display() {
        assert_eq!(ym(2025, Month::January).to_string(), "January 2025");
    }
}
