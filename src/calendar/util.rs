use time::{
    format_description::FormatItem, macros::format_description, Date, OffsetDateTime, Weekday,
};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

static LONG_DATE_FMT: &[FormatItem<'_>] =
    format_description!("[weekday], [month repr:long] [day padding:none], [year]");

static CLOCK_FMT: &[FormatItem<'_>] =
    format_description!("[hour repr:12 padding:none]:[minute] [period]");

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_sunday()
    }
}

pub(crate) fn parse_ymd(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, &YMD_FMT)
}

/// Parse a `YYYY-MM` string into the first day of that month
pub(crate) fn parse_year_month(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(&format!("{s}-01"), &YMD_FMT)
}

/// Format a date like "Wednesday, January 15, 2025"
pub(crate) fn long_date(date: Date) -> String {
    date.format(&LONG_DATE_FMT)
        .unwrap_or_else(|_| date.to_string())
}

/// Format the time of day of a timestamp like "10:30 AM"
pub(crate) fn clock_time(when: OffsetDateTime) -> String {
    when.format(&CLOCK_FMT)
        .unwrap_or_else(|_| when.time().to_string())
}
