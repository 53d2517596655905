use crate::workout::WorkoutStatus;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const OTHER_MONTH_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const TODAY_STYLE: Style = BASE_STYLE
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

pub(crate) const SELECTED_MODIFIER: Modifier = Modifier::REVERSED;

pub(crate) const COMPLETED_STYLE: Style = BASE_STYLE.fg(Color::Green);

pub(crate) const MISSED_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

pub(crate) const SCHEDULED_STYLE: Style = BASE_STYLE.fg(Color::LightBlue);

pub(crate) const MUTED_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const NOTICE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) fn status_style(status: WorkoutStatus) -> Style {
    match status {
        WorkoutStatus::Completed => COMPLETED_STYLE,
        WorkoutStatus::Missed => MISSED_STYLE,
        WorkoutStatus::Scheduled => SCHEDULED_STYLE,
    }
}

pub(crate) mod form {
    use super::*;

    pub(crate) const UNFILLED_FIELD_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const ACTIVE_FIELD_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
