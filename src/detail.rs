use crate::calendar::util::{clock_time, long_date};
use crate::theme::{status_style, BASE_STYLE, MUTED_STYLE, SELECTED_MODIFIER, TITLE_STYLE};
use crate::workout::ScheduledWorkout;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use time::Date;

/// The list of workouts scheduled on the selected day
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DayDetail<'a> {
    date: Date,
    today: Date,
    workouts: Vec<&'a ScheduledWorkout>,
    cursor: Option<usize>,
}

impl<'a> DayDetail<'a> {
    pub(crate) fn new(date: Date, today: Date, workouts: Vec<&'a ScheduledWorkout>) -> Self {
        DayDetail {
            date,
            today,
            workouts,
            cursor: None,
        }
    }

    /// Highlight the workout at index `cursor`
    pub(crate) fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = Some(cursor);
        self
    }

    fn to_text(&self) -> Text<'static> {
        let mut lines = vec![Line::styled(long_date(self.date), TITLE_STYLE), Line::raw("")];
        if self.workouts.is_empty() {
            lines.push(Line::styled("No workouts scheduled", BASE_STYLE));
            lines.push(Line::styled(
                "Press a to schedule a workout for this day",
                MUTED_STYLE,
            ));
        }
        for (i, w) in self.workouts.iter().enumerate() {
            let status = w.status(self.today);
            let check = if w.completed { "[x] " } else { "[ ] " };
            let mut name_style = BASE_STYLE;
            if self.cursor == Some(i) {
                name_style = name_style.add_modifier(SELECTED_MODIFIER);
            }
            lines.push(Line::from_iter([
                Span::styled(check, status_style(status)),
                Span::styled(w.workout_name.clone(), name_style),
            ]));
            let meta = if w.exercises > 0 {
                format!("    {} min · {} exercises", w.duration, w.exercises)
            } else {
                format!("    {} min", w.duration)
            };
            lines.push(Line::styled(meta, MUTED_STYLE));
            let mut status_line = vec![
                Span::raw("    "),
                Span::styled(status.label(), status_style(status)),
            ];
            if let Some(when) = w.completed_at.filter(|_| w.completed) {
                status_line.push(Span::styled(
                    format!(" · Completed at {}", clock_time(when)),
                    MUTED_STYLE,
                ));
            }
            lines.push(Line::from(status_line));
        }
        Text::from(lines)
    }
}

impl Widget for DayDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.to_text())
            .block(Block::bordered().title(" Workouts "))
            .style(BASE_STYLE)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
