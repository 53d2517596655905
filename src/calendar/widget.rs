use super::grid::{CalendarDay, CalendarGrid};
use crate::theme::{
    status_style, BASE_STYLE, OTHER_MONTH_STYLE, SELECTED_MODIFIER, TITLE_STYLE, TODAY_STYLE,
    WEEKDAY_STYLE,
};
use ratatui::{layout::Flex, prelude::*, widgets::*};
use time::Date;

static HEADER: &str = " Su     Mo     Tu     We     Th     Fr     Sa ";

/// Width of the calendar in columns
pub(crate) const MAIN_WIDTH: u16 = 46;

/// Number of lines taken up by the title, the weekday header, and its rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the calendar: one for the day
/// numbers and one for the workout markers
const WEEK_LINES: u16 = 2;

/// Number of lines needed to draw all six weeks
pub(crate) const TOTAL_HEIGHT: u16 = HEADER_LINES + WEEK_LINES * 6;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 7;

const ACS_HLINE: char = '─';

const WORKOUT_MARKER: char = '●';

/// Draws a [`CalendarGrid`] as a month view, optionally highlighting one
/// selected day
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Calendar<'a> {
    grid: &'a CalendarGrid,
    selected: Option<Date>,
}

impl<'a> Calendar<'a> {
    pub(crate) fn new(grid: &'a CalendarGrid) -> Self {
        Calendar {
            grid,
            selected: None,
        }
    }

    pub(crate) fn selected(mut self, date: Date) -> Self {
        self.selected = Some(date);
        self
    }

    fn day_style(&self, day: &CalendarDay) -> Style {
        let style = if day.is_today {
            TODAY_STYLE
        } else if day.is_current_month {
            BASE_STYLE
        } else {
            OTHER_MONTH_STYLE
        };
        if self.selected == Some(day.date) {
            style.add_modifier(SELECTED_MODIFIER)
        } else {
            style
        }
    }
}

impl Widget for Calendar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([MAIN_WIDTH.min(area.width)])
            .flex(Flex::Center)
            .areas(area);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&self.grid.month().to_string());
        canvas.draw_header();
        let today = self.grid.today();
        for (i, week) in std::iter::zip(0u16.., self.grid.weeks()) {
            for (col, day) in std::iter::zip(0u16.., week) {
                canvas.draw_day(i, col, &show_day(day), self.day_style(day));
                let indicators = day.indicators(today);
                let mut spans = indicators
                    .statuses
                    .iter()
                    .map(|&st| Span::styled(WORKOUT_MARKER.to_string(), status_style(st)))
                    .collect::<Vec<_>>();
                if indicators.overflow > 0 {
                    spans.push(Span::styled(
                        format!("+{}", indicators.overflow),
                        OTHER_MONTH_STYLE,
                    ));
                }
                canvas.draw_markers(i, col, Line::from(spans));
            }
        }
    }
}

/// The day number as drawn in its cell, bracketed if it is today
pub(crate) fn show_day(day: &CalendarDay) -> String {
    if day.is_today {
        format!("[{:2}]", day.day)
    } else {
        format!(" {:2} ", day.day)
    }
}

/// Render `grid` as plain text with no styling.  Today is bracketed and days
/// outside the reference month are parenthesized.
pub(crate) fn plain_grid(grid: &CalendarGrid) -> String {
    let title = grid.month().to_string();
    let mut lines = vec![format!("{title:^46}"), String::from(HEADER)];
    for week in grid.weeks() {
        let cells = week
            .iter()
            .map(|day| {
                if day.is_current_month || day.is_today {
                    show_day(day)
                } else {
                    format!("({:2})", day.day)
                }
            })
            .collect::<Vec<_>>();
        lines.push(cells.join("   "));
    }
    let mut out = String::new();
    for ln in lines {
        out.push_str(ln.trim_end());
        out.push('\n');
    }
    out
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(title.chars().count()).unwrap_or(u16::MAX);
        let x = MAIN_WIDTH.saturating_sub(width) / 2;
        self.mvprint(0, x, Line::styled(title, TITLE_STYLE));
    }

    fn draw_header(&mut self) {
        self.mvprint(1, 0, Line::styled(HEADER, WEEKDAY_STYLE));
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, col: u16, s: &str, style: Style) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            DAY_WIDTH * col,
            Line::styled(s, style),
        );
    }

    fn draw_markers(&mut self, week_no: u16, col: u16, line: Line<'_>) {
        self.mvprint(week_no * WEEK_LINES + HEADER_LINES + 1, DAY_WIDTH * col + 1, line);
    }

    fn mvprint(&mut self, y: u16, x: u16, line: Line<'_>) {
        if y < self.area.height && x < self.area.width {
            let width = u16::try_from(line.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(line).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(
            y,
            x,
            Line::styled(String::from(ch).repeat(length.into()), BASE_STYLE),
        );
    }
}
