use crate::calendar::{Calendar, CalendarGrid, YearMonth, MAIN_WIDTH, TOTAL_HEIGHT};
use crate::detail::DayDetail;
use crate::form::{FormInput, FormOutput, ScheduleDialog, ScheduleForm};
use crate::help::Help;
use crate::repository::WorkoutRepository;
use crate::schedule::Schedule;
use crate::theme::{BASE_STYLE, NOTICE_STYLE};
use crate::workout::ScheduledWorkout;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Margin, Rect},
    text::Line,
    widgets::{Block, Clear, Paragraph, StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::{Date, Duration, OffsetDateTime};

/// Width of the calendar pane including its margins
const CALENDAR_PANE_WIDTH: u16 = MAIN_WIDTH + 4;

/// Narrowest detail pane worth drawing beside the calendar rather than below
/// it
const MIN_DETAIL_WIDTH: u16 = 32;

static SCHEDULED_NOTICE: &str = "Workout scheduled successfully!";

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<R> {
    repository: R,
    schedule: Schedule,
    today: Date,
    month: YearMonth,
    selected: Date,
    /// Index of the highlighted workout among those on the selected day
    cursor: usize,
    state: AppState,
    notice: Option<String>,
}

impl<R: WorkoutRepository> App<R> {
    pub(crate) fn new(
        repository: R,
        workouts: Vec<ScheduledWorkout>,
        today: Date,
        month: YearMonth,
    ) -> App<R> {
        let selected = if month.contains(today) {
            today
        } else {
            month.first_day()
        };
        App {
            repository,
            schedule: Schedule::new(workouts),
            today,
            month,
            selected,
            cursor: 0,
            state: AppState::Calendar,
            notice: None,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        if self.notice.take().is_some() {
            return true;
        }
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_selection(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_selection(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_selection(-7),
                KeyCode::Char('j') | KeyCode::Down => self.move_selection(7),
                KeyCode::Char('[') | KeyCode::PageUp => self.previous_month(),
                KeyCode::Char(']') | KeyCode::PageDown => self.next_month(),
                KeyCode::Char('0') | KeyCode::Home => self.jump_to_today(),
                KeyCode::Char('a') => {
                    self.state = AppState::Scheduling(ScheduleForm::new(self.selected));
                    true
                }
                KeyCode::Tab => self.next_workout(),
                KeyCode::Char('c' | ' ') => self.toggle_selected(),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Scheduling(form) => {
                let output = match key {
                    KeyCode::Char(c) => form.handle_input(FormInput::Char(c)),
                    KeyCode::Backspace | KeyCode::Delete => form.handle_input(FormInput::Backspace),
                    KeyCode::Tab | KeyCode::BackTab => form.handle_input(FormInput::NextField),
                    KeyCode::Enter => form.handle_input(FormInput::Enter),
                    KeyCode::Esc => form.handle_input(FormInput::Cancel),
                    _ => FormOutput::Invalid,
                };
                match output {
                    FormOutput::Ok => true,
                    FormOutput::Invalid => false,
                    FormOutput::Submit {
                        date,
                        name,
                        duration,
                    } => {
                        self.schedule_workout(date, &name, &duration);
                        true
                    }
                    FormOutput::Cancel => {
                        self.state = AppState::Calendar;
                        true
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn select(&mut self, date: Date, month: YearMonth) {
        self.selected = date;
        self.month = month;
        self.cursor = 0;
    }

    /// Move the selection by `days`, switching the displayed month if the new
    /// date lies in a different one
    fn move_selection(&mut self, days: i64) -> bool {
        let Some(date) = self.selected.checked_add(Duration::days(days)) else {
            return false;
        };
        let month = if self.month.contains(date) {
            self.month
        } else {
            match YearMonth::of(date) {
                Ok(m) => m,
                Err(_) => return false,
            }
        };
        self.select(date, month);
        true
    }

    fn previous_month(&mut self) -> bool {
        let Ok(month) = self.month.previous() else {
            return false;
        };
        self.select(month.clamped_day(self.selected.day()), month);
        true
    }

    fn next_month(&mut self) -> bool {
        let Ok(month) = self.month.next() else {
            return false;
        };
        self.select(month.clamped_day(self.selected.day()), month);
        true
    }

    fn jump_to_today(&mut self) -> bool {
        let Ok(month) = YearMonth::of(self.today) else {
            return false;
        };
        self.select(self.today, month);
        true
    }

    fn next_workout(&mut self) -> bool {
        let count = self.schedule.on_date(self.selected).len();
        if count == 0 {
            return false;
        }
        self.cursor = (self.cursor + 1) % count;
        true
    }

    fn toggle_selected(&mut self) -> bool {
        let Some(id) = self
            .schedule
            .on_date(self.selected)
            .get(self.cursor)
            .map(|w| w.id.clone())
        else {
            return false;
        };
        match self.schedule.toggle_completion(&id, now()) {
            Ok(schedule) => self.commit(schedule),
            Err(e) => self.notice = Some(e.to_string()),
        }
        true
    }

    fn schedule_workout(&mut self, date: Date, name: &str, duration: &str) {
        match self.schedule.schedule(date, name, duration, now()) {
            Ok((schedule, id)) => {
                self.state = AppState::Calendar;
                self.notice = Some(String::from(SCHEDULED_NOTICE));
                self.commit(schedule);
                if let Some(i) = self
                    .schedule
                    .on_date(self.selected)
                    .iter()
                    .position(|w| w.id == id)
                {
                    self.cursor = i;
                }
            }
            // The form stays open beneath the notice so that the user can
            // fix their input.
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    /// Adopt `schedule` as the current snapshot and hand it to the
    /// repository.  A failed save is reported but the new snapshot is kept.
    fn commit(&mut self, schedule: Schedule) {
        if let Err(e) = self.repository.replace(schedule.workouts()) {
            tracing::warn!(error = ?e, "failed to save workouts");
            self.notice = Some(format!("Could not save workouts: {e}"));
        }
        self.schedule = schedule;
    }
}

impl<R: WorkoutRepository> Widget for &mut App<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let grid = CalendarGrid::build(self.month, self.schedule.workouts(), self.today);
        let (cal_area, detail_area) =
            if area.width >= CALENDAR_PANE_WIDTH.saturating_add(MIN_DETAIL_WIDTH) {
                let [cal, detail] = Layout::horizontal([
                    Constraint::Length(CALENDAR_PANE_WIDTH),
                    Constraint::Fill(1),
                ])
                .areas(area);
                (cal, detail)
            } else {
                let [cal, detail] = Layout::vertical([
                    Constraint::Length(TOTAL_HEIGHT + 2),
                    Constraint::Fill(1),
                ])
                .areas(area);
                (cal, detail)
            };
        Calendar::new(&grid)
            .selected(self.selected)
            .render(cal_area.inner(Margin::new(2, 1)), buf);
        let workouts = grid
            .get(self.selected)
            .map(|day| day.workouts.iter().collect::<Vec<_>>())
            .unwrap_or_default();
        DayDetail::new(self.selected, self.today, workouts)
            .cursor(self.cursor)
            .render(detail_area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Scheduling(ref mut form) = self.state {
            ScheduleDialog.render(area, buf, form);
        }
        if let Some(ref msg) = self.notice {
            Notice(msg).render(area, buf);
        }
    }
}

/// A one-line message drawn over the middle of the screen until the next key
/// press
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Notice<'a>(&'a str);

impl Widget for Notice<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = u16::try_from(self.0.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.width);
        let [notice_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [notice_area] = Layout::vertical([Constraint::Length(3)])
            .flex(Flex::Center)
            .areas(notice_area);
        Clear.render(notice_area, buf);
        Paragraph::new(Line::styled(self.0, NOTICE_STYLE))
            .alignment(Alignment::Center)
            .block(Block::bordered())
            .style(BASE_STYLE)
            .render(notice_area, buf);
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Scheduling(ScheduleForm),
    Quitting,
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
