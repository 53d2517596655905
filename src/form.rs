use crate::calendar::util::long_date;
use crate::theme::{
    form::{ACTIVE_FIELD_STYLE, UNFILLED_FIELD_STYLE},
    BASE_STYLE, MUTED_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use time::Date;

const OUTER_WIDTH: u16 = 44;
const OUTER_HEIGHT: u16 = 10;

/// Longest accepted workout name, in characters
const MAX_NAME_LEN: usize = 32;

/// Longest accepted duration input, in characters
const MAX_DURATION_LEN: usize = 4;

const DEFAULT_DURATION_INPUT: &str = "45";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ScheduleDialog;

impl StatefulWidget for ScheduleDialog {
    type State = ScheduleForm;

    /*
     * ............................................
     * .┌──────── Schedule Workout ──────────────┐.
     * .│ Thursday, January 16, 2025             │.
     * .│                                        │.
     * .│ Workout name: Leg Day                  │.
     * .│ Duration:     45 min                   │.
     * .│                                        │.
     * .│  [ENTER] Schedule     [ESC] Cancel     │.
     * .└────────────────────────────────────────┘.
     * ............................................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Schedule Workout ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(2, 1));
        state.to_text().render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Field {
    #[default]
    Name,
    Duration,
}

/// Input state of the dialog for scheduling a workout on `date`
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ScheduleForm {
    date: Date,
    name: String,
    duration: String,
    field: Field,
}

impl ScheduleForm {
    pub(crate) fn new(date: Date) -> ScheduleForm {
        ScheduleForm {
            date,
            name: String::new(),
            duration: String::from(DEFAULT_DURATION_INPUT),
            field: Field::default(),
        }
    }

    fn to_text(&self) -> Text<'static> {
        Text::from_iter([
            Line::styled(long_date(self.date), BASE_STYLE),
            Line::styled("", BASE_STYLE),
            self.field_line("Workout name: ", &self.name, "Enter workout name", Field::Name),
            self.field_line("Duration:     ", &self.duration, "45", Field::Duration),
            Line::styled("", BASE_STYLE),
            Line::styled(" [ENTER] Schedule     [ESC] Cancel", MUTED_STYLE),
        ])
    }

    fn field_line(
        &self,
        label: &'static str,
        value: &str,
        placeholder: &'static str,
        field: Field,
    ) -> Line<'static> {
        let value_span = if value.is_empty() {
            Span::styled(placeholder, UNFILLED_FIELD_STYLE)
        } else if self.field == field {
            Span::styled(value.to_owned(), ACTIVE_FIELD_STYLE)
        } else {
            Span::styled(value.to_owned(), BASE_STYLE)
        };
        let mut spans = vec![Span::styled(label, BASE_STYLE), value_span];
        if field == Field::Duration {
            spans.push(Span::styled(" min", BASE_STYLE));
        }
        if self.field == field {
            spans.push(Span::styled("_", ACTIVE_FIELD_STYLE));
        }
        Line::from_iter(spans)
    }

    pub(crate) fn handle_input(&mut self, input: FormInput) -> FormOutput {
        match (input, self.field) {
            (FormInput::Char(c), Field::Name) if !c.is_control() => {
                if self.name.chars().count() < MAX_NAME_LEN {
                    self.name.push(c);
                    FormOutput::Ok
                } else {
                    FormOutput::Invalid
                }
            }
            (FormInput::Char(c), Field::Duration) if c.is_ascii_digit() => {
                if self.duration.len() < MAX_DURATION_LEN {
                    self.duration.push(c);
                    FormOutput::Ok
                } else {
                    FormOutput::Invalid
                }
            }
            (FormInput::Backspace, Field::Name) => {
                if self.name.pop().is_some() {
                    FormOutput::Ok
                } else {
                    FormOutput::Invalid
                }
            }
            (FormInput::Backspace, Field::Duration) => {
                if self.duration.pop().is_some() {
                    FormOutput::Ok
                } else {
                    FormOutput::Invalid
                }
            }
            (FormInput::NextField, Field::Name) => {
                self.field = Field::Duration;
                FormOutput::Ok
            }
            (FormInput::NextField, Field::Duration) => {
                self.field = Field::Name;
                FormOutput::Ok
            }
            (FormInput::Enter, _) => FormOutput::Submit {
                date: self.date,
                name: self.name.clone(),
                duration: self.duration.clone(),
            },
            (FormInput::Cancel, _) => FormOutput::Cancel,
            _ => FormOutput::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FormInput {
    Char(char),
    Backspace,
    NextField,
    Enter,
    Cancel,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum FormOutput {
    Ok,
    Invalid,
    /// The user asked to schedule a workout; the name and duration are the
    /// raw input and are validated by the schedule
    Submit {
        date: Date,
        name: String,
        duration: String,
    },
    Cancel,
}
