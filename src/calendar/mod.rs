mod grid;
mod month;
pub(crate) mod util;
mod widget;
pub(crate) use self::grid::CalendarGrid;
pub(crate) use self::month::YearMonth;
pub(crate) use self::widget::{plain_grid, Calendar, MAIN_WIDTH, TOTAL_HEIGHT};
