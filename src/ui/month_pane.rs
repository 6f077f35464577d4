use std::fmt::{self, Display, Write};
use unsegen::base::*;
use unsegen::widget::*;

use crate::calendar::WEEKDAY_LABELS;
use crate::grid::{Cell, Grid, DAYS_PER_WEEK};

use super::{Context, Theme};

struct DayCell<'a> {
    day_num: u32,
    selected: bool,
    is_today: bool,
    theme: &'a Theme,
}

impl<'a> DayCell<'a> {
    const CELL_WIDTH: usize = 4;

    fn new(day_num: u32, theme: &'a Theme) -> Self {
        DayCell {
            day_num,
            selected: false,
            is_today: false,
            theme,
        }
    }

    fn select(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    fn today(mut self, is_today: bool) -> Self {
        self.is_today = is_today;
        self
    }

    fn style(&self) -> StyleModifier {
        if self.selected {
            self.theme.focus_day_style
        } else if self.is_today {
            self.theme.today_day_style
        } else {
            self.theme.day_style
        }
    }
}

impl Display for DayCell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arg_today = if self.is_today {
            self.theme.today_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        let arg_focus = if self.selected {
            self.theme.focus_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        write!(f, "{}{}{:>2}", arg_today, arg_focus, self.day_num)
    }
}

/// Header, weekday labels and day grid of the displayed month.
pub struct MonthPane<'a> {
    grid: Grid,
    context: &'a Context,
}

impl<'a> MonthPane<'a> {
    const ROWS: usize = 6;
    const HEADER_ROWS: usize = 2;
    const WIDTH: usize = DAYS_PER_WEEK * DayCell::CELL_WIDTH;

    pub fn new(context: &'a Context) -> Self {
        MonthPane {
            grid: context.grid(),
            context,
        }
    }

    fn header(&self) -> String {
        format!("<< < {} > >>", self.grid.month())
    }
}

impl Widget for MonthPane<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(Self::WIDTH),
            height: RowDemand::exact(Self::HEADER_ROWS + Self::ROWS),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = self.context.theme();
        let state = self.context.state();
        let month = self.grid.month();

        let mut cursor = Cursor::new(&mut window)
            .wrapping_mode(WrappingMode::Wrap)
            .style_modifier(theme.month_header_style);

        let result = (|| -> fmt::Result {
            writeln!(&mut cursor, "{:^width$}", self.header(), width = Self::WIDTH)?;

            cursor.set_style_modifier(theme.weekday_label_style);
            for label in WEEKDAY_LABELS.iter() {
                write!(&mut cursor, "{:>width$}", label, width = DayCell::CELL_WIDTH)?;
            }
            writeln!(&mut cursor)?;

            for week in self.grid.weeks() {
                for cell in week.cells() {
                    match cell {
                        Cell::Padding => {
                            cursor.set_style_modifier(theme.day_style);
                            write!(&mut cursor, "{:width$}", "", width = DayCell::CELL_WIDTH)?;
                        }
                        Cell::Day(day) => {
                            let day_cell = DayCell::new(*day, theme)
                                .select(state.is_selected(*day))
                                .today(self.context.is_today(month, *day));

                            cursor.set_style_modifier(day_cell.style());
                            write!(&mut cursor, "{}", day_cell)?;
                        }
                    }
                }
                cursor.set_style_modifier(theme.day_style);
                writeln!(&mut cursor)?;
            }

            Ok(())
        })();

        if let Err(err) = result {
            log::warn!("Error while drawing {}: {}", month, err);
        }
    }
}
