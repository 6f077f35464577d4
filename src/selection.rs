use chrono::{Datelike, Local};

use crate::calendar::{LeapRule, MonthIndex};
use crate::grid::Grid;

/// Displayed month plus the selected day of that month.
///
/// Transitions consume the state and return the next one. Every navigation
/// clears the selection, so a selected day is always relative to the month
/// it was picked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    displayed: MonthIndex,
    selected: Option<u32>,
}

impl Default for SelectionState {
    fn default() -> Self {
        SelectionState::today()
    }
}

impl SelectionState {
    pub fn new(displayed: MonthIndex) -> Self {
        SelectionState {
            displayed,
            selected: None,
        }
    }

    pub fn with_selection(displayed: MonthIndex, day: u32) -> Self {
        SelectionState {
            displayed,
            selected: Some(day),
        }
    }

    pub fn from_date<T: Datelike>(date: &T) -> Self {
        SelectionState::with_selection(MonthIndex::from_date(date), date.day())
    }

    pub fn today() -> Self {
        SelectionState::from_date(&Local::now().date_naive())
    }

    pub fn displayed(&self) -> MonthIndex {
        self.displayed
    }

    pub fn year(&self) -> i32 {
        self.displayed.year()
    }

    pub fn month0(&self) -> u32 {
        self.displayed.month0()
    }

    pub fn selected_day(&self) -> Option<u32> {
        self.selected
    }

    pub fn is_selected(&self, day: u32) -> bool {
        self.selected == Some(day)
    }

    /// The selection as an ISO 8601 date. Years outside `0..=9999` use the
    /// expanded form with an explicit sign, e.g. `-0044-03-15`.
    pub fn selected_date(&self) -> Option<String> {
        let year = self.year();
        let month = self.month0() + 1;

        self.selected.map(|day| {
            if (0..=9999).contains(&year) {
                format!("{:04}-{:02}-{:02}", year, month, day)
            } else {
                format!("{:+05}-{:02}-{:02}", year, month, day)
            }
        })
    }

    pub fn grid(&self, rule: LeapRule) -> Grid {
        Grid::with_rule(self.displayed, rule)
    }

    /// Selects `day` without checking it against the displayed month.
    pub fn select_day(self, day: u32) -> Self {
        SelectionState {
            selected: Some(day),
            ..self
        }
    }

    pub fn clear_selection(self) -> Self {
        SelectionState {
            selected: None,
            ..self
        }
    }

    pub fn next_month(self) -> Self {
        SelectionState::new(self.displayed.next())
    }

    pub fn prev_month(self) -> Self {
        SelectionState::new(self.displayed.prev())
    }

    pub fn next_year(self) -> Self {
        SelectionState::new(self.displayed.next_year())
    }

    pub fn prev_year(self) -> Self {
        SelectionState::new(self.displayed.prev_year())
    }
}
