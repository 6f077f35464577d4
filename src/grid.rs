//! Month grid layout.
//!
//! A [`Grid`] holds the weeks of one month. The first week starts with
//! `first_weekday` padding cells, the days follow in order. The last week is
//! not padded: it only holds the remaining day cells, so every week except
//! the last one has exactly [`DAYS_PER_WEEK`] cells. Consumers that need a
//! fixed-width layout place cell `i` of a week in column `i`.

use chrono::Month;
use itertools::Itertools;
use std::fmt;

use crate::calendar::{LeapRule, MonthIndex, WEEKDAY_LABELS};

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Padding,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Padding,
    Day(u32),
}

impl Cell {
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Padding => CellKind::Padding,
            Cell::Day(_) => CellKind::Day,
        }
    }

    pub fn value(&self) -> Option<u32> {
        match self {
            Cell::Padding => None,
            Cell::Day(day) => Some(*day),
        }
    }

    pub fn is_padding(&self) -> bool {
        matches!(self, Cell::Padding)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    cells: Vec<Cell>,
}

impl Week {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.cells.iter().filter_map(Cell::value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    month: MonthIndex,
    weeks: Vec<Week>,
}

/// Grid of `month` in `year` using the default [`LeapRule`].
pub fn build_grid(year: i32, month: Month) -> Grid {
    Grid::with_rule(MonthIndex::new(year, month), LeapRule::default())
}

impl Grid {
    pub fn new(month: MonthIndex) -> Self {
        Grid::with_rule(month, LeapRule::default())
    }

    pub fn with_rule(month: MonthIndex, rule: LeapRule) -> Self {
        let offset = month.first_weekday() as usize;
        let num_days = month.num_days(rule);

        let weeks = std::iter::repeat(Cell::Padding)
            .take(offset)
            .chain((1..=num_days).map(Cell::Day))
            .collect::<Vec<Cell>>()
            .chunks(DAYS_PER_WEEK)
            .map(|row| Week {
                cells: row.to_vec(),
            })
            .collect();

        Grid { month, weeks }
    }

    pub fn month(&self) -> MonthIndex {
        self.month
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.weeks.iter().flat_map(|week| week.days())
    }

    pub fn day_count(&self) -> usize {
        self.days().count()
    }

    pub fn contains_day(&self, day: u32) -> bool {
        day >= 1 && day as usize <= self.day_count()
    }

    /// Row and column of `day`, if the month has it.
    pub fn position_of(&self, day: u32) -> Option<(usize, usize)> {
        if !self.contains_day(day) {
            return None;
        }

        let flat = self.month.first_weekday() as usize + day as usize - 1;
        Some((flat / DAYS_PER_WEEK, flat % DAYS_PER_WEEK))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = DAYS_PER_WEEK * 3 - 1;
        writeln!(f, "{:^width$}", self.month.to_string(), width = width)?;
        writeln!(f, "{}", WEEKDAY_LABELS.join(" "))?;

        for week in &self.weeks {
            let row = week
                .cells()
                .iter()
                .map(|cell| match cell {
                    Cell::Padding => "  ".to_owned(),
                    Cell::Day(day) => format!("{:>2}", day),
                })
                .join(" ");
            writeln!(f, "{}", row)?;
        }

        Ok(())
    }
}
