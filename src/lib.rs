//! Single date picker: month grid layout, month/year navigation and the
//! selected day, plus a terminal front end built on top of them.

pub mod calendar;
pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod selection;
pub mod ui;

pub use calendar::{days_in_month, first_weekday, LeapRule, MonthIndex};
pub use grid::{build_grid, Cell, CellKind, Grid, Week};
pub use selection::SelectionState;
