pub mod app;
mod command;
mod context;
mod month_pane;

pub use context::{Context, Mode, Theme};
pub use month_pane::MonthPane;
