use chrono::{Datelike, Local, NaiveDate};

use crate::calendar::{LeapRule, MonthIndex};
use crate::command::Command;
use crate::config::{Config, ThemeConfig};
use crate::grid::Grid;
use crate::selection::SelectionState;

use unsegen::base::style::*;
use unsegen::widget::builtin::PromptLine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Command,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub day_style: StyleModifier,
    pub focus_day_style: StyleModifier,
    pub focus_day_char: Option<char>,
    pub today_day_style: StyleModifier,
    pub today_day_char: Option<char>,
    pub month_header_style: StyleModifier,
    pub weekday_label_style: StyleModifier,
    pub error_style: StyleModifier,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Theme {
            day_style: StyleModifier::default(),
            focus_day_style: StyleModifier::default().bg_color(Color::Blue),
            focus_day_char: config.selected_char,
            today_day_style: StyleModifier::default().invert(true),
            today_day_char: config.today_char,
            month_header_style: StyleModifier::default().fg_color(Color::Yellow),
            weekday_label_style: StyleModifier::default().bold(true),
            error_style: StyleModifier::default().fg_color(Color::LightRed),
        }
    }
}

pub struct Context {
    pub mode: Mode,
    pub last_error_message: Option<String>,
    state: SelectionState,
    leap_rule: LeapRule,
    theme: Theme,
    today: NaiveDate,
    command_line: PromptLine,
}

impl Context {
    pub fn new(config: &Config, state: SelectionState) -> Self {
        Context {
            mode: Mode::Normal,
            last_error_message: None,
            state,
            leap_rule: config.leap_rule,
            theme: Theme::from_config(&config.theme),
            today: Local::now().date_naive(),
            command_line: PromptLine::with_prompt(":".to_owned()),
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn grid(&self) -> Grid {
        self.state.grid(self.leap_rule)
    }

    /// Replaces the picker state with the result of `transition`.
    pub fn apply<F>(&mut self, transition: F)
    where
        F: FnOnce(SelectionState) -> SelectionState,
    {
        self.state = transition(self.state);
        self.last_error_message = None;
    }

    pub fn run_command(&mut self, cmd: &str) -> crate::error::Result<()> {
        let command = cmd.parse::<Command>()?;
        self.state = command.apply(self.state, self.leap_rule)?;
        self.last_error_message = None;
        Ok(())
    }

    pub fn report_error(&mut self, message: String) {
        log::warn!("{}", message);
        self.last_error_message = Some(message);
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn is_today(&self, month: MonthIndex, day: u32) -> bool {
        let today = self.today();
        MonthIndex::from_date(&today) == month && today.day() == day
    }

    pub fn input_sink(&self) -> &PromptLine {
        &self.command_line
    }

    pub fn input_sink_mut(&mut self) -> &mut PromptLine {
        &mut self.command_line
    }
}
