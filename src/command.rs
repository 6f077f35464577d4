//! Textual picker commands.
//!
//! A command is either `[count]name` (`nm`, `3pm`, `12ny`) or `name arg`
//! (`sel 15`). Several commands may be chained with `;`.

use nom::{
    character::complete::{alpha1, digit1, space1},
    combinator::{all_consuming, opt},
    sequence::{preceded, tuple},
    IResult,
};
use std::fmt;
use std::str::FromStr;

use crate::calendar::LeapRule;
use crate::error::{Error, ErrorKind, Result};
use crate::selection::SelectionState;

#[derive(Clone, Copy)]
enum Action {
    Repeatable(fn(u16) -> Command),
    Arg(fn(u32) -> Command),
    NoArg(Command),
}

const COMMANDS: &[(&str, Action)] = &[
    ("nm", Action::Repeatable(Command::NextMonth)),
    ("pm", Action::Repeatable(Command::PrevMonth)),
    ("ny", Action::Repeatable(Command::NextYear)),
    ("py", Action::Repeatable(Command::PrevYear)),
    ("sel", Action::Arg(Command::Select)),
    ("clear", Action::NoArg(Command::Clear)),
    ("today", Action::NoArg(Command::Today)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextMonth(u16),
    PrevMonth(u16),
    NextYear(u16),
    PrevYear(u16),
    Select(u32),
    Clear,
    Today,
}

impl Command {
    /// Applies the command to `state`.
    ///
    /// `Select` is checked against the grid of the displayed month, which is
    /// what a click on a rendered day cell guarantees implicitly.
    pub fn apply(self, state: SelectionState, rule: LeapRule) -> Result<SelectionState> {
        let repeat = |n: u16, transition: fn(SelectionState) -> SelectionState| {
            (0..n).fold(state, |s, _| transition(s))
        };

        let next = match self {
            Command::NextMonth(n) => repeat(n, SelectionState::next_month),
            Command::PrevMonth(n) => repeat(n, SelectionState::prev_month),
            Command::NextYear(n) => repeat(n, SelectionState::next_year),
            Command::PrevYear(n) => repeat(n, SelectionState::prev_year),
            Command::Select(day) => {
                if !state.grid(rule).contains_day(day) {
                    return Err(Error::new(
                        ErrorKind::CommandParse,
                        &format!("day {} is not part of {}", day, state.displayed()),
                    ));
                }
                state.select_day(day)
            }
            Command::Clear => state.clear_selection(),
            Command::Today => SelectionState::today(),
        };

        log::debug!("{} -> {:?}", self, next);

        Ok(next)
    }

    fn name(&self) -> &'static str {
        match self {
            Command::NextMonth(_) => "nm",
            Command::PrevMonth(_) => "pm",
            Command::NextYear(_) => "ny",
            Command::PrevYear(_) => "py",
            Command::Select(_) => "sel",
            Command::Clear => "clear",
            Command::Today => "today",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::NextMonth(n)
            | Command::PrevMonth(n)
            | Command::NextYear(n)
            | Command::PrevYear(n) => write!(f, "{}{}", n, self.name()),
            Command::Select(day) => write!(f, "{} {}", self.name(), day),
            Command::Clear | Command::Today => write!(f, "{}", self.name()),
        }
    }
}

fn command_parts(input: &str) -> IResult<&str, (Option<&str>, &str, Option<&str>)> {
    all_consuming(tuple((opt(digit1), alpha1, opt(preceded(space1, digit1)))))(input)
}

fn lookup(name: &str) -> Option<Action> {
    COMMANDS
        .iter()
        .find(|(cmd, _)| *cmd == name)
        .map(|(_, action)| *action)
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let cmd = s.trim();
        let (_, (count, name, arg)) = command_parts(cmd)?;

        let action = lookup(name).ok_or_else(|| {
            Error::new(ErrorKind::CommandParse, &format!("unknown command '{}'", name))
        })?;

        let invalid = |reason: &str| {
            Error::new(ErrorKind::CommandParse, &format!("'{}': {}", cmd, reason))
        };

        match (action, count, arg) {
            (Action::Repeatable(build), count, None) => {
                let count = match count {
                    Some(digits) => digits
                        .parse::<u16>()
                        .map_err(|_| invalid("count out of range"))?,
                    None => 1,
                };
                if count == 0 {
                    return Err(invalid("count must be positive"));
                }
                Ok(build(count))
            }
            (Action::Arg(build), None, Some(arg)) => arg
                .parse::<u32>()
                .map(build)
                .map_err(|_| invalid("argument out of range")),
            (Action::Arg(_), None, None) => Err(invalid("missing argument")),
            (Action::NoArg(command), None, None) => Ok(command),
            (_, Some(_), _) => Err(invalid("command does not take a count")),
            (_, _, Some(_)) => Err(invalid("command does not take an argument")),
        }
    }
}

/// Parses a `;` separated list of commands. Empty entries are skipped.
pub fn parse_commands(input: &str) -> Result<Vec<Command>> {
    input
        .split(';')
        .map(str::trim)
        .filter(|cmd| !cmd.is_empty())
        .map(Command::from_str)
        .collect()
}

pub fn run_commands(state: SelectionState, input: &str, rule: LeapRule) -> Result<SelectionState> {
    parse_commands(input)?
        .into_iter()
        .try_fold(state, |state, command| command.apply(state, rule))
}
