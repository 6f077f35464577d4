use chrono::{Datelike, Month, NaiveDate};
use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, opt, recognize},
    sequence::{pair, separated_pair},
    IResult,
};
use num_traits::FromPrimitive;
use serde_with::DeserializeFromStr;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const NORMAL_MONTH_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Rule deciding which years get a 29th of February.
///
/// `Quadrennial` treats every year divisible by four as a leap year, century
/// years included. It is the default so that picker grids stay identical to
/// what users of the widget have always seen. `Gregorian` additionally drops
/// century years that are not divisible by 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeFromStr)]
pub enum LeapRule {
    Quadrennial,
    Gregorian,
}

impl Default for LeapRule {
    fn default() -> Self {
        LeapRule::Quadrennial
    }
}

impl LeapRule {
    pub fn is_leap_year(self, year: i32) -> bool {
        match self {
            LeapRule::Quadrennial => year % 4 == 0,
            LeapRule::Gregorian => year % 4 == 0 && (year % 100 != 0 || year % 400 == 0),
        }
    }

    pub fn days_in_month(self, year: i32, month: Month) -> u32 {
        if month == Month::February && self.is_leap_year(year) {
            29
        } else {
            NORMAL_MONTH_DAYS[month.number_from_month() as usize - 1]
        }
    }
}

impl FromStr for LeapRule {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quadrennial" | "simple" => Ok(LeapRule::Quadrennial),
            "gregorian" => Ok(LeapRule::Gregorian),
            _ => Err(Error::new(
                ErrorKind::ConfigParse,
                &format!("Leap rule '{}' not recognized", s),
            )),
        }
    }
}

/// Number of days of `month` in `year` under the default [`LeapRule`].
pub fn days_in_month(year: i32, month: Month) -> u32 {
    LeapRule::default().days_in_month(year, month)
}

/// Weekday of the first day of `month` in `year`, counted from Sunday = 0.
pub fn first_weekday(year: i32, month: Month) -> u32 {
    // Gregorian weekdays repeat every 400 years (146097 days, 20871 weeks),
    // which keeps any i32 year inside chrono's supported range.
    let cycle_year = 2000 + year.rem_euclid(400);

    NaiveDate::from_ymd_opt(cycle_year, month.number_from_month(), 1)
        .map_or(0, |date| date.weekday().num_days_from_sunday())
}

/// The month shown by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthIndex {
    year: i32,
    month: Month,
}

impl MonthIndex {
    pub fn new(year: i32, month: Month) -> Self {
        MonthIndex { year, month }
    }

    /// Builds an index from a zero based month (`0` = January).
    pub fn from_month0(year: i32, month0: u32) -> Option<Self> {
        month0
            .checked_add(1)
            .and_then(Month::from_u32)
            .map(|month| MonthIndex::new(year, month))
    }

    pub fn from_date<T: Datelike>(date: &T) -> Self {
        MonthIndex {
            year: date.year(),
            month: Month::from_u32(date.month()).unwrap_or(Month::January),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn month0(&self) -> u32 {
        self.month.number_from_month() - 1
    }

    pub fn short_name(&self) -> &'static str {
        MONTH_ABBREVIATIONS[self.month0() as usize]
    }

    pub fn num_days(&self, rule: LeapRule) -> u32 {
        rule.days_in_month(self.year, self.month)
    }

    pub fn first_weekday(&self) -> u32 {
        first_weekday(self.year, self.month)
    }

    pub fn next(&self) -> Self {
        if self.month == Month::December {
            MonthIndex::new(self.year.saturating_add(1), Month::January)
        } else {
            MonthIndex::new(self.year, self.month.succ())
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == Month::January {
            MonthIndex::new(self.year.saturating_sub(1), Month::December)
        } else {
            MonthIndex::new(self.year, self.month.pred())
        }
    }

    pub fn next_year(&self) -> Self {
        MonthIndex::new(self.year.saturating_add(1), self.month)
    }

    pub fn prev_year(&self) -> Self {
        MonthIndex::new(self.year.saturating_sub(1), self.month)
    }
}

impl PartialOrd for MonthIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MonthIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month.number_from_month())
            .cmp(&(other.year, other.month.number_from_month()))
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.short_name(), self.year)
    }
}

fn year_month(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(recognize(pair(opt(char('-')), digit1)), char('-'), digit1)(input)
}

impl FromStr for MonthIndex {
    type Err = Error;

    /// Parses `YYYY-MM`, e.g. `2024-02` or `-0044-03`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            Error::new(
                ErrorKind::MonthParse,
                &format!("'{}' is not of the form YYYY-MM", s),
            )
        };

        let (_, (year, month)) = all_consuming(year_month)(s.trim()).map_err(|_| invalid())?;

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month
            .parse::<u32>()
            .ok()
            .and_then(Month::from_u32)
            .ok_or_else(invalid)?;

        Ok(MonthIndex::new(year, month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MONTHS: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    #[test]
    fn february_follows_simplified_leap_rule() {
        assert_eq!(days_in_month(2024, Month::February), 29);
        assert_eq!(days_in_month(2023, Month::February), 28);
        assert_eq!(days_in_month(1900, Month::February), 29);
        assert_eq!(days_in_month(2100, Month::February), 29);
        assert_eq!(days_in_month(-4, Month::February), 29);
        assert_eq!(days_in_month(-1, Month::February), 28);
    }

    #[test]
    fn gregorian_rule_skips_century_years() {
        let rule = LeapRule::Gregorian;
        assert_eq!(rule.days_in_month(1900, Month::February), 28);
        assert_eq!(rule.days_in_month(2000, Month::February), 29);
        assert_eq!(rule.days_in_month(2100, Month::February), 28);
        assert_eq!(rule.days_in_month(2024, Month::February), 29);
    }

    #[test]
    fn gregorian_rule_matches_chrono() {
        for year in 1600..2400 {
            for (idx, &month) in ALL_MONTHS.iter().enumerate() {
                let first = NaiveDate::from_ymd_opt(year, idx as u32 + 1, 1).unwrap();
                let next = if idx == 11 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
                } else {
                    NaiveDate::from_ymd_opt(year, idx as u32 + 2, 1).unwrap()
                };
                let expected = next.signed_duration_since(first).num_days() as u32;

                assert_eq!(
                    LeapRule::Gregorian.days_in_month(year, month),
                    expected,
                    "{:?} {}",
                    month,
                    year
                );
            }
        }
    }

    #[test]
    fn month_lengths_are_within_bounds() {
        for year in -50..50 {
            for &month in ALL_MONTHS.iter() {
                let days = days_in_month(year, month);
                assert!((28..=31).contains(&days));
            }
        }
    }

    #[test]
    fn first_weekday_of_february_2024() {
        assert_eq!(first_weekday(2024, Month::February), 4);
    }

    #[test]
    fn first_weekday_matches_chrono() {
        for year in 1800..2200 {
            for (idx, &month) in ALL_MONTHS.iter().enumerate() {
                let expected = NaiveDate::from_ymd_opt(year, idx as u32 + 1, 1)
                    .unwrap()
                    .weekday()
                    .num_days_from_sunday();
                assert_eq!(first_weekday(year, month), expected);
            }
        }
    }

    #[test]
    fn first_weekday_matches_chrono_for_distant_years() {
        let years = (-500..-400).chain(-3..3).chain(9000..9010).chain(200_000..200_004);

        for year in years {
            for (idx, &month) in ALL_MONTHS.iter().enumerate() {
                let expected = NaiveDate::from_ymd_opt(year, idx as u32 + 1, 1)
                    .unwrap()
                    .weekday()
                    .num_days_from_sunday();
                assert_eq!(first_weekday(year, month), expected, "{}-{}", year, idx + 1);
            }
        }
    }

    #[test]
    fn first_weekday_is_total() {
        assert!(first_weekday(i32::MAX, Month::December) < 7);
        assert!(first_weekday(i32::MIN, Month::January) < 7);
        assert_eq!(
            first_weekday(-1_000_000, Month::May),
            first_weekday(-1_000_000 + 400, Month::May)
        );
    }

    #[test]
    fn next_rolls_over_year() {
        let idx = MonthIndex::new(2023, Month::December);
        assert_eq!(idx.next(), MonthIndex::new(2024, Month::January));
        assert_eq!(
            MonthIndex::new(2023, Month::June).next(),
            MonthIndex::new(2023, Month::July)
        );
    }

    #[test]
    fn prev_rolls_over_year() {
        let idx = MonthIndex::new(2023, Month::January);
        assert_eq!(idx.prev(), MonthIndex::new(2022, Month::December));
        assert_eq!(
            MonthIndex::new(2023, Month::June).prev(),
            MonthIndex::new(2023, Month::May)
        );
    }

    #[test]
    fn next_then_prev_is_identity() {
        for year in [-1, 0, 1999, 2024] {
            for &month in ALL_MONTHS.iter() {
                let idx = MonthIndex::new(year, month);
                assert_eq!(idx.next().prev(), idx);
                assert_eq!(idx.prev().next(), idx);
            }
        }
    }

    #[test]
    fn month0_is_zero_based() {
        assert_eq!(MonthIndex::new(2024, Month::January).month0(), 0);
        assert_eq!(MonthIndex::new(2024, Month::December).month0(), 11);
        assert_eq!(
            MonthIndex::from_month0(2024, 1),
            Some(MonthIndex::new(2024, Month::February))
        );
        assert_eq!(MonthIndex::from_month0(2024, 12), None);
    }

    #[test]
    fn ordering_is_chronological() {
        assert!(MonthIndex::new(2023, Month::December) < MonthIndex::new(2024, Month::January));
        assert!(MonthIndex::new(2024, Month::March) > MonthIndex::new(2024, Month::February));
    }

    #[test]
    fn display_uses_short_name() {
        assert_eq!(MonthIndex::new(2024, Month::February).to_string(), "Feb 2024");
    }

    #[test]
    fn parse_year_month() {
        assert_eq!(
            "2024-02".parse::<MonthIndex>().unwrap(),
            MonthIndex::new(2024, Month::February)
        );
        assert_eq!(
            "-0044-03".parse::<MonthIndex>().unwrap(),
            MonthIndex::new(-44, Month::March)
        );
        assert!("2024-13".parse::<MonthIndex>().is_err());
        assert!("2024-00".parse::<MonthIndex>().is_err());
        assert!("2024".parse::<MonthIndex>().is_err());
        assert!("feb-2024".parse::<MonthIndex>().is_err());
    }

    #[test]
    fn parse_leap_rule() {
        assert_eq!("Gregorian".parse::<LeapRule>().unwrap(), LeapRule::Gregorian);
        assert_eq!("quadrennial".parse::<LeapRule>().unwrap(), LeapRule::Quadrennial);
        assert!("lunar".parse::<LeapRule>().is_err());
    }
}
