//! Reporting periods
//!
//! Quarterly reports compare a quarter against either the same quarter one
//! year earlier (year over year) or the quarter immediately before it
//! (quarter over quarter).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }

    fn first_month(&self) -> u32 {
        match self {
            Quarter::Q1 => 1,
            Quarter::Q2 => 4,
            Quarter::Q3 => 7,
            Quarter::Q4 => 10,
        }
    }

    /// Quarter containing a calendar month (1-12)
    pub fn from_month(month: u32) -> Option<Self> {
        match month {
            1..=3 => Some(Quarter::Q1),
            4..=6 => Some(Quarter::Q2),
            7..=9 => Some(Quarter::Q3),
            10..=12 => Some(Quarter::Q4),
            _ => None,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Quarter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "Q1" => Ok(Quarter::Q1),
            "Q2" => Ok(Quarter::Q2),
            "Q3" => Ok(Quarter::Q3),
            "Q4" => Ok(Quarter::Q4),
            _ => Err(format!("Unknown quarter: {}. Available: Q1, Q2, Q3, Q4", s)),
        }
    }
}

/// How the prior period is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonType {
    /// Same quarter, previous year
    #[default]
    Yoy,
    /// Previous quarter
    Qoq,
}

impl ComparisonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonType::Yoy => "yoy",
            ComparisonType::Qoq => "qoq",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ComparisonType::Yoy => "year over year",
            ComparisonType::Qoq => "quarter over quarter",
        }
    }
}

impl fmt::Display for ComparisonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ComparisonType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yoy" => Ok(ComparisonType::Yoy),
            "qoq" => Ok(ComparisonType::Qoq),
            _ => Err(format!(
                "Unknown comparison type: {}. Available: yoy, qoq",
                s
            )),
        }
    }
}

/// A labelled, inclusive date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

impl DatePeriod {
    /// Number of days in the period, counting both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DatePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Current and comparison periods for one report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonPeriods {
    pub current: DatePeriod,
    pub previous: DatePeriod,
    pub comparison_type: ComparisonType,
}

impl fmt::Display for ComparisonPeriods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.current.label, self.previous.label)
    }
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        Error::InvalidPeriod(format!(
            "{}-{:02}-{:02} is not a valid date",
            year, month, day
        ))
    })
}

fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    let next_first = if month == 12 {
        ymd(year + 1, 1, 1)?
    } else {
        ymd(year, month + 1, 1)?
    };
    next_first
        .pred_opt()
        .ok_or_else(|| Error::InvalidPeriod(format!("No day before {}", next_first)))
}

/// Start and end dates of a quarter
pub fn quarter_dates(quarter: Quarter, year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let first = quarter.first_month();
    Ok((ymd(year, first, 1)?, last_day_of_month(year, first + 2)?))
}

/// A quarter as a labelled period ("Q4 2024")
pub fn quarter_period(quarter: Quarter, year: i32) -> Result<DatePeriod> {
    let (start, end) = quarter_dates(quarter, year)?;
    Ok(DatePeriod {
        start,
        end,
        label: format!("{} {}", quarter, year),
    })
}

/// Quarter and year of a date
pub fn quarter_of(date: NaiveDate) -> (Quarter, i32) {
    // month() is always 1-12
    let quarter = Quarter::from_month(date.month()).unwrap_or(Quarter::Q4);
    (quarter, date.year())
}

/// The quarter before the given one, rolling back a year from Q1
pub fn previous_quarter(quarter: Quarter, year: i32) -> (Quarter, i32) {
    match quarter {
        Quarter::Q1 => (Quarter::Q4, year - 1),
        Quarter::Q2 => (Quarter::Q1, year),
        Quarter::Q3 => (Quarter::Q2, year),
        Quarter::Q4 => (Quarter::Q3, year),
    }
}

/// Current and comparison periods for a quarterly report
pub fn comparison_periods(
    quarter: Quarter,
    year: i32,
    comparison_type: ComparisonType,
) -> Result<ComparisonPeriods> {
    let current = quarter_period(quarter, year)?;
    let previous = match comparison_type {
        ComparisonType::Yoy => quarter_period(quarter, year - 1)?,
        ComparisonType::Qoq => {
            let (prev_q, prev_y) = previous_quarter(quarter, year);
            quarter_period(prev_q, prev_y)?
        }
    };

    Ok(ComparisonPeriods {
        current,
        previous,
        comparison_type,
    })
}

/// The three calendar months of a quarter
pub fn monthly_periods(quarter: Quarter, year: i32) -> Result<Vec<DatePeriod>> {
    let first = quarter.first_month();
    (first..first + 3)
        .map(|month| {
            let start = ymd(year, month, 1)?;
            let end = last_day_of_month(year, month)?;
            Ok(DatePeriod {
                start,
                end,
                label: start.format("%B %Y").to_string(),
            })
        })
        .collect()
}

/// January 1st through `today` (capped at December 31st of `year`)
pub fn year_to_date(year: i32, today: NaiveDate) -> Result<DatePeriod> {
    let start = ymd(year, 1, 1)?;
    let end = today.min(ymd(year, 12, 31)?);
    if end < start {
        return Err(Error::InvalidPeriod(format!(
            "Year {} has not started as of {}",
            year, today
        )));
    }
    Ok(DatePeriod {
        start,
        end,
        label: format!("YTD {}", year),
    })
}

/// An arbitrary period, labelled "start to end" unless a label is given
pub fn custom_period(start: NaiveDate, end: NaiveDate, label: Option<&str>) -> Result<DatePeriod> {
    if end < start {
        return Err(Error::InvalidPeriod(format!(
            "Period ends ({}) before it starts ({})",
            end, start
        )));
    }
    Ok(DatePeriod {
        start,
        end,
        label: label
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} to {}", start, end)),
    })
}
