//! CLI-facing timeframe and range codes and their provider equivalents.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Min1,
    Min5,
    Min15,
    Hour1,
    Day1,
    Week1,
    Month1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 7] = [
        Timeframe::Min1,
        Timeframe::Min5,
        Timeframe::Min15,
        Timeframe::Hour1,
        Timeframe::Day1,
        Timeframe::Week1,
        Timeframe::Month1,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Timeframe::Min1 => "1m",
            Timeframe::Min5 => "5m",
            Timeframe::Min15 => "15m",
            Timeframe::Hour1 => "1h",
            Timeframe::Day1 => "1d",
            Timeframe::Week1 => "1w",
            Timeframe::Month1 => "1mo",
        }
    }

    /// Interval string understood by the chart endpoint.
    pub fn provider_interval(&self) -> &'static str {
        match self {
            Timeframe::Week1 => "1wk",
            other => other.code(),
        }
    }
}

impl FromStr for Timeframe {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self> {
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.code() == value)
            .ok_or_else(|| AppError::InvalidCode {
                kind: "timeframe",
                value: value.to_string(),
                allowed: allowed_list(Timeframe::ALL.iter().map(Timeframe::code)),
            })
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeCode {
    Days7,
    Days30,
    Days90,
    Days180,
    Year1,
    Year2,
}

impl RangeCode {
    pub const ALL: [RangeCode; 6] = [
        RangeCode::Days7,
        RangeCode::Days30,
        RangeCode::Days90,
        RangeCode::Days180,
        RangeCode::Year1,
        RangeCode::Year2,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            RangeCode::Days7 => "7d",
            RangeCode::Days30 => "30d",
            RangeCode::Days90 => "90d",
            RangeCode::Days180 => "180d",
            RangeCode::Year1 => "1y",
            RangeCode::Year2 => "2y",
        }
    }

    /// Coarse period used when no pivot timestamp is given.
    pub fn provider_period(&self) -> &'static str {
        match self {
            RangeCode::Days7 => "7d",
            RangeCode::Days30 => "1mo",
            RangeCode::Days90 => "3mo",
            RangeCode::Days180 => "6mo",
            RangeCode::Year1 => "1y",
            RangeCode::Year2 => "2y",
        }
    }

    pub fn duration(&self) -> Duration {
        let days = match self {
            RangeCode::Days7 => 7,
            RangeCode::Days30 => 30,
            RangeCode::Days90 => 90,
            RangeCode::Days180 => 180,
            RangeCode::Year1 => 365,
            RangeCode::Year2 => 730,
        };
        Duration::days(days)
    }
}

impl FromStr for RangeCode {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self> {
        RangeCode::ALL
            .into_iter()
            .find(|range| range.code() == value)
            .ok_or_else(|| AppError::InvalidCode {
                kind: "range",
                value: value.to_string(),
                allowed: allowed_list(RangeCode::ALL.iter().map(RangeCode::code)),
            })
    }
}

impl fmt::Display for RangeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn allowed_list<'a>(codes: impl Iterator<Item = &'a str>) -> String {
    codes.collect::<Vec<_>>().join(", ")
}

/// Half-open `[start, end)` history window, both bounds at UTC midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl HistoryWindow {
    /// Window ending on the pivot's calendar day and spanning the range duration.
    pub fn ending_at(pivot: i64, range: RangeCode) -> Result<Self> {
        let end = Utc
            .timestamp_opt(pivot, 0)
            .single()
            .ok_or_else(|| AppError::message(format!("Invalid 'to' timestamp: {pivot}")))?;
        let start = end.checked_sub_signed(range.duration()).ok_or_else(|| {
            AppError::message(format!("'to' timestamp {pivot} is out of range for {range}"))
        })?;

        Ok(Self {
            start: truncate_to_day(start),
            end: truncate_to_day(end),
        })
    }
}

fn truncate_to_day(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Parse a pivot timestamp given as integer or fractional unix seconds.
pub fn parse_pivot(raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value.trunc() as i64),
        _ => Err(AppError::message(format!(
            "Invalid 'to' timestamp '{raw}': expected unix seconds"
        ))),
    }
}
