use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// Window over which growth trends are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    pub fn all() -> &'static [TimeRange] {
        &[
            TimeRange::SevenDays,
            TimeRange::ThirtyDays,
            TimeRange::NinetyDays,
            TimeRange::SixMonths,
            TimeRange::OneYear,
            TimeRange::All,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::SevenDays => "7d",
            TimeRange::ThirtyDays => "30d",
            TimeRange::NinetyDays => "90d",
            TimeRange::SixMonths => "6m",
            TimeRange::OneYear => "1y",
            TimeRange::All => "all",
        }
    }

    /// Requested length in days; `None` means "since launch".
    pub fn days(&self) -> Option<i64> {
        match self {
            TimeRange::SevenDays => Some(7),
            TimeRange::ThirtyDays => Some(30),
            TimeRange::NinetyDays => Some(90),
            TimeRange::SixMonths => Some(180),
            TimeRange::OneYear => Some(365),
            TimeRange::All => None,
        }
    }

    /// Sampling interval, chosen so the point count stays bounded.
    pub fn step_days(&self) -> i64 {
        match self {
            TimeRange::SevenDays => 1,
            TimeRange::ThirtyDays => 3,
            TimeRange::NinetyDays => 7,
            TimeRange::SixMonths => 14,
            TimeRange::OneYear | TimeRange::All => 30,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "7d" => Ok(TimeRange::SevenDays),
            "30d" => Ok(TimeRange::ThirtyDays),
            "90d" => Ok(TimeRange::NinetyDays),
            "6m" => Ok(TimeRange::SixMonths),
            "1y" => Ok(TimeRange::OneYear),
            "all" => Ok(TimeRange::All),
            other => Err(DomainError::InvalidQuery(format!(
                "unknown time range '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Daily => "daily",
            Aggregation::Weekly => "weekly",
            Aggregation::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Aggregation::Daily),
            "weekly" => Ok(Aggregation::Weekly),
            "monthly" => Ok(Aggregation::Monthly),
            other => Err(DomainError::InvalidQuery(format!(
                "unknown aggregation '{}'",
                other
            ))),
        }
    }
}
