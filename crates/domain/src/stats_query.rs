use crate::{Aggregation, DomainError, TimeRange};

/// Query surface handed down by the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsQuery {
    pub period: TimeRange,
    pub aggregation: Aggregation,
    pub force_refresh: bool,
}

impl StatsQuery {
    /// Periods the API exposes; `6m` and `all` are internal ranges only.
    pub const PERIODS: [TimeRange; 4] = [
        TimeRange::SevenDays,
        TimeRange::ThirtyDays,
        TimeRange::NinetyDays,
        TimeRange::OneYear,
    ];

    pub fn parse(period: &str, aggregation: &str, force_refresh: bool) -> Result<Self, DomainError> {
        let period: TimeRange = period.parse()?;
        if !Self::PERIODS.contains(&period) {
            return Err(DomainError::InvalidQuery(format!(
                "period '{}' is not one of 7d, 30d, 90d, 1y",
                period
            )));
        }

        Ok(Self {
            period,
            aggregation: aggregation.parse()?,
            force_refresh,
        })
    }
}

impl Default for StatsQuery {
    fn default() -> Self {
        Self {
            period: TimeRange::ThirtyDays,
            aggregation: Aggregation::Daily,
            force_refresh: false,
        }
    }
}
