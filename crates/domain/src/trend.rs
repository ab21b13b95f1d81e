use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::Aggregation;

pub const TREND_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendDataPoint {
    /// ISO-8601 calendar date
    pub date: String,
    pub value: u64,
    /// `value - previous.value`; absent on the first point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<i64>,
}

impl TrendDataPoint {
    /// Builds an ordered series from `(date, value)` samples, filling in `change`.
    pub fn series<I>(samples: I) -> Vec<TrendDataPoint>
    where
        I: IntoIterator<Item = (NaiveDate, u64)>,
    {
        let mut previous: Option<u64> = None;
        samples
            .into_iter()
            .map(|(date, value)| {
                let change = previous.map(|p| value as i64 - p as i64);
                previous = Some(value);
                TrendDataPoint {
                    date: date.format(TREND_DATE_FORMAT).to_string(),
                    value,
                    change,
                }
            })
            .collect()
    }

    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, TREND_DATE_FORMAT).ok()
    }
}

/// Growth series for one time range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthTrends {
    pub plugins: Vec<TrendDataPoint>,
    pub marketplaces: Vec<TrendDataPoint>,
    pub developers: Vec<TrendDataPoint>,
    pub downloads: Vec<TrendDataPoint>,
}

impl GrowthTrends {
    pub fn aggregate(&self, aggregation: Aggregation) -> GrowthTrends {
        GrowthTrends {
            plugins: aggregate_points(&self.plugins, aggregation),
            marketplaces: aggregate_points(&self.marketplaces, aggregation),
            developers: aggregate_points(&self.developers, aggregation),
            downloads: aggregate_points(&self.downloads, aggregation),
        }
    }
}

/// Re-buckets an ascending series, keeping the last point of each bucket.
pub fn aggregate_points(points: &[TrendDataPoint], aggregation: Aggregation) -> Vec<TrendDataPoint> {
    let mut buckets: Vec<((i32, u32), NaiveDate, u64)> = Vec::with_capacity(points.len());

    for point in points {
        let Some(date) = point.naive_date() else {
            continue;
        };
        let key = match aggregation {
            Aggregation::Daily => (date.year(), date.ordinal()),
            Aggregation::Weekly => {
                let week = date.iso_week();
                (week.year(), week.week())
            }
            Aggregation::Monthly => (date.year(), date.month()),
        };

        match buckets.last_mut() {
            Some(last) if last.0 == key => {
                last.1 = date;
                last.2 = point.value;
            }
            _ => buckets.push((key, date, point.value)),
        }
    }

    TrendDataPoint::series(buckets.into_iter().map(|(_, date, value)| (date, value)))
}
